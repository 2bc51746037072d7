//! HTTP API layer: thin translation over the repository

pub mod books;
pub mod health;
pub mod loans;
pub mod pages;
pub mod stats;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// `axum::Json` with the extractor rejection routed through [`AppError`], so
/// a malformed or wrong-typed body is a 400 with an `{"error": msg}` body
/// instead of the framework's 422.
#[derive(axum::extract::FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Body returned by mutating endpoints with nothing else to report
#[derive(Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        // Books (catalog)
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            patch(books::update_book).delete(books::delete_book),
        )
        // Loans
        .route("/loan", post(loans::create_loan))
        .route("/return", post(loans::return_loan))
        .route(
            "/loans/:id",
            patch(loans::update_loan).delete(loans::delete_loan),
        )
        // Statistics
        .route("/stats", get(stats::get_stats));

    Router::new()
        .route("/", get(pages::index))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
