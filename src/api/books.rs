//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Book, UpdateBook},
};

use super::{Json, OkResponse};

/// Create book request. Fields are optional so missing ones surface as a 400
/// with a message rather than a deserialization rejection.
#[derive(Deserialize)]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub qty: Option<i64>,
}

#[derive(Serialize)]
pub struct CreateBookResponse {
    pub book_id: i64,
}

/// Partial book update request
#[derive(Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub qty: Option<i64>,
}

/// List all books in the catalog
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.repository.books.list(None).await?;
    Ok(Json(books))
}

/// Add a book to the catalog, creating its author if needed
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<CreateBookResponse>)> {
    let title = request
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("title and author required".to_string()))?;
    let author = request
        .author
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::Validation("title and author required".to_string()))?;

    let qty = request.qty.unwrap_or(1);
    if qty < 1 {
        return Err(AppError::Validation(
            "qty must be a positive integer".to_string(),
        ));
    }

    let book_id = state.repository.books.create(&title, &author, qty).await?;

    Ok((StatusCode::CREATED, Json(CreateBookResponse { book_id })))
}

/// Partially update a book
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i64>,
    Json(request): Json<UpdateBookRequest>,
) -> AppResult<Json<OkResponse>> {
    let changes = UpdateBook {
        title: request.title,
        author: request.author,
        qty: request.qty,
    };

    state.repository.books.update(book_id, &changes).await?;

    Ok(Json(OkResponse::new()))
}

/// Delete a book and, by cascade, its loans. Idempotent.
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    state.repository.books.delete(book_id).await?;

    Ok(Json(OkResponse::new()))
}
