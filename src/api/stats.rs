//! Statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{error::AppResult, models::BookLoanCount};

/// Statistics response
#[derive(Serialize)]
pub struct StatsResponse {
    /// Count of all loan rows ever created
    pub total_loans: i64,
    /// Mean loans per book, over books with at least one loan
    pub avg_loans_per_book: f64,
    /// Per-book loan counts, most-loaned first
    pub top_books: Vec<BookLoanCount>,
}

/// Get catalog-wide loan statistics
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let aggregates = state.repository.reports.loan_aggregates().await?;
    let top_books = state.repository.reports.book_loan_counts().await?;

    Ok(Json(StatsResponse {
        total_loans: aggregates.total_loans,
        avg_loans_per_book: aggregates.avg_loans_per_book,
        top_books,
    }))
}
