//! Loan model and reporting types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Loan row from the database. A null `return_date` means "still out".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: i64,
    pub book_id: i64,
    pub borrower: String,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Loan joined with its book's title, for date-range reports.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoanSummary {
    pub id: i64,
    pub title: String,
    pub borrower: String,
    pub loan_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Partial update for a loan. A supplied `return_date` marks the loan
/// returned (restoring book quantity); `borrower` is a plain correction.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateLoan {
    pub return_date: Option<NaiveDate>,
    pub borrower: Option<String>,
}

/// Per-book loan count, one row per book including never-loaned books.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookLoanCount {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub times_loaned: i64,
}

/// Catalog-wide loan aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAggregates {
    /// Count of all loan rows ever created, including returned ones.
    pub total_loans: i64,
    /// Mean of per-book loan counts over books with at least one loan;
    /// 0.0 when nothing has ever been loaned.
    pub avg_loans_per_book: f64,
}
