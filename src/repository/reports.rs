//! Reporting queries: join, aggregates, and date filtering

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::{BookLoanCount, LoanAggregates, LoanSummary},
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: SqlitePool,
}

impl ReportsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Per-book loan counts, one row per book (never-loaned books included
    /// with count 0), most-loaned first. Ties break on book id so the order
    /// is deterministic.
    pub async fn book_loan_counts(&self) -> AppResult<Vec<BookLoanCount>> {
        let counts = sqlx::query_as::<_, BookLoanCount>(
            r#"
            SELECT b.id AS book_id, b.title, a.name AS author, COUNT(l.id) AS times_loaned
            FROM books b
            JOIN authors a ON a.id = b.author_id
            LEFT JOIN loans l ON l.book_id = b.id
            GROUP BY b.id
            ORDER BY times_loaned DESC, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    /// Total loans ever created, and the mean of per-book loan counts over
    /// books that have at least one loan (0.0 when nothing has been loaned).
    pub async fn loan_aggregates(&self) -> AppResult<LoanAggregates> {
        let total_loans = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM loans")
            .fetch_one(&self.pool)
            .await?;

        let avg_loans_per_book = sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(cnt) FROM (SELECT COUNT(*) AS cnt FROM loans GROUP BY book_id)",
        )
        .fetch_one(&self.pool)
        .await?
        .unwrap_or(0.0);

        Ok(LoanAggregates {
            total_loans,
            avg_loans_per_book,
        })
    }

    /// Loans whose loan date falls inside the inclusive range, joined with
    /// book title, ascending by loan date.
    pub async fn loans_in_date_range(
        &self,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> AppResult<Vec<LoanSummary>> {
        let loans = sqlx::query_as::<_, LoanSummary>(
            r#"
            SELECT l.id, b.title, l.borrower, l.loan_date, l.return_date
            FROM loans l
            JOIN books b ON b.id = l.book_id
            WHERE l.loan_date BETWEEN ? AND ?
            ORDER BY l.loan_date
            "#,
        )
        .bind(from_date)
        .bind(to_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }
}
