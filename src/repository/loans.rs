//! Loans repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{Loan, UpdateLoan},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: SqlitePool,
}

impl LoansRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, loan_id: i64) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            "SELECT id, book_id, borrower, loan_date, return_date FROM loans WHERE id = ?",
        )
        .bind(loan_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))
    }

    /// Create a loan against a book with available copies.
    ///
    /// The loan insert and the quantity decrement run in one transaction so
    /// neither persists without the other. The date defaults to today when
    /// not supplied.
    pub async fn create(
        &self,
        book_id: i64,
        borrower: &str,
        loan_date: Option<NaiveDate>,
    ) -> AppResult<i64> {
        let loan_date = loan_date.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.pool.begin().await?;

        let qty = sqlx::query_scalar::<_, i64>("SELECT qty FROM books WHERE id = ?")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if qty <= 0 {
            return Err(AppError::Unavailable(format!(
                "No copies of book {} on hand",
                book_id
            )));
        }

        let loan_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO loans (book_id, borrower, loan_date) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(book_id)
        .bind(borrower)
        .bind(loan_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET qty = qty - 1 WHERE id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(loan_id, book_id, borrower, "loan created");

        Ok(loan_id)
    }

    /// Mark a loan returned and restore the book's quantity.
    ///
    /// Returning an already-returned loan is rejected; it would otherwise
    /// double-increment the quantity. The date defaults to today.
    pub async fn return_loan(
        &self,
        loan_id: i64,
        return_date: Option<NaiveDate>,
    ) -> AppResult<()> {
        let return_date = return_date.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            "SELECT id, book_id, borrower, loan_date, return_date FROM loans WHERE id = ?",
        )
        .bind(loan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        if loan.return_date.is_some() {
            return Err(AppError::Conflict(format!(
                "Loan {} already returned",
                loan_id
            )));
        }

        sqlx::query("UPDATE loans SET return_date = ? WHERE id = ?")
            .bind(return_date)
            .bind(loan_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE books SET qty = qty + 1 WHERE id = ?")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(loan_id, book_id = loan.book_id, "loan returned");

        Ok(())
    }

    /// Partially update a loan.
    ///
    /// A supplied `return_date` goes through the full return path (quantity
    /// restored, double-return rejected); `borrower` is a plain correction.
    pub async fn update(&self, loan_id: i64, changes: &UpdateLoan) -> AppResult<()> {
        if changes.return_date.is_some() {
            self.return_loan(loan_id, changes.return_date).await?;
        }

        if let Some(ref borrower) = changes.borrower {
            sqlx::query("UPDATE loans SET borrower = ? WHERE id = ?")
                .bind(borrower)
                .bind(loan_id)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    /// Delete a loan row. Book quantity is not adjusted; restoration only
    /// happens through `return_loan`.
    pub async fn delete(&self, loan_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM loans WHERE id = ?")
            .bind(loan_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
