//! Sample data for demos and manual testing

use chrono::NaiveDate;

use crate::{error::AppResult, repository::Repository};

/// Populate the catalog with a few books and loans.
///
/// Loan dates are spread across 2024-2025 so the date-range report has
/// something to filter.
pub async fn seed(repository: &Repository) -> AppResult<()> {
    let hp = repository
        .books
        .create("Harry Potter and the Philosopher's Stone", "J. K. Rowling", 3)
        .await?;
    let dune = repository.books.create("Dune", "Frank Herbert", 2).await?;
    let sql = repository
        .books
        .create("Learning SQL", "Alan Beaulieu", 1)
        .await?;

    repository
        .loans
        .create(dune, "Sam", NaiveDate::from_ymd_opt(2024, 11, 5))
        .await?;
    repository
        .loans
        .create(hp, "Riley", NaiveDate::from_ymd_opt(2025, 2, 10))
        .await?;
    repository
        .loans
        .create(hp, "Taylor", NaiveDate::from_ymd_opt(2025, 6, 1))
        .await?;
    repository
        .loans
        .create(sql, "Jordan", NaiveDate::from_ymd_opt(2025, 7, 20))
        .await?;

    Ok(())
}
