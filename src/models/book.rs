//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Book joined with its author's name, as returned by catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Copies currently on hand; decremented on loan, incremented on return.
    pub qty: i64,
}

/// Partial update for a book. `None` means "field not supplied"; an empty
/// change set is a no-op.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub qty: Option<i64>,
}
