//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An author, created implicitly the first time a book names them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
}
