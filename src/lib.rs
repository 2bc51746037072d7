//! Libris Library Catalog Manager
//!
//! A small catalog manager for a lending library: books, authors, and loan
//! transactions in an embedded SQLite store, exposed through a CLI and an
//! HTTP/JSON API over the same data-access layer.

use std::sync::Arc;

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
}
