//! Books repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::{Book, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: SqlitePool,
}

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up an author by exact name, creating the row if absent.
    ///
    /// Idempotent: calling twice with the same name returns the same id and
    /// never creates a duplicate (the name column is UNIQUE).
    pub async fn resolve_author(&self, name: &str) -> AppResult<i64> {
        sqlx::query("INSERT OR IGNORE INTO authors (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM authors WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    /// Add a book, resolving (or creating) its author by name.
    ///
    /// Quantity is taken as supplied; availability is only enforced at loan
    /// time.
    pub async fn create(&self, title: &str, author_name: &str, qty: i64) -> AppResult<i64> {
        let author_id = self.resolve_author(author_name).await?;

        let book_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO books (title, author_id, qty) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(title)
        .bind(author_id)
        .bind(qty)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(book_id, title, "book created");

        Ok(book_id)
    }

    /// Partially update a book's title, author and/or quantity.
    ///
    /// Any subset of fields may be supplied; supplying none is a no-op. A new
    /// author name is resolved (created if missing) and the reference
    /// repointed.
    pub async fn update(&self, book_id: i64, changes: &UpdateBook) -> AppResult<()> {
        let mut sets: Vec<&str> = Vec::new();
        let mut author_id: Option<i64> = None;

        if changes.title.is_some() {
            sets.push("title = ?");
        }
        if let Some(ref name) = changes.author {
            author_id = Some(self.resolve_author(name).await?);
            sets.push("author_id = ?");
        }
        if changes.qty.is_some() {
            sets.push("qty = ?");
        }
        if sets.is_empty() {
            return Ok(());
        }

        let sql = format!("UPDATE books SET {} WHERE id = ?", sets.join(", "));
        let mut query = sqlx::query(&sql);
        if let Some(ref title) = changes.title {
            query = query.bind(title);
        }
        if let Some(id) = author_id {
            query = query.bind(id);
        }
        if let Some(qty) = changes.qty {
            query = query.bind(qty);
        }
        query.bind(book_id).execute(&self.pool).await?;

        Ok(())
    }

    /// Delete a book; its loans are removed by the cascade.
    ///
    /// Idempotent: deleting a nonexistent id is not an error.
    pub async fn delete(&self, book_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List books joined with their author's name, in insertion order,
    /// optionally filtered by a substring match on the title.
    pub async fn list(&self, title_filter: Option<&str>) -> AppResult<Vec<Book>> {
        let books = match title_filter {
            Some(filter) => {
                sqlx::query_as::<_, Book>(
                    r#"
                    SELECT b.id, b.title, a.name AS author, b.qty
                    FROM books b
                    JOIN authors a ON a.id = b.author_id
                    WHERE b.title LIKE ?
                    ORDER BY b.id
                    "#,
                )
                .bind(format!("%{}%", filter))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Book>(
                    r#"
                    SELECT b.id, b.title, a.name AS author, b.qty
                    FROM books b
                    JOIN authors a ON a.id = b.author_id
                    ORDER BY b.id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(books)
    }
}
