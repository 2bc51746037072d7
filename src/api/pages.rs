//! Server-rendered pages

use axum::{extract::State, response::Html};
use std::fmt::Write;

use crate::error::AppResult;

/// Minimal HTML escaping for text nodes
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Landing page listing the catalog
pub async fn index(State(state): State<crate::AppState>) -> AppResult<Html<String>> {
    let books = state.repository.books.list(None).await?;

    let mut rows = String::new();
    for book in &books {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            book.id,
            escape(&book.title),
            escape(&book.author),
            book.qty
        );
    }

    let page = format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Libris</title></head>
<body>
<h1>Library Catalog</h1>
<table border="1" cellpadding="4">
<tr><th>ID</th><th>Title</th><th>Author</th><th>Qty</th></tr>
{rows}
</table>
</body>
</html>"#
    );

    Ok(Html(page))
}
