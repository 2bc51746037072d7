//! HTTP API tests driving the real router over an in-memory database

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use libris::{api, config::AppConfig, db, repository::Repository, AppState};

async fn app() -> Router {
    let pool = db::connect_in_memory().await.unwrap();
    db::ensure_schema(&pool).await.unwrap();

    let state = AppState {
        config: Arc::new(AppConfig::default()),
        repository: Repository::new(pool),
    };

    api::create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_book(app: &Router, title: &str, author: &str, qty: i64) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/books",
            json!({"title": title, "author": author, "qty": qty}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["book_id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_check() {
    let app = app().await;

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn list_books_starts_empty() {
    let app = app().await;

    let response = app.oneshot(get("/api/books")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_and_list_books() {
    let app = app().await;
    let id = create_book(&app, "Dune", "Frank Herbert", 2).await;

    let response = app.oneshot(get("/api/books")).await.unwrap();
    let body = body_json(response).await;

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"].as_i64().unwrap(), id);
    assert_eq!(body[0]["title"], "Dune");
    assert_eq!(body[0]["author"], "Frank Herbert");
    assert_eq!(body[0]["qty"], 2);
}

#[tokio::test]
async fn create_book_requires_title_and_author() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/books", json!({"title": "Dune"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("title and author"));
}

#[tokio::test]
async fn create_book_rejects_wrong_typed_qty() {
    let app = app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/books",
            json!({"title": "Dune", "author": "Frank Herbert", "qty": "three"}),
        ))
        .await
        .unwrap();
    // Wrong-typed fields are validation failures, not framework 422s
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_book_rejects_malformed_json() {
    let app = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/books")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_book_rejects_non_positive_qty() {
    let app = app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/books",
            json!({"title": "Dune", "author": "Frank Herbert", "qty": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("positive"));
}

#[tokio::test]
async fn patch_book_applies_partial_update() {
    let app = app().await;
    let id = create_book(&app, "Duen", "Frank Herbert", 1).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/books/{}", id),
            json!({"title": "Dune", "qty": 4}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let body = body_json(app.oneshot(get("/api/books")).await.unwrap()).await;
    assert_eq!(body[0]["title"], "Dune");
    assert_eq!(body[0]["qty"], 4);
    assert_eq!(body[0]["author"], "Frank Herbert");
}

#[tokio::test]
async fn delete_book_is_idempotent() {
    let app = app().await;
    let id = create_book(&app, "Dune", "Frank Herbert", 1).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/books/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting a nonexistent id is not an error
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/books/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn loan_and_return_flow() {
    let app = app().await;
    let id = create_book(&app, "Dune", "Frank Herbert", 1).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/loan",
            json!({"book_id": id, "borrower": "Sam"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let loan_id = body_json(response).await["loan_id"].as_i64().unwrap();

    // No copies left
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/loan",
            json!({"book_id": id, "borrower": "Ann"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("No copies"));

    // Return restores the copy
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/return", json!({"loan_id": loan_id})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"ok": true}));

    let body = body_json(app.clone().oneshot(get("/api/books")).await.unwrap()).await;
    assert_eq!(body[0]["qty"], 1);

    // A second return of the same loan is rejected
    let response = app
        .oneshot(json_request("POST", "/api/return", json!({"loan_id": loan_id})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn loan_unknown_book_is_rejected() {
    let app = app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/loan",
            json!({"book_id": 999, "borrower": "Sam"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn loan_rejects_wrong_typed_book_id() {
    let app = app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/loan",
            json!({"book_id": "one", "borrower": "Sam"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn loan_requires_book_id_and_borrower() {
    let app = app().await;

    let response = app
        .oneshot(json_request("POST", "/api/loan", json!({"borrower": "Sam"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn return_unknown_loan_is_rejected() {
    let app = app().await;

    let response = app
        .oneshot(json_request("POST", "/api/return", json!({"loan_id": 7})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn patch_loan_corrects_borrower_and_sets_return_date() {
    let app = app().await;
    let id = create_book(&app, "Dune", "Frank Herbert", 1).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/loan",
            json!({"book_id": id, "borrower": "Smaug"}),
        ))
        .await
        .unwrap();
    let loan_id = body_json(response).await["loan_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/loans/{}", loan_id),
            json!({"borrower": "Sam", "return_date": "2025-04-02"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Return through PATCH restored the quantity
    let body = body_json(app.oneshot(get("/api/books")).await.unwrap()).await;
    assert_eq!(body[0]["qty"], 1);
}

#[tokio::test]
async fn delete_loan_keeps_quantity() {
    let app = app().await;
    let id = create_book(&app, "Dune", "Frank Herbert", 2).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/loan",
            json!({"book_id": id, "borrower": "Sam"}),
        ))
        .await
        .unwrap();
    let loan_id = body_json(response).await["loan_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/loans/{}", loan_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deletion does not restore the copy; only returns do
    let body = body_json(app.oneshot(get("/api/books")).await.unwrap()).await;
    assert_eq!(body[0]["qty"], 1);
}

#[tokio::test]
async fn stats_reports_totals_and_top_books() {
    let app = app().await;
    let a = create_book(&app, "Dune", "Frank Herbert", 3).await;
    let b = create_book(&app, "Learning SQL", "Alan Beaulieu", 2).await;

    for borrower in ["Sam", "Ann"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/loan",
                json!({"book_id": a, "borrower": borrower}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/loan",
            json!({"book_id": b, "borrower": "Kim"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_loans"], 3);
    assert_eq!(body["avg_loans_per_book"], 1.5);

    let top = body["top_books"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["book_id"].as_i64().unwrap(), a);
    assert_eq!(top[0]["times_loaned"], 2);
    assert_eq!(top[1]["times_loaned"], 1);
}

#[tokio::test]
async fn index_page_lists_books() {
    let app = app().await;
    create_book(&app, "Dune", "Frank Herbert", 2).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Dune"));
    assert!(html.contains("Frank Herbert"));
}
