//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::UpdateLoan,
};

use super::{Json, OkResponse};

/// Create loan request
#[derive(Deserialize)]
pub struct CreateLoanRequest {
    pub book_id: Option<i64>,
    pub borrower: Option<String>,
}

#[derive(Serialize)]
pub struct CreateLoanResponse {
    pub loan_id: i64,
}

/// Return loan request
#[derive(Deserialize)]
pub struct ReturnLoanRequest {
    pub loan_id: Option<i64>,
}

/// Partial loan update request
#[derive(Deserialize)]
pub struct UpdateLoanRequest {
    pub return_date: Option<NaiveDate>,
    pub borrower: Option<String>,
}

/// Loan a book to a borrower, dated today
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoanRequest>,
) -> AppResult<(StatusCode, Json<CreateLoanResponse>)> {
    let book_id = request
        .book_id
        .ok_or_else(|| AppError::Validation("book_id and borrower required".to_string()))?;
    let borrower = request
        .borrower
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("book_id and borrower required".to_string()))?;

    let loan_id = state.repository.loans.create(book_id, &borrower, None).await?;

    Ok((StatusCode::CREATED, Json(CreateLoanResponse { loan_id })))
}

/// Mark a loan returned, dated today
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<ReturnLoanRequest>,
) -> AppResult<Json<OkResponse>> {
    let loan_id = request
        .loan_id
        .ok_or_else(|| AppError::Validation("loan_id required".to_string()))?;

    state.repository.loans.return_loan(loan_id, None).await?;

    Ok(Json(OkResponse::new()))
}

/// Partially update a loan (explicit return date and/or borrower correction)
pub async fn update_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i64>,
    Json(request): Json<UpdateLoanRequest>,
) -> AppResult<Json<OkResponse>> {
    let changes = UpdateLoan {
        return_date: request.return_date,
        borrower: request.borrower,
    };

    state.repository.loans.update(loan_id, &changes).await?;

    Ok(Json(OkResponse::new()))
}

/// Delete a loan row without adjusting book quantity. Idempotent.
pub async fn delete_loan(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    state.repository.loans.delete(loan_id).await?;

    Ok(Json(OkResponse::new()))
}
