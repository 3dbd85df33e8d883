use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use crate::models::accounts::AccountId;
use crate::models::withdrawals::{NewWithdrawal, RequestRef};
use crate::services::withdrawals::WithdrawalServiceRequest;

use super::{error_response, internal_error, AppState};

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<NewWithdrawal>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();
    let amount = req.amount.and_then(|value| value.as_f64());

    let sent = state
        .withdrawal_channel
        .send(WithdrawalServiceRequest::Submit {
            id: AccountId::new(req.email.unwrap_or_default()),
            amount,
            method: req.method.unwrap_or_default(),
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({ "message": "Withdrawal request submitted!" })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn cancel(
    State(state): State<AppState>,
    Json(req): Json<RequestRef>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .withdrawal_channel
        .send(WithdrawalServiceRequest::Cancel {
            id: AccountId::new(req.email.unwrap_or_default()),
            date: req.date.unwrap_or_default(),
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({ "message": "Withdrawal request cancelled." })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn approve(
    State(state): State<AppState>,
    Json(req): Json<RequestRef>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .withdrawal_channel
        .send(WithdrawalServiceRequest::Approve {
            email: req.email.unwrap_or_default(),
            date: req.date.unwrap_or_default(),
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({ "message": "Withdrawal approved." })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn list_for_account(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .withdrawal_channel
        .send(WithdrawalServiceRequest::ListForAccount {
            id: AccountId::new(email),
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(requests)) => (StatusCode::OK, Json(json!(requests))),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn list_all(State(state): State<AppState>) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .withdrawal_channel
        .send(WithdrawalServiceRequest::ListAll { response: tx })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(rows) => (StatusCode::OK, Json(json!(rows))),
        Err(_) => internal_error(),
    }
}
