use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::oneshot;

use crate::models::accounts::{
    AccountId, ActivityReport, LoginAttempt, NewAccount, ScreenTimeReport,
};
use crate::services::accounts::AccountRequest;

use super::{error_response, internal_error, AppState};

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<NewAccount>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .account_channel
        .send(AccountRequest::Signup {
            username: req.username,
            email: req.email,
            password: req.password,
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Signup successful!" })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginAttempt>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .account_channel
        .send(AccountRequest::Login {
            email: req.email,
            password: req.password,
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(outcome)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful!",
                "username": outcome.username,
                "lastLogin": outcome.last_login,
            })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn record_earnings(
    State(state): State<AppState>,
    Json(req): Json<ActivityReport>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();
    let amount = req.earnings_earned.and_then(|value| value.as_f64());

    let sent = state
        .account_channel
        .send(AccountRequest::RecordEarnings {
            id: AccountId::new(req.email.unwrap_or_default()),
            amount,
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(total)) => (
            StatusCode::OK,
            Json(json!({ "message": "Earnings updated!", "totalEarnings": total })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn record_screen_time(
    State(state): State<AppState>,
    Json(req): Json<ScreenTimeReport>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();
    let amount = req.time_spent.and_then(|value| value.as_f64());

    let sent = state
        .account_channel
        .send(AccountRequest::RecordScreenTime {
            id: AccountId::new(req.email.unwrap_or_default()),
            amount,
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(total)) => (
            StatusCode::OK,
            Json(json!({ "message": "Screen time updated!", "totalScreenTime": total })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .account_channel
        .send(AccountRequest::GetProfile {
            id: AccountId::new(email),
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(profile)) => (StatusCode::OK, Json(json!(profile))),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}
