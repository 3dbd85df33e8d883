use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tokio::sync::oneshot;

use crate::models::feedback::NewFeedback;
use crate::services::feedback::FeedbackServiceRequest;

use super::{error_response, internal_error, AppState};

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<NewFeedback>,
) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .feedback_channel
        .send(FeedbackServiceRequest::Submit {
            name: req.name,
            email: req.email,
            message: req.message,
            response: tx,
        })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(json!({ "message": "Feedback submitted. Thank you!" })),
        ),
        Ok(Err(err)) => error_response(err),
        Err(_) => internal_error(),
    }
}

pub async fn list_all(State(state): State<AppState>) -> impl IntoResponse {
    let (tx, rx) = oneshot::channel();

    let sent = state
        .feedback_channel
        .send(FeedbackServiceRequest::ListAll { response: tx })
        .await;
    if sent.is_err() {
        return internal_error();
    }

    match rx.await {
        Ok(entries) => (StatusCode::OK, Json(json!(entries))),
        Err(_) => internal_error(),
    }
}
