use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::accounts::AccountRequest;
use super::feedback::FeedbackServiceRequest;
use super::withdrawals::WithdrawalServiceRequest;
use super::ServiceError;
use crate::settings::Server;

mod accounts;
mod feedback;
mod withdrawals;

#[derive(Clone)]
struct AppState {
    account_channel: mpsc::Sender<AccountRequest>,
    withdrawal_channel: mpsc::Sender<WithdrawalServiceRequest>,
    feedback_channel: mpsc::Sender<FeedbackServiceRequest>,
}

fn error_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        ServiceError::InvalidInput(_) | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("{}", err);
        return internal_error();
    }

    (status, Json(json!({ "message": err.to_string() })))
}

fn internal_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error." })),
    )
}

pub async fn start_http_server(
    server: &Server,
    account_channel: mpsc::Sender<AccountRequest>,
    withdrawal_channel: mpsc::Sender<WithdrawalServiceRequest>,
    feedback_channel: mpsc::Sender<FeedbackServiceRequest>,
) -> Result<(), anyhow::Error> {
    let app_state = AppState {
        account_channel,
        withdrawal_channel,
        feedback_channel,
    };

    let app = Router::new()
        .route("/signup", post(accounts::signup))
        .route("/login", post(accounts::login))
        .route("/activity", post(accounts::record_earnings))
        .route("/screentime", post(accounts::record_screen_time))
        .route("/submit-feedback", post(feedback::submit))
        .route("/admin/feedbacks", get(feedback::list_all))
        .route("/withdraw", post(withdrawals::submit))
        .route("/user/withdraw/cancel", post(withdrawals::cancel))
        .route("/admin/withdrawals", get(withdrawals::list_all))
        .route("/admin/approve", post(withdrawals::approve))
        .route("/user/{email}/withdrawals", get(withdrawals::list_for_account))
        .route("/user/{email}", get(accounts::profile))
        .route("/health", get(|| async { "OK" }))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", server.host, server.port)).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
