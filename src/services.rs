use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::repositories::accounts::AccountRepository;
use crate::repositories::feedback::FeedbackRepository;
use crate::repositories::store::JsonStore;
use crate::repositories::RepositoryError;
use crate::settings::Settings;

pub mod accounts;
pub mod feedback;
pub mod http;
pub mod withdrawals;

/// Request-level failures, carrying the exact message the client sees.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AccountNotFound => {
                ServiceError::NotFound("User not found.".to_string())
            }
            RepositoryError::AccountExists => {
                ServiceError::Conflict("User already exists.".to_string())
            }
            RepositoryError::InsufficientEarnings => {
                ServiceError::InvalidInput("Invalid withdrawal amount.".to_string())
            }
            RepositoryError::PendingRequestNotFound => {
                ServiceError::NotFound("Pending request not found.".to_string())
            }
            RepositoryError::RequestNotFound => {
                ServiceError::NotFound("Request not found.".to_string())
            }
            RepositoryError::AlreadyApproved => {
                ServiceError::Conflict("Request already approved.".to_string())
            }
            RepositoryError::Io(_) | RepositoryError::Encoding(_) => {
                ServiceError::Storage(err.to_string())
            }
        }
    }
}

#[async_trait]
pub trait RequestHandler<T>: Send + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&mut self, request: T);
}

/// Store-owning services drain their queue one request at a time: a request
/// runs to completion (validate, mutate, flush, respond) before the next one
/// is picked up.
#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T>,
{
    async fn run(&mut self, mut handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            handler.handle_request(request).await;
        }
    }
}

pub async fn start_services(settings: Settings) -> Result<(), anyhow::Error> {
    let account_repository =
        AccountRepository::open(JsonStore::open(&settings.storage.accounts_path)).await?;
    let feedback_repository =
        FeedbackRepository::open(JsonStore::open(&settings.storage.feedbacks_path)).await?;

    let (account_tx, mut account_rx) = mpsc::channel(512);
    let (withdrawal_tx, mut withdrawal_rx) = mpsc::channel(512);
    let (feedback_tx, mut feedback_rx) = mpsc::channel(512);

    log::info!("Starting account service.");
    let mut account_service = accounts::AccountService::new();
    let account_repo = account_repository.clone();
    tokio::spawn(async move {
        account_service
            .run(
                accounts::AccountRequestHandler::new(account_repo),
                &mut account_rx,
            )
            .await;
    });

    log::info!("Starting withdrawal service.");
    let mut withdrawal_service = withdrawals::WithdrawalService::new();
    let withdrawal_repo = account_repository.clone();
    tokio::spawn(async move {
        withdrawal_service
            .run(
                withdrawals::WithdrawalRequestHandler::new(withdrawal_repo),
                &mut withdrawal_rx,
            )
            .await;
    });

    log::info!("Starting feedback service.");
    let mut feedback_service = feedback::FeedbackService::new();
    tokio::spawn(async move {
        feedback_service
            .run(
                feedback::FeedbackRequestHandler::new(feedback_repository),
                &mut feedback_rx,
            )
            .await;
    });

    log::info!("Starting HTTP server.");
    http::start_http_server(&settings.server, account_tx, withdrawal_tx, feedback_tx).await
}
