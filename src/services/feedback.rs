use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{RequestHandler, Service, ServiceError};
use crate::models::feedback::FeedbackEntry;
use crate::repositories::feedback::FeedbackRepository;

pub enum FeedbackServiceRequest {
    Submit {
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    ListAll {
        response: oneshot::Sender<Vec<FeedbackEntry>>,
    },
}

#[derive(Clone)]
pub struct FeedbackRequestHandler {
    repository: FeedbackRepository,
}

impl FeedbackRequestHandler {
    pub fn new(repository: FeedbackRepository) -> Self {
        FeedbackRequestHandler { repository }
    }

    async fn submit(
        &self,
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<(), ServiceError> {
        let (name, email, message) = match (name, email, message) {
            (Some(name), Some(email), Some(message))
                if !name.is_empty() && !email.is_empty() && !message.is_empty() =>
            {
                (name, email, message)
            }
            _ => {
                return Err(ServiceError::InvalidInput(
                    "Name, email, and message are required.".to_string(),
                ))
            }
        };

        self.repository
            .append(FeedbackEntry::new(name, email, message))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RequestHandler<FeedbackServiceRequest> for FeedbackRequestHandler {
    async fn handle_request(&mut self, request: FeedbackServiceRequest) {
        match request {
            FeedbackServiceRequest::Submit {
                name,
                email,
                message,
                response,
            } => {
                let result = self.submit(name, email, message).await;
                let _ = response.send(result);
            }
            FeedbackServiceRequest::ListAll { response } => {
                let entries = self.repository.list().await;
                let _ = response.send(entries);
            }
        }
    }
}

pub struct FeedbackService;

impl FeedbackService {
    pub fn new() -> Self {
        FeedbackService {}
    }
}

#[async_trait]
impl Service<FeedbackServiceRequest, FeedbackRequestHandler> for FeedbackService {}
