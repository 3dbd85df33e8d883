use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{RequestHandler, Service, ServiceError};
use crate::models::accounts::AccountId;
use crate::models::withdrawals::{WithdrawRequest, WithdrawalOverview};
use crate::repositories::accounts::AccountRepository;

pub enum WithdrawalServiceRequest {
    Submit {
        id: AccountId,
        amount: Option<f64>,
        method: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    Cancel {
        id: AccountId,
        date: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    Approve {
        email: String,
        date: String,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    ListForAccount {
        id: AccountId,
        response: oneshot::Sender<Result<Vec<WithdrawRequest>, ServiceError>>,
    },
    ListAll {
        response: oneshot::Sender<Vec<WithdrawalOverview>>,
    },
}

#[derive(Clone)]
pub struct WithdrawalRequestHandler {
    repository: AccountRepository,
}

impl WithdrawalRequestHandler {
    pub fn new(repository: AccountRepository) -> Self {
        WithdrawalRequestHandler { repository }
    }

    async fn submit(
        &self,
        id: AccountId,
        amount: Option<f64>,
        method: String,
    ) -> Result<(), ServiceError> {
        // Account lookup comes before amount validation, same order as the
        // accrual endpoints.
        if !self.repository.contains(id.as_str()).await {
            return Err(ServiceError::NotFound("User not found.".to_string()));
        }

        let amount = amount
            .filter(|amount| *amount > 0.0)
            .ok_or_else(|| ServiceError::InvalidInput("Invalid withdrawal amount.".to_string()))?;

        let request = self
            .repository
            .push_withdrawal(id.as_str(), amount, method)
            .await?;
        log::info!(
            "Withdrawal of {} requested by {} ({}).",
            request.amount,
            id.as_str(),
            request.id
        );

        Ok(())
    }

    async fn cancel(&self, id: AccountId, date: String) -> Result<(), ServiceError> {
        let removed = self.repository.cancel_withdrawal(id.as_str(), &date).await?;
        log::info!(
            "Withdrawal {} cancelled, {} credited back to {}.",
            removed.id,
            removed.amount,
            id.as_str()
        );

        Ok(())
    }

    async fn approve(&self, email: String, date: String) -> Result<(), ServiceError> {
        let approved = self.repository.approve_withdrawal(&email, &date).await?;
        log::info!("Withdrawal {} for {} approved.", approved.id, email);

        Ok(())
    }

    async fn list_for_account(&self, id: AccountId) -> Result<Vec<WithdrawRequest>, ServiceError> {
        Ok(self.repository.withdrawals_for(id.as_str()).await?)
    }

    async fn list_all(&self) -> Vec<WithdrawalOverview> {
        self.repository.all_withdrawals().await
    }
}

#[async_trait]
impl RequestHandler<WithdrawalServiceRequest> for WithdrawalRequestHandler {
    async fn handle_request(&mut self, request: WithdrawalServiceRequest) {
        match request {
            WithdrawalServiceRequest::Submit {
                id,
                amount,
                method,
                response,
            } => {
                let result = self.submit(id, amount, method).await;
                let _ = response.send(result);
            }
            WithdrawalServiceRequest::Cancel { id, date, response } => {
                let result = self.cancel(id, date).await;
                let _ = response.send(result);
            }
            WithdrawalServiceRequest::Approve {
                email,
                date,
                response,
            } => {
                let result = self.approve(email, date).await;
                let _ = response.send(result);
            }
            WithdrawalServiceRequest::ListForAccount { id, response } => {
                let result = self.list_for_account(id).await;
                let _ = response.send(result);
            }
            WithdrawalServiceRequest::ListAll { response } => {
                let rows = self.list_all().await;
                let _ = response.send(rows);
            }
        }
    }
}

pub struct WithdrawalService;

impl WithdrawalService {
    pub fn new() -> Self {
        WithdrawalService {}
    }
}

#[async_trait]
impl Service<WithdrawalServiceRequest, WithdrawalRequestHandler> for WithdrawalService {}
