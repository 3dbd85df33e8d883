use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{RequestHandler, Service, ServiceError};
use crate::models::accounts::{AccountId, Credential, LoginOutcome, Profile};
use crate::repositories::accounts::AccountRepository;

pub enum AccountRequest {
    Signup {
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
        response: oneshot::Sender<Result<(), ServiceError>>,
    },
    Login {
        email: Option<String>,
        password: Option<String>,
        response: oneshot::Sender<Result<LoginOutcome, ServiceError>>,
    },
    RecordEarnings {
        id: AccountId,
        amount: Option<f64>,
        response: oneshot::Sender<Result<f64, ServiceError>>,
    },
    RecordScreenTime {
        id: AccountId,
        amount: Option<f64>,
        response: oneshot::Sender<Result<f64, ServiceError>>,
    },
    GetProfile {
        id: AccountId,
        response: oneshot::Sender<Result<Profile, ServiceError>>,
    },
}

#[derive(Clone)]
pub struct AccountRequestHandler {
    repository: AccountRepository,
}

impl AccountRequestHandler {
    pub fn new(repository: AccountRepository) -> Self {
        AccountRequestHandler { repository }
    }

    async fn signup(
        &self,
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<(), ServiceError> {
        let (username, email, password) = match (username, email, password) {
            (Some(username), Some(email), Some(password))
                if !username.is_empty() && !email.is_empty() && !password.is_empty() =>
            {
                (username, email, password)
            }
            _ => {
                return Err(ServiceError::InvalidInput(
                    "Username, email, and password are required.".to_string(),
                ))
            }
        };

        let credential = Credential::from_password(&password);
        self.repository
            .insert_account(&email, username, credential)
            .await?;
        log::info!("Account created for {}.", email);

        Ok(())
    }

    async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<LoginOutcome, ServiceError> {
        // Unknown account and wrong password produce the same signal so the
        // endpoint cannot be used to enumerate emails.
        let rejected = || ServiceError::Unauthorized("Invalid credentials.".to_string());

        let email = email.ok_or_else(rejected)?;
        let password = password.unwrap_or_default();
        let credential = self
            .repository
            .credential(&email)
            .await
            .map_err(|_| rejected())?;
        if !credential.verify(&password) {
            return Err(rejected());
        }

        Ok(self.repository.record_login(&email).await?)
    }

    async fn record_earnings(
        &self,
        id: AccountId,
        amount: Option<f64>,
    ) -> Result<f64, ServiceError> {
        // Account lookup comes before amount validation: an unknown email is
        // a 404 even when the amount is junk.
        if !self.repository.contains(id.as_str()).await {
            return Err(ServiceError::NotFound("User not found.".to_string()));
        }

        let amount = amount
            .filter(|amount| *amount >= 0.0)
            .ok_or_else(|| ServiceError::InvalidInput("Invalid earnings value.".to_string()))?;

        Ok(self.repository.add_earnings(id.as_str(), amount).await?)
    }

    async fn record_screen_time(
        &self,
        id: AccountId,
        amount: Option<f64>,
    ) -> Result<f64, ServiceError> {
        if !self.repository.contains(id.as_str()).await {
            return Err(ServiceError::NotFound("User not found.".to_string()));
        }

        let amount = amount
            .filter(|amount| *amount >= 0.0)
            .ok_or_else(|| ServiceError::InvalidInput("Invalid time value.".to_string()))?;

        Ok(self.repository.add_screen_time(id.as_str(), amount).await?)
    }

    async fn profile(&self, id: AccountId) -> Result<Profile, ServiceError> {
        Ok(self.repository.profile(id.as_str()).await?)
    }
}

#[async_trait]
impl RequestHandler<AccountRequest> for AccountRequestHandler {
    async fn handle_request(&mut self, request: AccountRequest) {
        match request {
            AccountRequest::Signup {
                username,
                email,
                password,
                response,
            } => {
                let result = self.signup(username, email, password).await;
                let _ = response.send(result);
            }
            AccountRequest::Login {
                email,
                password,
                response,
            } => {
                let result = self.login(email, password).await;
                let _ = response.send(result);
            }
            AccountRequest::RecordEarnings {
                id,
                amount,
                response,
            } => {
                let result = self.record_earnings(id, amount).await;
                let _ = response.send(result);
            }
            AccountRequest::RecordScreenTime {
                id,
                amount,
                response,
            } => {
                let result = self.record_screen_time(id, amount).await;
                let _ = response.send(result);
            }
            AccountRequest::GetProfile { id, response } => {
                let result = self.profile(id).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct AccountService;

impl AccountService {
    pub fn new() -> Self {
        AccountService {}
    }
}

#[async_trait]
impl Service<AccountRequest, AccountRequestHandler> for AccountService {}
