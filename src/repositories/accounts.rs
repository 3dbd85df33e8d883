use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::Mutex;

use super::store::JsonStore;
use super::RepositoryError;
use crate::models::accounts::{Account, Credential, LoginOutcome, Profile};
use crate::models::withdrawals::{WithdrawRequest, WithdrawalOverview};
use crate::utils;

/// Owns the email → account map and its backing document. Every mutating
/// operation holds the state lock across both the mutation and the flush, so
/// a successful return means the change is on disk and no caller observes a
/// half-applied mutation.
#[derive(Clone)]
pub struct AccountRepository {
    accounts: Arc<Mutex<IndexMap<String, Account>>>,
    store: JsonStore,
}

impl AccountRepository {
    pub async fn open(store: JsonStore) -> Result<Self, RepositoryError> {
        let accounts = store.load().await?;

        Ok(AccountRepository {
            accounts: Arc::new(Mutex::new(accounts)),
            store,
        })
    }

    pub async fn contains(&self, email: &str) -> bool {
        self.accounts.lock().await.contains_key(email)
    }

    pub async fn insert_account(
        &self,
        email: &str,
        username: String,
        credential: Credential,
    ) -> Result<(), RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(email) {
            return Err(RepositoryError::AccountExists);
        }

        accounts.insert(email.to_string(), Account::new(username, credential));
        self.store.flush(&*accounts).await
    }

    pub async fn credential(&self, email: &str) -> Result<Credential, RepositoryError> {
        let accounts = self.accounts.lock().await;
        let account = accounts.get(email).ok_or(RepositoryError::AccountNotFound)?;

        Ok(account.credential.clone())
    }

    pub async fn record_login(&self, email: &str) -> Result<LoginOutcome, RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(email)
            .ok_or(RepositoryError::AccountNotFound)?;

        let stamp = utils::now_iso();
        account.last_login = Some(stamp.clone());
        let username = account.username.clone();
        self.store.flush(&*accounts).await?;

        Ok(LoginOutcome {
            username,
            last_login: stamp,
        })
    }

    pub async fn add_earnings(&self, email: &str, amount: f64) -> Result<f64, RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(email)
            .ok_or(RepositoryError::AccountNotFound)?;

        account.earnings += amount;
        let total = account.earnings;
        self.store.flush(&*accounts).await?;

        Ok(total)
    }

    pub async fn add_screen_time(&self, email: &str, amount: f64) -> Result<f64, RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(email)
            .ok_or(RepositoryError::AccountNotFound)?;

        account.screen_time += amount;
        let total = account.screen_time;
        self.store.flush(&*accounts).await?;

        Ok(total)
    }

    pub async fn profile(&self, email: &str) -> Result<Profile, RepositoryError> {
        let accounts = self.accounts.lock().await;
        let account = accounts.get(email).ok_or(RepositoryError::AccountNotFound)?;

        Ok(Profile {
            email: email.to_string(),
            username: account.username.clone(),
            earnings: account.earnings,
            screen_time: account.screen_time,
            withdraw_requests: account.withdraw_requests.clone(),
            last_login: account.last_login.clone(),
        })
    }

    /// Debit and append happen under one lock hold; the requested amount is
    /// held in reserve until the request is cancelled or approved, and
    /// earnings can never go below zero.
    pub async fn push_withdrawal(
        &self,
        email: &str,
        amount: f64,
        method: String,
    ) -> Result<WithdrawRequest, RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(email)
            .ok_or(RepositoryError::AccountNotFound)?;

        if amount > account.earnings {
            return Err(RepositoryError::InsufficientEarnings);
        }

        let request = WithdrawRequest::new(amount, method);
        account.earnings -= amount;
        account.withdraw_requests.push(request.clone());
        self.store.flush(&*accounts).await?;

        Ok(request)
    }

    /// Only a pending request can be cancelled; an approved one is
    /// indistinguishable from a missing one here.
    pub async fn cancel_withdrawal(
        &self,
        email: &str,
        date: &str,
    ) -> Result<WithdrawRequest, RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(email)
            .ok_or(RepositoryError::AccountNotFound)?;

        let index = account
            .withdraw_requests
            .iter()
            .position(|request| request.date == date && !request.approved)
            .ok_or(RepositoryError::PendingRequestNotFound)?;

        let removed = account.withdraw_requests.remove(index);
        account.earnings += removed.amount;
        self.store.flush(&*accounts).await?;

        Ok(removed)
    }

    /// Approval is terminal: the flag only ever flips false → true, and the
    /// balance is untouched since the amount was debited at request time.
    pub async fn approve_withdrawal(
        &self,
        email: &str,
        date: &str,
    ) -> Result<WithdrawRequest, RepositoryError> {
        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .get_mut(email)
            .ok_or(RepositoryError::AccountNotFound)?;

        let request = account
            .withdraw_requests
            .iter_mut()
            .find(|request| request.date == date)
            .ok_or(RepositoryError::RequestNotFound)?;

        if request.approved {
            return Err(RepositoryError::AlreadyApproved);
        }

        request.approved = true;
        let approved = request.clone();
        self.store.flush(&*accounts).await?;

        Ok(approved)
    }

    pub async fn withdrawals_for(&self, email: &str) -> Result<Vec<WithdrawRequest>, RepositoryError> {
        let accounts = self.accounts.lock().await;
        let account = accounts.get(email).ok_or(RepositoryError::AccountNotFound)?;

        Ok(account.withdraw_requests.clone())
    }

    /// Flattened across all accounts: accounts in insertion order, requests
    /// within an account in insertion order.
    pub async fn all_withdrawals(&self) -> Vec<WithdrawalOverview> {
        let accounts = self.accounts.lock().await;

        let mut rows = Vec::new();
        for (email, account) in accounts.iter() {
            for request in &account.withdraw_requests {
                rows.push(WithdrawalOverview {
                    id: request.id.clone(),
                    email: email.clone(),
                    username: account.username.clone(),
                    amount: request.amount,
                    method: request.method.clone(),
                    date: request.date.clone(),
                    status: request.status().to_string(),
                    approved: request.approved,
                });
            }
        }

        rows
    }
}
