use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::LooseNumber;
use crate::models::withdrawals::WithdrawRequest;

/// Identity of the account a request acts on. Constructed once at the
/// transport boundary; operations receive it instead of re-reading an email
/// out of each request body.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(email: impl Into<String>) -> Self {
        AccountId(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Salted SHA-256 password representation. The plaintext is dropped once the
/// hash is computed and is never persisted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Credential {
    pub salt: String,
    pub hash: String,
}

impl Credential {
    pub fn from_password(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let hash = hash_password(&salt, password);

        Credential { salt, hash }
    }

    pub fn verify(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.hash
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());

    format!("{:x}", hasher.finalize())
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    pub credential: Credential,
    pub earnings: f64,
    pub screen_time: f64,
    pub last_login: Option<String>,
    pub withdraw_requests: Vec<WithdrawRequest>,
}

impl Account {
    pub fn new(username: String, credential: Credential) -> Self {
        Account {
            username,
            credential,
            earnings: 0.0,
            screen_time: 0.0,
            last_login: None,
            withdraw_requests: Vec::new(),
        }
    }
}

/// Client-facing view of an account. Credential data stays out by
/// construction.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: String,
    pub username: String,
    pub earnings: f64,
    pub screen_time: f64,
    pub withdraw_requests: Vec<WithdrawRequest>,
    pub last_login: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoginOutcome {
    pub username: String,
    pub last_login: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAccount {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginAttempt {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ActivityReport {
    pub email: Option<String>,
    #[serde(rename = "earningsEarned")]
    pub earnings_earned: Option<LooseNumber>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScreenTimeReport {
    pub email: Option<String>,
    #[serde(rename = "timeSpent")]
    pub time_spent: Option<LooseNumber>,
}
