use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LooseNumber;
use crate::utils;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WithdrawRequest {
    pub id: String,
    pub amount: f64,
    pub method: String,
    pub date: String,
    pub approved: bool,
}

impl WithdrawRequest {
    pub fn new(amount: f64, method: String) -> Self {
        WithdrawRequest {
            id: Uuid::new_v4().to_string(),
            amount,
            method,
            date: utils::now_iso(),
            approved: false,
        }
    }

    /// Display status derived from the approval flag, never stored.
    pub fn status(&self) -> &'static str {
        if self.approved {
            "approved"
        } else {
            "pending"
        }
    }
}

/// One row of the admin listing: a request annotated with its owner.
#[derive(Clone, Debug, Serialize)]
pub struct WithdrawalOverview {
    pub id: String,
    pub email: String,
    pub username: String,
    pub amount: f64,
    pub method: String,
    pub date: String,
    pub status: String,
    pub approved: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewWithdrawal {
    pub email: Option<String>,
    pub amount: Option<LooseNumber>,
    pub method: Option<String>,
}

/// Wire-level reference to an existing request: owner plus creation date.
#[derive(Clone, Debug, Deserialize)]
pub struct RequestRef {
    pub email: Option<String>,
    pub date: Option<String>,
}
