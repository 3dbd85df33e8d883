use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FeedbackEntry {
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: String,
}

impl FeedbackEntry {
    pub fn new(name: String, email: String, message: String) -> Self {
        FeedbackEntry {
            name,
            email,
            message,
            date: utils::now_iso(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewFeedback {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}
