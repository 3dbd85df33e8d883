pub mod accounts;
pub mod feedback;
pub mod store;

/// Failures raised by store operations. The first six are business rules;
/// `Io` and `Encoding` cover the load/flush path.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("account not found")]
    AccountNotFound,
    #[error("account already exists")]
    AccountExists,
    #[error("amount exceeds available earnings")]
    InsufficientEarnings,
    #[error("no pending request under that date")]
    PendingRequestNotFound,
    #[error("no request under that date")]
    RequestNotFound,
    #[error("request already approved")]
    AlreadyApproved,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encoding(#[from] serde_json::Error),
}
