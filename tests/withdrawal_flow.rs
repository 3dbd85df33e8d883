//! End-to-end exercises of the account and withdrawal services over their
//! request channels, backed by a throwaway JSON store.

use tokio::sync::oneshot;

use screenpay::models::accounts::{AccountId, LoginOutcome, Profile};
use screenpay::models::withdrawals::{WithdrawRequest, WithdrawalOverview};
use screenpay::repositories::accounts::AccountRepository;
use screenpay::repositories::store::JsonStore;
use screenpay::services::accounts::{AccountRequest, AccountRequestHandler};
use screenpay::services::withdrawals::{WithdrawalRequestHandler, WithdrawalServiceRequest};
use screenpay::services::{RequestHandler, ServiceError};

async fn handlers() -> (AccountRequestHandler, WithdrawalRequestHandler) {
    let path =
        std::env::temp_dir().join(format!("screenpay-flow-{}.json", uuid::Uuid::new_v4()));
    let repository = AccountRepository::open(JsonStore::open(path)).await.unwrap();

    (
        AccountRequestHandler::new(repository.clone()),
        WithdrawalRequestHandler::new(repository),
    )
}

async fn signup(
    accounts: &mut AccountRequestHandler,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ServiceError> {
    let (tx, rx) = oneshot::channel();
    accounts
        .handle_request(AccountRequest::Signup {
            username: Some(username.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn login(
    accounts: &mut AccountRequestHandler,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, ServiceError> {
    let (tx, rx) = oneshot::channel();
    accounts
        .handle_request(AccountRequest::Login {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn record_earnings(
    accounts: &mut AccountRequestHandler,
    email: &str,
    amount: f64,
) -> Result<f64, ServiceError> {
    let (tx, rx) = oneshot::channel();
    accounts
        .handle_request(AccountRequest::RecordEarnings {
            id: AccountId::new(email),
            amount: Some(amount),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn profile(
    accounts: &mut AccountRequestHandler,
    email: &str,
) -> Result<Profile, ServiceError> {
    let (tx, rx) = oneshot::channel();
    accounts
        .handle_request(AccountRequest::GetProfile {
            id: AccountId::new(email),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn submit_withdrawal(
    withdrawals: &mut WithdrawalRequestHandler,
    email: &str,
    amount: f64,
    method: &str,
) -> Result<(), ServiceError> {
    let (tx, rx) = oneshot::channel();
    withdrawals
        .handle_request(WithdrawalServiceRequest::Submit {
            id: AccountId::new(email),
            amount: Some(amount),
            method: method.to_string(),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn cancel_withdrawal(
    withdrawals: &mut WithdrawalRequestHandler,
    email: &str,
    date: &str,
) -> Result<(), ServiceError> {
    let (tx, rx) = oneshot::channel();
    withdrawals
        .handle_request(WithdrawalServiceRequest::Cancel {
            id: AccountId::new(email),
            date: date.to_string(),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn approve_withdrawal(
    withdrawals: &mut WithdrawalRequestHandler,
    email: &str,
    date: &str,
) -> Result<(), ServiceError> {
    let (tx, rx) = oneshot::channel();
    withdrawals
        .handle_request(WithdrawalServiceRequest::Approve {
            email: email.to_string(),
            date: date.to_string(),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn list_for_account(
    withdrawals: &mut WithdrawalRequestHandler,
    email: &str,
) -> Result<Vec<WithdrawRequest>, ServiceError> {
    let (tx, rx) = oneshot::channel();
    withdrawals
        .handle_request(WithdrawalServiceRequest::ListForAccount {
            id: AccountId::new(email),
            response: tx,
        })
        .await;
    rx.await.unwrap()
}

async fn list_all(withdrawals: &mut WithdrawalRequestHandler) -> Vec<WithdrawalOverview> {
    let (tx, rx) = oneshot::channel();
    withdrawals
        .handle_request(WithdrawalServiceRequest::ListAll { response: tx })
        .await;
    rx.await.unwrap()
}

#[tokio::test]
async fn test_full_withdrawal_lifecycle() {
    let (mut accounts, mut withdrawals) = handlers().await;

    signup(&mut accounts, "alice", "a@x.com", "pw1").await.unwrap();
    assert_eq!(
        record_earnings(&mut accounts, "a@x.com", 100.0).await.unwrap(),
        100.0
    );

    submit_withdrawal(&mut withdrawals, "a@x.com", 40.0, "bank")
        .await
        .unwrap();
    assert_eq!(profile(&mut accounts, "a@x.com").await.unwrap().earnings, 60.0);

    let pending = list_for_account(&mut withdrawals, "a@x.com").await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].amount, 40.0);
    assert!(!pending[0].approved);

    let date = pending[0].date.clone();
    approve_withdrawal(&mut withdrawals, "a@x.com", &date)
        .await
        .unwrap();

    // Approved requests are no longer cancellable, and the failed cancel
    // must not move the balance.
    let err = cancel_withdrawal(&mut withdrawals, "a@x.com", &date)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(err.to_string(), "Pending request not found.");
    assert_eq!(profile(&mut accounts, "a@x.com").await.unwrap().earnings, 60.0);

    let rows = list_all(&mut withdrawals).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, "a@x.com");
    assert_eq!(rows[0].username, "alice");
    assert_eq!(rows[0].status, "approved");
    assert!(rows[0].approved);
}

#[tokio::test]
async fn test_cancel_restores_the_pre_request_balance() {
    let (mut accounts, mut withdrawals) = handlers().await;

    signup(&mut accounts, "bob", "b@x.com", "pw").await.unwrap();
    record_earnings(&mut accounts, "b@x.com", 55.5).await.unwrap();

    submit_withdrawal(&mut withdrawals, "b@x.com", 12.25, "paypal")
        .await
        .unwrap();
    let pending = list_for_account(&mut withdrawals, "b@x.com").await.unwrap();
    cancel_withdrawal(&mut withdrawals, "b@x.com", &pending[0].date)
        .await
        .unwrap();

    let after = profile(&mut accounts, "b@x.com").await.unwrap();
    assert_eq!(after.earnings, 55.5);
    assert!(after.withdraw_requests.is_empty());
}

#[tokio::test]
async fn test_approve_is_idempotent_rejecting() {
    let (mut accounts, mut withdrawals) = handlers().await;

    signup(&mut accounts, "carol", "c@x.com", "pw").await.unwrap();
    record_earnings(&mut accounts, "c@x.com", 20.0).await.unwrap();
    submit_withdrawal(&mut withdrawals, "c@x.com", 20.0, "bank")
        .await
        .unwrap();

    let date = list_for_account(&mut withdrawals, "c@x.com").await.unwrap()[0]
        .date
        .clone();
    approve_withdrawal(&mut withdrawals, "c@x.com", &date)
        .await
        .unwrap();

    let err = approve_withdrawal(&mut withdrawals, "c@x.com", &date)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(err.to_string(), "Request already approved.");

    let requests = list_for_account(&mut withdrawals, "c@x.com").await.unwrap();
    assert!(requests[0].approved);
}

#[tokio::test]
async fn test_wrong_password_leaves_last_login_untouched() {
    let (mut accounts, _) = handlers().await;

    signup(&mut accounts, "dave", "d@x.com", "right").await.unwrap();

    let err = login(&mut accounts, "d@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
    assert!(profile(&mut accounts, "d@x.com")
        .await
        .unwrap()
        .last_login
        .is_none());

    let outcome = login(&mut accounts, "d@x.com", "right").await.unwrap();
    assert_eq!(outcome.username, "dave");
    assert_eq!(
        profile(&mut accounts, "d@x.com").await.unwrap().last_login,
        Some(outcome.last_login)
    );
}

#[tokio::test]
async fn test_earnings_never_go_negative_across_a_sequence() {
    let (mut accounts, mut withdrawals) = handlers().await;

    signup(&mut accounts, "erin", "e@x.com", "pw").await.unwrap();
    record_earnings(&mut accounts, "e@x.com", 10.0).await.unwrap();

    submit_withdrawal(&mut withdrawals, "e@x.com", 10.0, "bank")
        .await
        .unwrap();
    // Balance is fully reserved now; any further request must fail.
    let err = submit_withdrawal(&mut withdrawals, "e@x.com", 0.01, "bank")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid withdrawal amount.");

    let current = profile(&mut accounts, "e@x.com").await.unwrap();
    assert_eq!(current.earnings, 0.0);
    assert_eq!(current.withdraw_requests.len(), 1);
}
