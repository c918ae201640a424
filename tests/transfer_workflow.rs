//! End-to-end transfer origination against the mock backend
//!
//! These run the real HTTP client against an in-process backend, so the
//! whole path is exercised: cascade fetches, validation gate, idempotency
//! key transport, error-body decoding.

#![cfg(feature = "mock-api")]

use std::sync::Arc;

use rust_decimal::Decimal;
use std::str::FromStr;

use ledgerdesk::gateway::{ApiClient, Backend, NewAccount, NewCustomer, NewTransfer};
use ledgerdesk::IdempotencyKey;
use ledgerdesk::mock_api::{MockBank, serve};
use ledgerdesk::model::{Account, AccountStatus, Customer, CustomerStatus};
use ledgerdesk::origination::{OriginationError, OriginationForm};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn customer(id: &str, name: &str) -> Customer {
    Customer {
        id: id.to_string(),
        display_name: name.to_string(),
        status: CustomerStatus::Verified,
    }
}

fn account(id: &str, client: &str, currency: &str, balance: &str) -> Account {
    Account {
        id: id.to_string(),
        account_number: format!("1000-{}", id),
        status: AccountStatus::Active,
        currency: currency.to_string(),
        balance: dec(balance),
        available_balance: dec(balance),
        client_id: Some(client.to_string()),
        product_id: None,
    }
}

/// Mock backend + HTTP client pair used by every scenario
struct TestHarness {
    bank: MockBank,
    client: Arc<ApiClient>,
    _server: tokio::task::JoinHandle<()>,
}

impl TestHarness {
    async fn start(bank: MockBank) -> Self {
        let (addr, server) = serve(bank.clone()).await.expect("mock backend starts");
        let client = Arc::new(
            ApiClient::new(format!("http://{}", addr), 5).expect("client builds"),
        );
        Self {
            bank,
            client,
            _server: server,
        }
    }

    fn form(&self) -> OriginationForm {
        OriginationForm::new(self.client.clone())
    }
}

fn two_customer_bank() -> MockBank {
    let bank = MockBank::new();
    bank.insert_customer(customer("cli-1", "Ada Lovelace"));
    bank.insert_customer(customer("cli-2", "Charles Babbage"));
    bank.insert_account(account("acc-usd-src", "cli-1", "USD", "500"));
    bank.insert_account(account("acc-usd-dst", "cli-2", "USD", "100"));
    bank.insert_account(account("acc-eur-dst", "cli-2", "EUR", "100"));
    bank
}

// ========================================================================
// Backend Probe
// ========================================================================

#[tokio::test]
async fn test_health_and_customer_listing() {
    let harness = TestHarness::start(two_customer_bank()).await;

    harness.client.health().await.unwrap();

    let customers = harness.client.list_customers().await.unwrap();
    let names: Vec<_> = customers.iter().map(|c| c.display_name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Charles Babbage"]);

    let ada = harness.client.get_customer("cli-1").await.unwrap();
    assert!(ada.is_transfer_counterparty());
}

// ========================================================================
// Onboarding
// ========================================================================

/// A freshly created customer is DRAFT and stays out of the counterparty
/// pickers until verified.
#[tokio::test]
async fn test_new_customer_and_account_over_http() {
    let harness = TestHarness::start(two_customer_bank()).await;

    let key = IdempotencyKey::generate("customer-create");
    let created = harness
        .client
        .create_customer(
            &NewCustomer {
                display_name: "Grace Hopper".to_string(),
            },
            key.as_str(),
        )
        .await
        .unwrap();
    assert!(!created.is_transfer_counterparty());

    let key = IdempotencyKey::generate("account-open");
    let opened = harness
        .client
        .create_account(
            &NewAccount {
                client_id: created.id.clone(),
                currency: "USD".to_string(),
                product_id: None,
            },
            key.as_str(),
        )
        .await
        .unwrap();
    assert_eq!(opened.balance, dec("0"));
    assert_eq!(opened.client_id.as_deref(), Some(created.id.as_str()));

    let mut form = harness.form();
    form.load_customers().await.unwrap();
    let ids: Vec<_> = form.customer_choices().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["cli-1", "cli-2"]);
}

// ========================================================================
// Cascade Scenarios
// ========================================================================

/// Source client has one ACTIVE USD account; destination client has one
/// USD and one EUR account -> the destination list contains only USD.
#[tokio::test]
async fn test_destination_list_filtered_by_source_currency() {
    let harness = TestHarness::start(two_customer_bank()).await;
    let mut form = harness.form();

    form.select_from_client("cli-1").await.unwrap();
    form.select_from_account("acc-usd-src").unwrap();
    form.select_to_client("cli-2").await.unwrap();

    let ids: Vec<_> = form
        .destination_choices()
        .iter()
        .map(|a| a.id.clone())
        .collect();
    assert_eq!(ids, vec!["acc-usd-dst"]);
}

/// Amount "100" with the 0.5% bounded model -> fee 0.50, total 100.50.
#[tokio::test]
async fn test_fee_preview_for_display() {
    let harness = TestHarness::start(two_customer_bank()).await;
    let mut form = harness.form();

    form.select_from_client("cli-1").await.unwrap();
    form.select_from_account("acc-usd-src").unwrap();
    form.set_amount("100");

    let preview = form.fee_preview().expect("preview available");
    assert_eq!(preview.fee.to_string(), "0.50");
    assert_eq!(preview.total_required.to_string(), "100.50");
}

#[tokio::test]
async fn test_successful_submission_yields_transfer_detail() {
    let harness = TestHarness::start(two_customer_bank()).await;
    let mut form = harness.form();

    form.select_from_client("cli-1").await.unwrap();
    form.select_from_account("acc-usd-src").unwrap();
    form.select_to_client("cli-2").await.unwrap();
    form.select_to_account("acc-usd-dst").unwrap();
    form.set_amount("100");

    let transfer = form.submit().await.unwrap();

    // The caller navigates to the detail view with this id; the backend
    // agrees about what was created
    let fetched = harness.client.get_transfer(&transfer.id).await.unwrap();
    assert_eq!(fetched.from_account_id, "acc-usd-src");
    assert_eq!(fetched.to_account_id, "acc-usd-dst");
    assert_eq!(fetched.amount, dec("100"));
    assert_eq!(fetched.fee_amount, dec("0.50"));

    // Authoritative balances moved server-side
    let from = harness.client.get_account("acc-usd-src").await.unwrap();
    assert_eq!(from.available_balance, dec("399.50"));
}

/// Backend 400 {"message": "Insufficient funds"} -> exactly that text is
/// surfaced, the selection state survives, and nothing was created.
#[tokio::test]
async fn test_backend_rejection_is_verbatim_and_state_preserved() {
    let bank = MockBank::new();
    bank.insert_customer(customer("cli-1", "Ada Lovelace"));
    bank.insert_customer(customer("cli-2", "Charles Babbage"));
    bank.insert_account(account("acc-poor", "cli-1", "USD", "10"));
    bank.insert_account(account("acc-dst", "cli-2", "USD", "0"));
    let harness = TestHarness::start(bank).await;
    let mut form = harness.form();

    form.select_from_client("cli-1").await.unwrap();
    form.select_from_account("acc-poor").unwrap();
    form.select_to_client("cli-2").await.unwrap();
    form.select_to_account("acc-dst").unwrap();
    form.set_amount("100");

    let err = form.submit().await.unwrap_err();
    assert_eq!(err.to_string(), "Insufficient funds");

    // Selection state preserved for correction and retry
    assert_eq!(form.from_account_id(), Some("acc-poor"));
    assert_eq!(form.to_account_id(), Some("acc-dst"));
    assert_eq!(form.amount_input(), "100");

    assert_eq!(harness.bank.transfer_count(), 0);
}

// ========================================================================
// Validation Gate
// ========================================================================

/// An invalid form never reaches the wire.
#[tokio::test]
async fn test_invalid_submission_issues_no_network_call() {
    let harness = TestHarness::start(two_customer_bank()).await;
    let mut form = harness.form();

    form.select_from_client("cli-1").await.unwrap();
    form.select_from_account("acc-usd-src").unwrap();
    form.select_to_client("cli-2").await.unwrap();
    form.select_to_account("acc-usd-dst").unwrap();

    let requests_after_setup = harness.bank.request_count();

    // Missing amount
    assert!(matches!(
        form.submit().await,
        Err(OriginationError::InvalidAmount)
    ));

    // Non-positive amount
    form.set_amount("-5");
    assert!(matches!(
        form.submit().await,
        Err(OriginationError::InvalidAmount)
    ));

    assert_eq!(harness.bank.request_count(), requests_after_setup);
    assert_eq!(harness.bank.transfer_count(), 0);
}

// ========================================================================
// Idempotency
// ========================================================================

/// Two successful submissions are two logical intents: distinct keys,
/// distinct transfers.
#[tokio::test]
async fn test_each_submission_mints_a_fresh_key() {
    let harness = TestHarness::start(two_customer_bank()).await;
    let mut form = harness.form();

    form.select_from_client("cli-1").await.unwrap();
    form.select_from_account("acc-usd-src").unwrap();
    form.select_to_client("cli-2").await.unwrap();
    form.select_to_account("acc-usd-dst").unwrap();
    form.set_amount("10");

    let first = form.submit().await.unwrap();
    let second = form.submit().await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(harness.bank.transfer_count(), 2);
    assert_eq!(harness.bank.idempotency_keys_seen(), 2);
}

/// A replayed delivery of the SAME key is de-duplicated by the backend.
#[tokio::test]
async fn test_same_key_replay_is_deduplicated() {
    let harness = TestHarness::start(two_customer_bank()).await;

    let req = NewTransfer {
        from_account_id: "acc-usd-src".to_string(),
        to_account_id: "acc-usd-dst".to_string(),
        amount: dec("10"),
        currency: "USD".to_string(),
        idempotency_key: "transfer-replayed-once".to_string(),
        description: None,
    };

    let first = harness
        .client
        .create_transfer(&req, "transfer-replayed-once")
        .await
        .unwrap();
    let second = harness
        .client
        .create_transfer(&req, "transfer-replayed-once")
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(harness.bank.transfer_count(), 1);
}
