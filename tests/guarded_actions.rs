//! Status-gated actions against the mock backend
//!
//! Reversal, cancellation and the journal batch lifecycle, driven through
//! the real HTTP client with toast assertions.

#![cfg(feature = "mock-api")]

use std::sync::Arc;

use rust_decimal::Decimal;
use std::str::FromStr;

use ledgerdesk::actions::{
    ActionError, ActionRunner, BatchAction, BatchEquilibrium, batch_actions,
};
use ledgerdesk::feedback::{ToastKind, ToastReceiver, toast_channel};
use ledgerdesk::IdempotencyKey;
use ledgerdesk::gateway::{ApiClient, Backend, NewTransaction, NewTransfer};
use ledgerdesk::mock_api::{MockBank, serve};
use ledgerdesk::model::{
    Account, AccountStatus, BatchStatus, EntryType, TransactionStatus, TransactionType,
    TransferStatus,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn account(id: &str, client: &str, balance: &str) -> Account {
    Account {
        id: id.to_string(),
        account_number: format!("1000-{}", id),
        status: AccountStatus::Active,
        currency: "USD".to_string(),
        balance: dec(balance),
        available_balance: dec(balance),
        client_id: Some(client.to_string()),
        product_id: None,
    }
}

struct TestHarness {
    bank: MockBank,
    client: Arc<ApiClient>,
    runner: ActionRunner,
    toasts: ToastReceiver,
    _server: tokio::task::JoinHandle<()>,
}

impl TestHarness {
    async fn start(bank: MockBank) -> Self {
        let (addr, server) = serve(bank.clone()).await.expect("mock backend starts");
        let client = Arc::new(
            ApiClient::new(format!("http://{}", addr), 5).expect("client builds"),
        );
        let (toast_tx, toasts) = toast_channel();
        let runner = ActionRunner::new(client.clone(), toast_tx);
        Self {
            bank,
            client,
            runner,
            toasts,
            _server: server,
        }
    }
}

// ========================================================================
// Transaction Reversal
// ========================================================================

#[tokio::test]
async fn test_reverse_completed_transaction() {
    let bank = MockBank::new();
    bank.insert_account(account("acc-1", "cli-1", "500"));
    let txn = bank.seed_transaction("acc-1", dec("50"), TransactionStatus::Completed);
    let mut harness = TestHarness::start(bank).await;

    let refreshed = harness
        .runner
        .reverse_transaction(&txn, "posted to the wrong account")
        .await
        .unwrap();

    assert_eq!(refreshed.status, TransactionStatus::Reversed);

    let toast = harness.toasts.current().expect("success toast");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Transaction reversed");

    // The account got its money back
    let acc = harness.client.get_account("acc-1").await.unwrap();
    assert_eq!(acc.available_balance, dec("450"));
}

#[tokio::test]
async fn test_deposit_then_list_then_reverse() {
    let bank = MockBank::new();
    bank.insert_account(account("acc-1", "cli-1", "100"));
    let harness = TestHarness::start(bank).await;

    let key = IdempotencyKey::generate("txn-create");
    let req = NewTransaction {
        account_id: "acc-1".to_string(),
        transaction_type: TransactionType::Deposit,
        amount: dec("40"),
        currency: "USD".to_string(),
        description: None,
    };
    let txn = harness
        .client
        .create_transaction(&req, key.as_str())
        .await
        .unwrap();
    assert_eq!(txn.status, TransactionStatus::Completed);

    let listed = harness
        .client
        .transactions_for_account("acc-1")
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let acc = harness.client.get_account("acc-1").await.unwrap();
    assert_eq!(acc.available_balance, dec("140"));

    let reversed = harness
        .runner
        .reverse_transaction(&txn, "keyed in error")
        .await
        .unwrap();
    assert_eq!(reversed.status, TransactionStatus::Reversed);

    let acc = harness.client.get_account("acc-1").await.unwrap();
    assert_eq!(acc.available_balance, dec("100"));
}

#[tokio::test]
async fn test_reverse_is_refused_for_non_completed() {
    let bank = MockBank::new();
    let txn = bank.seed_transaction("acc-1", dec("50"), TransactionStatus::Processing);
    let harness = TestHarness::start(bank).await;
    let requests_before = harness.bank.request_count();

    let result = harness
        .runner
        .reverse_transaction(&txn, "should not matter")
        .await;
    assert!(matches!(result, Err(ActionError::NotAllowed(_))));
    // Gate fired client-side, nothing reached the backend
    assert_eq!(harness.bank.request_count(), requests_before);
}

// ========================================================================
// Transfer Cancellation
// ========================================================================

#[tokio::test]
async fn test_cancel_pending_transfer() {
    let bank = MockBank::new();
    bank.insert_account(account("acc-1", "cli-1", "500"));
    bank.insert_account(account("acc-2", "cli-2", "100"));
    bank.hold_transfers(true);
    let mut harness = TestHarness::start(bank).await;

    let req = NewTransfer {
        from_account_id: "acc-1".to_string(),
        to_account_id: "acc-2".to_string(),
        amount: dec("25"),
        currency: "USD".to_string(),
        idempotency_key: "transfer-hold-1".to_string(),
        description: None,
    };
    let transfer = harness
        .client
        .create_transfer(&req, "transfer-hold-1")
        .await
        .unwrap();
    assert_eq!(transfer.status, TransferStatus::Pending);

    let cancelled = harness
        .runner
        .cancel_transfer(&transfer, "customer withdrew the instruction")
        .await
        .unwrap();
    assert_eq!(cancelled.status, TransferStatus::Cancelled);

    let toast = harness.toasts.current().expect("success toast");
    assert_eq!(toast.message, "Transfer cancelled");
}

#[tokio::test]
async fn test_cancel_requires_justification() {
    let bank = MockBank::new();
    let transfer = bank.seed_transfer("acc-1", "acc-2", dec("25"), TransferStatus::Pending);
    let harness = TestHarness::start(bank).await;
    let requests_before = harness.bank.request_count();

    let result = harness.runner.cancel_transfer(&transfer, "  ").await;
    assert!(matches!(result, Err(ActionError::ReasonRequired)));
    assert_eq!(harness.bank.request_count(), requests_before);
}

#[tokio::test]
async fn test_cancel_refused_once_completed() {
    let bank = MockBank::new();
    let transfer = bank.seed_transfer("acc-1", "acc-2", dec("25"), TransferStatus::Completed);
    let harness = TestHarness::start(bank).await;

    let result = harness
        .runner
        .cancel_transfer(&transfer, "too late")
        .await;
    assert!(matches!(result, Err(ActionError::NotAllowed(_))));
}

// ========================================================================
// Journal Batch Lifecycle
// ========================================================================

/// totalDebit=1000.00 vs totalCredit=999.99: Post is withheld and the
/// badge explains the 0.01 discrepancy.
#[tokio::test]
async fn test_unbalanced_batch_withholds_post() {
    let bank = MockBank::new();
    let batch = bank.seed_batch(BatchStatus::Draft, dec("1000.00"), dec("999.99"));
    let harness = TestHarness::start(bank).await;

    assert_eq!(batch_actions(&batch), vec![BatchAction::RecalculateTotals]);

    let equilibrium = BatchEquilibrium::of(&batch);
    assert!(!equilibrium.balanced);
    assert_eq!(equilibrium.difference.to_string(), "0.01");
    assert!(equilibrium.message().contains("0.01"));

    let result = harness.runner.post_batch(&batch).await;
    assert!(matches!(result, Err(ActionError::NotBalanced { .. })));
}

#[tokio::test]
async fn test_recalculate_post_close_lifecycle() {
    let bank = MockBank::new();
    let batch = bank.seed_batch(BatchStatus::Draft, Decimal::ZERO, Decimal::ZERO);
    bank.set_batch_lines(
        &batch.id,
        vec![
            (EntryType::Debit, dec("750.00")),
            (EntryType::Debit, dec("250.00")),
            (EntryType::Credit, dec("1000.00")),
        ],
    );
    let harness = TestHarness::start(bank).await;

    let recalculated = harness.runner.recalculate_batch(&batch).await.unwrap();
    assert_eq!(recalculated.total_debit, dec("1000.00"));
    assert!(recalculated.is_balanced());
    assert_eq!(
        batch_actions(&recalculated),
        vec![BatchAction::RecalculateTotals, BatchAction::Post]
    );

    let posted = harness.runner.post_batch(&recalculated).await.unwrap();
    assert_eq!(posted.status, BatchStatus::Posted);
    assert_eq!(batch_actions(&posted), vec![BatchAction::Close]);

    let closed = harness.runner.close_batch(&posted).await.unwrap();
    assert_eq!(closed.status, BatchStatus::Closed);
    assert!(batch_actions(&closed).is_empty());

    // One-directional: no action leaves CLOSED
    let result = harness.runner.close_batch(&closed).await;
    assert!(matches!(result, Err(ActionError::NotAllowed(_))));
}

/// A server-side failure surfaces verbatim and the re-fetched entity is
/// the pre-action state.
#[tokio::test]
async fn test_failed_post_leaves_batch_unchanged() {
    let bank = MockBank::new();
    let batch = bank.seed_batch(BatchStatus::Draft, dec("500"), dec("500"));
    let mut harness = TestHarness::start(bank).await;

    harness.bank.fail_next_request("Accounting period is closed");
    let result = harness.runner.post_batch(&batch).await;
    match result {
        Err(ActionError::Api(e)) => {
            assert_eq!(e.to_string(), "Accounting period is closed")
        }
        other => panic!("expected Api error, got {:?}", other.map(|b| b.id)),
    }

    let toast = harness.toasts.current().expect("error toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Accounting period is closed");

    // Pre-action state intact; the action stays retryable
    let fetched = harness.client.get_batch(&batch.id).await.unwrap();
    assert_eq!(fetched.status, BatchStatus::Draft);

    let posted = harness.runner.post_batch(&fetched).await.unwrap();
    assert_eq!(posted.status, BatchStatus::Posted);
}
