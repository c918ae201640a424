//! In-memory bank state and operations

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::gateway::{
    ApiError, Backend, CancelTransferRequest, NewAccount, NewCustomer, NewTransaction,
    NewTransfer, ReverseTransactionRequest,
};
use crate::model::{
    Account, AccountStatus, BatchStatus, Customer, CustomerStatus, EntryType, JournalBatch,
    Permission, Product, Role, Transaction, TransactionEntry, TransactionStatus, TransactionType,
    Transfer, TransferStatus, User,
};
use crate::origination::FeeSchedule;

/// A rejected operation: HTTP status plus the message the client will
/// decode and display verbatim.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub status: u16,
    pub message: String,
}

impl Rejection {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<Rejection> for ApiError {
    fn from(r: Rejection) -> Self {
        ApiError::Http {
            status: r.status,
            message: r.message,
        }
    }
}

#[derive(Default)]
struct MockBankInner {
    customers: DashMap<String, Customer>,
    accounts: DashMap<String, Account>,
    transactions: DashMap<String, Transaction>,
    transfers: DashMap<String, Transfer>,
    batches: DashMap<String, JournalBatch>,
    batch_lines: DashMap<String, Vec<(EntryType, Decimal)>>,
    products: DashMap<String, Product>,
    users: DashMap<String, User>,
    roles: DashMap<String, Role>,
    permissions: DashMap<String, Permission>,
    /// Idempotency key -> transfer id already created for it
    idempotency: DashMap<String, String>,
    /// Created transfers stay PENDING instead of settling immediately
    hold_transfers: AtomicBool,
    /// One-shot forced rejection for the next operation
    forced_failure: Mutex<Option<String>>,
    /// Operations handled (mutating and read)
    requests: AtomicU64,
    /// Account numbers assigned by create-account
    next_account_number: AtomicU64,
}

/// Shared in-memory bank; clones refer to the same state.
#[derive(Clone, Default)]
pub struct MockBank {
    inner: Arc<MockBankInner>,
    fees: FeeSchedule,
}

impl MockBank {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockBankInner::default()),
            fees: FeeSchedule::standard().clone(),
        }
    }

    // ------------------------------------------------------------------
    // Seeding & test controls
    // ------------------------------------------------------------------

    pub fn insert_customer(&self, customer: Customer) {
        self.inner.customers.insert(customer.id.clone(), customer);
    }

    pub fn insert_account(&self, account: Account) {
        self.inner.accounts.insert(account.id.clone(), account);
    }

    pub fn insert_product(&self, product: Product) {
        self.inner.products.insert(product.id.clone(), product);
    }

    pub fn insert_user(&self, user: User) {
        self.inner.users.insert(user.id.clone(), user);
    }

    pub fn insert_role(&self, role: Role) {
        self.inner.roles.insert(role.id.clone(), role);
    }

    pub fn insert_permission(&self, permission: Permission) {
        self.inner
            .permissions
            .insert(permission.id.clone(), permission);
    }

    pub fn seed_transaction(
        &self,
        account_id: &str,
        amount: Decimal,
        status: TransactionStatus,
    ) -> Transaction {
        let txn = Transaction {
            id: format!("txn-{}", ulid::Ulid::new()),
            transaction_type: TransactionType::Deposit,
            status,
            amount,
            currency: "USD".to_string(),
            account_id: account_id.to_string(),
            reference_type: None,
            reference_id: None,
            entries: Vec::new(),
            created_at: Utc::now(),
        };
        self.inner.transactions.insert(txn.id.clone(), txn.clone());
        txn
    }

    pub fn seed_transfer(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
        status: TransferStatus,
    ) -> Transfer {
        let transfer = Transfer {
            id: format!("trf-{}", ulid::Ulid::new()),
            status,
            from_account_id: from.to_string(),
            to_account_id: to.to_string(),
            amount,
            currency: "USD".to_string(),
            fee_amount: Decimal::ZERO,
            from_transaction_id: None,
            to_transaction_id: None,
            fee_transaction_id: None,
            created_at: Utc::now(),
        };
        self.inner
            .transfers
            .insert(transfer.id.clone(), transfer.clone());
        transfer
    }

    pub fn seed_batch(
        &self,
        status: BatchStatus,
        total_debit: Decimal,
        total_credit: Decimal,
    ) -> JournalBatch {
        let batch = JournalBatch {
            id: format!("jb-{}", ulid::Ulid::new()),
            status,
            total_debit,
            total_credit,
            currency: "USD".to_string(),
            description: None,
        };
        self.inner.batches.insert(batch.id.clone(), batch.clone());
        batch
    }

    /// Journal lines used by recalculate-totals.
    pub fn set_batch_lines(&self, batch_id: &str, lines: Vec<(EntryType, Decimal)>) {
        self.inner.batch_lines.insert(batch_id.to_string(), lines);
    }

    /// When set, created transfers stay PENDING instead of settling.
    pub fn hold_transfers(&self, hold: bool) {
        self.inner.hold_transfers.store(hold, Ordering::SeqCst);
    }

    /// Force the next operation to fail with a 400 and `message`.
    pub fn fail_next_request(&self, message: impl Into<String>) {
        *self.inner.forced_failure.lock().expect("mock lock") = Some(message.into());
    }

    /// Operations handled so far.
    pub fn request_count(&self) -> u64 {
        self.inner.requests.load(Ordering::SeqCst)
    }

    /// Distinct idempotency keys seen on create-transfer.
    pub fn idempotency_keys_seen(&self) -> usize {
        self.inner.idempotency.len()
    }

    pub fn transfer_count(&self) -> usize {
        self.inner.transfers.len()
    }

    // ------------------------------------------------------------------
    // Core operations (shared by the HTTP routes and the Backend impl)
    // ------------------------------------------------------------------

    fn begin_op(&self) -> Result<(), Rejection> {
        self.inner.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.inner.forced_failure.lock().expect("mock lock").take() {
            return Err(Rejection::new(400, message));
        }
        Ok(())
    }

    pub fn op_health(&self) -> Result<serde_json::Value, Rejection> {
        self.begin_op()?;
        Ok(serde_json::json!({ "status": "UP" }))
    }

    pub fn op_list_customers(&self) -> Result<Vec<Customer>, Rejection> {
        self.begin_op()?;
        let mut list: Vec<_> = self
            .inner
            .customers
            .iter()
            .map(|e| e.value().clone())
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    pub fn op_get_customer(&self, id: &str) -> Result<Customer, Rejection> {
        self.begin_op()?;
        self.inner
            .customers
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Customer not found"))
    }

    pub fn op_create_customer(&self, req: &NewCustomer) -> Result<Customer, Rejection> {
        self.begin_op()?;

        if req.display_name.trim().is_empty() {
            return Err(Rejection::new(400, "Display name is required"));
        }

        // New customers start in DRAFT and only become transfer
        // counterparties once verified
        let customer = Customer {
            id: format!("cli-{}", ulid::Ulid::new()),
            display_name: req.display_name.trim().to_string(),
            status: CustomerStatus::Draft,
        };
        self.inner
            .customers
            .insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    pub fn op_list_accounts(&self, client_id: Option<&str>) -> Result<Vec<Account>, Rejection> {
        self.begin_op()?;
        let mut list: Vec<_> = self
            .inner
            .accounts
            .iter()
            .map(|e| e.value().clone())
            .filter(|a| match client_id {
                Some(c) => a.client_id.as_deref() == Some(c),
                None => true,
            })
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    pub fn op_get_account(&self, id: &str) -> Result<Account, Rejection> {
        self.begin_op()?;
        self.inner
            .accounts
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Account not found"))
    }

    pub fn op_create_account(&self, req: &NewAccount) -> Result<Account, Rejection> {
        self.begin_op()?;

        if !self.inner.customers.contains_key(&req.client_id) {
            return Err(Rejection::new(404, "Customer not found"));
        }
        if req.currency.trim().is_empty() {
            return Err(Rejection::new(400, "Currency is required"));
        }

        let number = 1_000_000
            + self
                .inner
                .next_account_number
                .fetch_add(1, Ordering::SeqCst)
            + 1;
        let account = Account {
            id: format!("acc-{}", ulid::Ulid::new()),
            account_number: number.to_string(),
            status: AccountStatus::Active,
            currency: req.currency.clone(),
            balance: Decimal::ZERO,
            available_balance: Decimal::ZERO,
            client_id: Some(req.client_id.clone()),
            product_id: req.product_id.clone(),
        };
        self.inner
            .accounts
            .insert(account.id.clone(), account.clone());
        Ok(account)
    }

    pub fn op_list_products(&self) -> Result<Vec<Product>, Rejection> {
        self.begin_op()?;
        let mut list: Vec<_> = self
            .inner
            .products
            .iter()
            .map(|e| e.value().clone())
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    pub fn op_list_users(&self) -> Result<Vec<User>, Rejection> {
        self.begin_op()?;
        let mut list: Vec<_> = self.inner.users.iter().map(|e| e.value().clone()).collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    pub fn op_list_roles(&self) -> Result<Vec<Role>, Rejection> {
        self.begin_op()?;
        let mut list: Vec<_> = self.inner.roles.iter().map(|e| e.value().clone()).collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    pub fn op_list_permissions(&self) -> Result<Vec<Permission>, Rejection> {
        self.begin_op()?;
        let mut list: Vec<_> = self
            .inner
            .permissions
            .iter()
            .map(|e| e.value().clone())
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    pub fn op_get_transaction(&self, id: &str) -> Result<Transaction, Rejection> {
        self.begin_op()?;
        self.inner
            .transactions
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Transaction not found"))
    }

    pub fn op_list_transactions(
        &self,
        account_id: Option<&str>,
    ) -> Result<Vec<Transaction>, Rejection> {
        self.begin_op()?;
        let mut list: Vec<_> = self
            .inner
            .transactions
            .iter()
            .map(|e| e.value().clone())
            .filter(|t| match account_id {
                Some(a) => t.account_id == a,
                None => true,
            })
            .collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(list)
    }

    pub fn op_create_transaction(&self, req: &NewTransaction) -> Result<Transaction, Rejection> {
        self.begin_op()?;

        if req.amount <= Decimal::ZERO {
            return Err(Rejection::new(400, "Amount must be greater than zero"));
        }
        let account = self
            .inner
            .accounts
            .get(&req.account_id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Account not found"))?;
        if !account.status.is_active() {
            return Err(Rejection::new(422, "Account is not active"));
        }

        let txn = Transaction {
            id: format!("txn-{}", ulid::Ulid::new()),
            transaction_type: req.transaction_type,
            status: TransactionStatus::Completed,
            amount: req.amount,
            currency: req.currency.clone(),
            account_id: req.account_id.clone(),
            reference_type: None,
            reference_id: None,
            entries: Vec::new(),
            created_at: Utc::now(),
        };

        let delta = match req.transaction_type {
            TransactionType::Deposit | TransactionType::Interest | TransactionType::Adjustment => {
                req.amount
            }
            _ => -req.amount,
        };
        self.adjust_balance(&req.account_id, delta);

        self.inner.transactions.insert(txn.id.clone(), txn.clone());
        Ok(txn)
    }

    pub fn op_reverse_transaction(
        &self,
        id: &str,
        req: &ReverseTransactionRequest,
    ) -> Result<Transaction, Rejection> {
        self.begin_op()?;

        if req.reason.trim().is_empty() {
            return Err(Rejection::new(400, "Reversal reason is required"));
        }

        let original = self
            .inner
            .transactions
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Transaction not found"))?;

        if original.status != TransactionStatus::Completed {
            return Err(Rejection::new(
                409,
                "Only completed transactions can be reversed",
            ));
        }

        let reversal = Transaction {
            id: format!("txn-{}", ulid::Ulid::new()),
            transaction_type: TransactionType::Reversal,
            status: TransactionStatus::Completed,
            amount: original.amount,
            currency: original.currency.clone(),
            account_id: original.account_id.clone(),
            reference_type: Some("TRANSACTION".to_string()),
            reference_id: Some(original.id.clone()),
            entries: vec![
                TransactionEntry {
                    id: format!("ent-{}", ulid::Ulid::new()),
                    entry_type: EntryType::Debit,
                    amount: original.amount,
                    ledger_account_id: "GL-CLEARING".to_string(),
                },
                TransactionEntry {
                    id: format!("ent-{}", ulid::Ulid::new()),
                    entry_type: EntryType::Credit,
                    amount: original.amount,
                    ledger_account_id: "GL-CASH".to_string(),
                },
            ],
            created_at: Utc::now(),
        };

        self.adjust_balance(&original.account_id, -original.amount);

        if let Some(mut entry) = self.inner.transactions.get_mut(id) {
            entry.status = TransactionStatus::Reversed;
        }
        self.inner
            .transactions
            .insert(reversal.id.clone(), reversal.clone());
        Ok(reversal)
    }

    pub fn op_get_transfer(&self, id: &str) -> Result<Transfer, Rejection> {
        self.begin_op()?;
        self.inner
            .transfers
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Transfer not found"))
    }

    pub fn op_create_transfer(
        &self,
        req: &NewTransfer,
        idempotency_key: &str,
    ) -> Result<Transfer, Rejection> {
        self.begin_op()?;

        // De-duplication: a replayed key returns the transfer it created
        if !idempotency_key.is_empty()
            && let Some(existing_id) = self
                .inner
                .idempotency
                .get(idempotency_key)
                .map(|e| e.value().clone())
            && let Some(existing) = self.inner.transfers.get(&existing_id)
        {
            return Ok(existing.value().clone());
        }

        if req.from_account_id == req.to_account_id {
            return Err(Rejection::new(
                400,
                "Source and destination accounts must be different",
            ));
        }
        if req.amount <= Decimal::ZERO {
            return Err(Rejection::new(400, "Amount must be greater than zero"));
        }

        let from = self
            .inner
            .accounts
            .get(&req.from_account_id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Source account not found"))?;
        let to = self
            .inner
            .accounts
            .get(&req.to_account_id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Destination account not found"))?;

        if !from.status.is_active() {
            return Err(Rejection::new(422, "Source account is not active"));
        }
        if !to.status.is_active() {
            return Err(Rejection::new(422, "Destination account is not active"));
        }
        if req.currency != from.currency {
            return Err(Rejection::new(
                400,
                "Transfer currency must match the source account",
            ));
        }
        if to.currency != from.currency {
            return Err(Rejection::new(
                400,
                "Destination account currency does not match",
            ));
        }

        // Authoritative fee; may differ from the client's preview
        let fee = self.fees.preview(req.amount).fee;
        let total = req.amount + fee;
        if from.available_balance < total {
            return Err(Rejection::new(400, "Insufficient funds"));
        }

        let hold = self.inner.hold_transfers.load(Ordering::SeqCst);
        let mut transfer = Transfer {
            id: format!("trf-{}", ulid::Ulid::new()),
            status: if hold {
                TransferStatus::Pending
            } else {
                TransferStatus::Completed
            },
            from_account_id: req.from_account_id.clone(),
            to_account_id: req.to_account_id.clone(),
            amount: req.amount,
            currency: req.currency.clone(),
            fee_amount: fee,
            from_transaction_id: None,
            to_transaction_id: None,
            fee_transaction_id: None,
            created_at: Utc::now(),
        };

        if !hold {
            transfer.from_transaction_id =
                Some(self.settle_leg(&transfer, &req.from_account_id, -total));
            transfer.to_transaction_id =
                Some(self.settle_leg(&transfer, &req.to_account_id, req.amount));
            if fee > Decimal::ZERO {
                transfer.fee_transaction_id = Some(self.fee_leg(&transfer, fee));
            }
        }

        self.inner
            .transfers
            .insert(transfer.id.clone(), transfer.clone());
        if !idempotency_key.is_empty() {
            self.inner
                .idempotency
                .insert(idempotency_key.to_string(), transfer.id.clone());
        }
        Ok(transfer)
    }

    pub fn op_cancel_transfer(
        &self,
        id: &str,
        req: &CancelTransferRequest,
    ) -> Result<Transfer, Rejection> {
        self.begin_op()?;

        if req.reason.trim().is_empty() {
            return Err(Rejection::new(400, "Cancellation reason is required"));
        }

        let mut entry = self
            .inner
            .transfers
            .get_mut(id)
            .ok_or_else(|| Rejection::new(404, "Transfer not found"))?;

        if entry.status != TransferStatus::Pending {
            return Err(Rejection::new(409, "Only pending transfers can be cancelled"));
        }

        entry.status = TransferStatus::Cancelled;
        Ok(entry.value().clone())
    }

    pub fn op_get_batch(&self, id: &str) -> Result<JournalBatch, Rejection> {
        self.begin_op()?;
        self.inner
            .batches
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Rejection::new(404, "Journal batch not found"))
    }

    pub fn op_post_batch(&self, id: &str) -> Result<JournalBatch, Rejection> {
        self.begin_op()?;

        let mut entry = self
            .inner
            .batches
            .get_mut(id)
            .ok_or_else(|| Rejection::new(404, "Journal batch not found"))?;

        if entry.status != BatchStatus::Draft {
            return Err(Rejection::new(409, "Only draft batches can be posted"));
        }
        // Server-side equilibrium check, independent of the client gate
        if !entry.is_balanced() {
            return Err(Rejection::new(422, "Batch is not balanced"));
        }

        entry.status = BatchStatus::Posted;
        Ok(entry.value().clone())
    }

    pub fn op_close_batch(&self, id: &str) -> Result<JournalBatch, Rejection> {
        self.begin_op()?;

        let mut entry = self
            .inner
            .batches
            .get_mut(id)
            .ok_or_else(|| Rejection::new(404, "Journal batch not found"))?;

        if entry.status != BatchStatus::Posted {
            return Err(Rejection::new(409, "Only posted batches can be closed"));
        }

        entry.status = BatchStatus::Closed;
        Ok(entry.value().clone())
    }

    pub fn op_recalculate_batch(&self, id: &str) -> Result<JournalBatch, Rejection> {
        self.begin_op()?;

        let mut entry = self
            .inner
            .batches
            .get_mut(id)
            .ok_or_else(|| Rejection::new(404, "Journal batch not found"))?;

        if entry.status != BatchStatus::Draft {
            return Err(Rejection::new(409, "Only draft batches can be recalculated"));
        }

        if let Some(lines) = self.inner.batch_lines.get(id) {
            let mut debit = Decimal::ZERO;
            let mut credit = Decimal::ZERO;
            for (entry_type, amount) in lines.value() {
                match entry_type {
                    EntryType::Debit => debit += *amount,
                    EntryType::Credit => credit += *amount,
                }
            }
            entry.total_debit = debit;
            entry.total_credit = credit;
        }

        Ok(entry.value().clone())
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn adjust_balance(&self, account_id: &str, delta: Decimal) {
        if let Some(mut account) = self.inner.accounts.get_mut(account_id) {
            account.balance += delta;
            account.available_balance += delta;
        }
    }

    fn settle_leg(&self, transfer: &Transfer, account_id: &str, delta: Decimal) -> String {
        self.adjust_balance(account_id, delta);
        let txn = Transaction {
            id: format!("txn-{}", ulid::Ulid::new()),
            transaction_type: TransactionType::Transfer,
            status: TransactionStatus::Completed,
            amount: delta.abs(),
            currency: transfer.currency.clone(),
            account_id: account_id.to_string(),
            reference_type: Some("TRANSFER".to_string()),
            reference_id: Some(transfer.id.clone()),
            entries: Vec::new(),
            created_at: Utc::now(),
        };
        let id = txn.id.clone();
        self.inner.transactions.insert(id.clone(), txn);
        id
    }

    fn fee_leg(&self, transfer: &Transfer, fee: Decimal) -> String {
        let txn = Transaction {
            id: format!("txn-{}", ulid::Ulid::new()),
            transaction_type: TransactionType::Fee,
            status: TransactionStatus::Completed,
            amount: fee,
            currency: transfer.currency.clone(),
            account_id: transfer.from_account_id.clone(),
            reference_type: Some("TRANSFER".to_string()),
            reference_id: Some(transfer.id.clone()),
            entries: Vec::new(),
            created_at: Utc::now(),
        };
        let id = txn.id.clone();
        self.inner.transactions.insert(id.clone(), txn);
        id
    }
}

#[async_trait]
impl Backend for MockBank {
    async fn health(&self) -> Result<(), ApiError> {
        self.op_health()?;
        Ok(())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        Ok(self.op_list_customers()?)
    }

    async fn get_customer(&self, id: &str) -> Result<Customer, ApiError> {
        Ok(self.op_get_customer(id)?)
    }

    async fn create_customer(
        &self,
        req: &NewCustomer,
        _idempotency_key: &str,
    ) -> Result<Customer, ApiError> {
        Ok(self.op_create_customer(req)?)
    }

    async fn accounts_for_client(&self, client_id: &str) -> Result<Vec<Account>, ApiError> {
        Ok(self.op_list_accounts(Some(client_id))?)
    }

    async fn get_account(&self, id: &str) -> Result<Account, ApiError> {
        Ok(self.op_get_account(id)?)
    }

    async fn create_account(
        &self,
        req: &NewAccount,
        _idempotency_key: &str,
    ) -> Result<Account, ApiError> {
        Ok(self.op_create_account(req)?)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.op_list_products()?)
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.op_list_users()?)
    }

    async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        Ok(self.op_list_roles()?)
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, ApiError> {
        Ok(self.op_list_permissions()?)
    }

    async fn get_transaction(&self, id: &str) -> Result<Transaction, ApiError> {
        Ok(self.op_get_transaction(id)?)
    }

    async fn transactions_for_account(
        &self,
        account_id: &str,
    ) -> Result<Vec<Transaction>, ApiError> {
        Ok(self.op_list_transactions(Some(account_id))?)
    }

    async fn create_transaction(
        &self,
        req: &NewTransaction,
        _idempotency_key: &str,
    ) -> Result<Transaction, ApiError> {
        Ok(self.op_create_transaction(req)?)
    }

    async fn reverse_transaction(
        &self,
        id: &str,
        req: &ReverseTransactionRequest,
        _idempotency_key: &str,
    ) -> Result<Transaction, ApiError> {
        Ok(self.op_reverse_transaction(id, req)?)
    }

    async fn get_transfer(&self, id: &str) -> Result<Transfer, ApiError> {
        Ok(self.op_get_transfer(id)?)
    }

    async fn create_transfer(
        &self,
        req: &NewTransfer,
        idempotency_key: &str,
    ) -> Result<Transfer, ApiError> {
        Ok(self.op_create_transfer(req, idempotency_key)?)
    }

    async fn cancel_transfer(
        &self,
        id: &str,
        req: &CancelTransferRequest,
        _idempotency_key: &str,
    ) -> Result<Transfer, ApiError> {
        Ok(self.op_cancel_transfer(id, req)?)
    }

    async fn get_batch(&self, id: &str) -> Result<JournalBatch, ApiError> {
        Ok(self.op_get_batch(id)?)
    }

    async fn post_batch(
        &self,
        id: &str,
        _idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError> {
        Ok(self.op_post_batch(id)?)
    }

    async fn close_batch(
        &self,
        id: &str,
        _idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError> {
        Ok(self.op_close_batch(id)?)
    }

    async fn recalculate_batch(
        &self,
        id: &str,
        _idempotency_key: &str,
    ) -> Result<JournalBatch, ApiError> {
        Ok(self.op_recalculate_batch(id)?)
    }
}
