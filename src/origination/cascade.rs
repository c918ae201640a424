//! Dependent-selection state machine for transfer origination
//!
//! Transition rules:
//! 1. Selecting a source client fetches that client's accounts (ACTIVE
//!    only) and resets the source account selection.
//! 2. Selecting a source account fixes the working currency from the
//!    already-fetched list (no extra fetch). A destination selection whose
//!    currency no longer matches is cleared.
//! 3. Selecting a destination client fetches that client's accounts; the
//!    ACTIVE + currency filter is re-applied whenever the source account
//!    changes.
//! 4. The destination list always excludes the source account.
//! 5. The fee preview recomputes whenever the source account or the amount
//!    changes.
//!
//! Every per-step fetch is tagged with a monotonic sequence number. A
//! resolution applies only while its tag is still the latest issued for
//! that step, so a response that was overtaken by a newer selection can
//! never overwrite fresher state.

use std::sync::Arc;

use tracing::debug;

use super::error::OriginationError;
use super::fee::{FeePreview, FeeSchedule};
use crate::gateway::{ApiError, Backend, NewTransfer};
use crate::idempotency::IdempotencyKey;
use crate::model::{Account, Customer, Transfer};
use crate::money;

/// Which dependent fetch a [`FetchTicket`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    SourceAccounts,
    DestinationAccounts,
}

/// Tag issued when a fetch is staged; pairs a step with its sequence
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    step: CascadeStep,
    seq: u64,
}

#[derive(Debug, Default)]
struct StepSequencer {
    issued: u64,
}

impl StepSequencer {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

/// Transfer origination form state.
///
/// All entity lists are transient copies; the backend stays authoritative
/// and is re-consulted on every client selection.
pub struct OriginationForm {
    backend: Arc<dyn Backend>,
    fees: FeeSchedule,

    customers: Vec<Customer>,

    from_client_id: Option<String>,
    from_accounts: Vec<Account>,
    from_account_id: Option<String>,

    to_client_id: Option<String>,
    to_accounts: Vec<Account>,
    to_account_id: Option<String>,

    amount_input: String,
    fee_preview: Option<FeePreview>,

    from_seq: StepSequencer,
    to_seq: StepSequencer,

    load_error: Option<String>,
}

impl OriginationForm {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_fee_schedule(backend, FeeSchedule::standard().clone())
    }

    pub fn with_fee_schedule(backend: Arc<dyn Backend>, fees: FeeSchedule) -> Self {
        Self {
            backend,
            fees,
            customers: Vec::new(),
            from_client_id: None,
            from_accounts: Vec::new(),
            from_account_id: None,
            to_client_id: None,
            to_accounts: Vec::new(),
            to_account_id: None,
            amount_input: String::new(),
            fee_preview: None,
            from_seq: StepSequencer::default(),
            to_seq: StepSequencer::default(),
            load_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn from_client_id(&self) -> Option<&str> {
        self.from_client_id.as_deref()
    }

    pub fn to_client_id(&self) -> Option<&str> {
        self.to_client_id.as_deref()
    }

    pub fn from_account_id(&self) -> Option<&str> {
        self.from_account_id.as_deref()
    }

    pub fn to_account_id(&self) -> Option<&str> {
        self.to_account_id.as_deref()
    }

    /// Resolved source account, if one is selected.
    pub fn from_account(&self) -> Option<&Account> {
        let id = self.from_account_id.as_deref()?;
        self.from_accounts.iter().find(|a| a.id == id)
    }

    /// Resolved destination account, if one is selected.
    pub fn to_account(&self) -> Option<&Account> {
        let id = self.to_account_id.as_deref()?;
        self.to_accounts.iter().find(|a| a.id == id)
    }

    /// Customers offered in both client pickers (VERIFIED only).
    pub fn customer_choices(&self) -> &[Customer] {
        &self.customers
    }

    /// Accounts offered in the source picker (ACTIVE only).
    pub fn source_choices(&self) -> &[Account] {
        &self.from_accounts
    }

    /// Accounts offered in the destination picker: ACTIVE, matching the
    /// working currency once a source account is chosen, and never the
    /// source account itself.
    pub fn destination_choices(&self) -> Vec<&Account> {
        let currency = self.from_account().map(|a| a.currency.as_str());
        self.to_accounts
            .iter()
            .filter(|a| match currency {
                Some(c) => a.currency == c,
                None => true,
            })
            .filter(|a| Some(a.id.as_str()) != self.from_account_id.as_deref())
            .collect()
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    /// Advisory estimate; `None` until a source account is selected and
    /// the amount parses.
    pub fn fee_preview(&self) -> Option<&FeePreview> {
        self.fee_preview.as_ref()
    }

    /// Inline load failure from the most recent account fetch.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    // ------------------------------------------------------------------
    // Customer pickers
    // ------------------------------------------------------------------

    /// Load the customer list for both client pickers, keeping only
    /// VERIFIED customers.
    pub async fn load_customers(&mut self) -> Result<(), OriginationError> {
        match self.backend.list_customers().await {
            Ok(customers) => {
                self.load_error = None;
                self.customers = customers
                    .into_iter()
                    .filter(|c| c.is_transfer_counterparty())
                    .collect();
                Ok(())
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
                Err(OriginationError::Api(e))
            }
        }
    }

    // ------------------------------------------------------------------
    // Source side (steps 1-2)
    // ------------------------------------------------------------------

    /// Record the source-client selection and issue a fetch ticket.
    ///
    /// Resets the dependent source-account selection immediately, before
    /// any response arrives.
    pub fn stage_source_fetch(&mut self, client_id: &str) -> FetchTicket {
        self.from_client_id = Some(client_id.to_string());
        self.from_account_id = None;
        self.from_accounts.clear();
        self.recompute_fee();
        FetchTicket {
            step: CascadeStep::SourceAccounts,
            seq: self.from_seq.issue(),
        }
    }

    /// Apply a resolved source-account fetch.
    ///
    /// Stale responses (a newer ticket has been issued for the step) are
    /// discarded without touching state.
    pub fn apply_source_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Account>, ApiError>,
    ) -> Result<(), OriginationError> {
        if ticket.step != CascadeStep::SourceAccounts || !self.from_seq.is_latest(ticket.seq) {
            debug!(seq = ticket.seq, "discarding stale source account fetch");
            return Ok(());
        }

        match result {
            Ok(accounts) => {
                self.load_error = None;
                self.from_accounts = accounts
                    .into_iter()
                    .filter(|a| a.is_transfer_eligible())
                    .collect();
                Ok(())
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
                Err(OriginationError::Api(e))
            }
        }
    }

    /// Select the source client and load its ACTIVE accounts.
    pub async fn select_from_client(&mut self, client_id: &str) -> Result<(), OriginationError> {
        let ticket = self.stage_source_fetch(client_id);
        let result = self.backend.accounts_for_client(client_id).await;
        self.apply_source_fetch(ticket, result)
    }

    /// Select the source account from the already-fetched list. Fixes the
    /// working currency; no extra fetch.
    pub fn select_from_account(&mut self, account_id: &str) -> Result<(), OriginationError> {
        if !self.from_accounts.iter().any(|a| a.id == account_id) {
            return Err(OriginationError::UnknownAccount(account_id.to_string()));
        }

        self.from_account_id = Some(account_id.to_string());
        self.revalidate_destination();
        self.recompute_fee();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Destination side (steps 3-4)
    // ------------------------------------------------------------------

    /// Record the destination-client selection and issue a fetch ticket.
    pub fn stage_destination_fetch(&mut self, client_id: &str) -> FetchTicket {
        self.to_client_id = Some(client_id.to_string());
        self.to_account_id = None;
        self.to_accounts.clear();
        FetchTicket {
            step: CascadeStep::DestinationAccounts,
            seq: self.to_seq.issue(),
        }
    }

    /// Apply a resolved destination-account fetch; stale responses are
    /// discarded.
    pub fn apply_destination_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Account>, ApiError>,
    ) -> Result<(), OriginationError> {
        if ticket.step != CascadeStep::DestinationAccounts || !self.to_seq.is_latest(ticket.seq) {
            debug!(seq = ticket.seq, "discarding stale destination account fetch");
            return Ok(());
        }

        match result {
            Ok(accounts) => {
                self.load_error = None;
                self.to_accounts = accounts
                    .into_iter()
                    .filter(|a| a.is_transfer_eligible())
                    .collect();
                Ok(())
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
                Err(OriginationError::Api(e))
            }
        }
    }

    /// Select the destination client and load its eligible accounts.
    pub async fn select_to_client(&mut self, client_id: &str) -> Result<(), OriginationError> {
        let ticket = self.stage_destination_fetch(client_id);
        let result = self.backend.accounts_for_client(client_id).await;
        self.apply_destination_fetch(ticket, result)
    }

    /// Select the destination account. Rejects the source account itself
    /// and any currency mismatch with the fixed working currency.
    pub fn select_to_account(&mut self, account_id: &str) -> Result<(), OriginationError> {
        let Some(account) = self.to_accounts.iter().find(|a| a.id == account_id) else {
            return Err(OriginationError::UnknownAccount(account_id.to_string()));
        };

        if self.from_account_id.as_deref() == Some(account_id) {
            return Err(OriginationError::SameAccount);
        }

        if let Some(from) = self.from_account()
            && account.currency != from.currency
        {
            return Err(OriginationError::CurrencyMismatch {
                expected: from.currency.clone(),
            });
        }

        self.to_account_id = Some(account_id.to_string());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Amount & fee (step 5)
    // ------------------------------------------------------------------

    /// Record the raw amount input and recompute the fee preview.
    pub fn set_amount(&mut self, input: &str) {
        self.amount_input = input.to_string();
        self.recompute_fee();
    }

    fn recompute_fee(&mut self) {
        self.fee_preview = match (self.from_account(), money::parse_amount(&self.amount_input)) {
            (Some(_), Ok(amount)) => Some(self.fees.preview(amount)),
            _ => None,
        };
    }

    /// Clear a destination selection that the current source selection has
    /// invalidated (currency mismatch or self-transfer).
    fn revalidate_destination(&mut self) {
        let Some(id) = self.to_account_id.clone() else {
            return;
        };
        let still_valid = self.destination_choices().iter().any(|a| a.id == id);
        if !still_valid {
            debug!(account_id = %id, "destination selection cleared by source change");
            self.to_account_id = None;
        }
    }

    // ------------------------------------------------------------------
    // Validation gate & submission
    // ------------------------------------------------------------------

    /// The pre-submission gate. All checks run without any network call.
    pub fn validate(&self) -> Result<(), OriginationError> {
        if self.from_client_id.is_none() {
            return Err(OriginationError::MissingSourceClient);
        }
        if self.to_client_id.is_none() {
            return Err(OriginationError::MissingDestinationClient);
        }

        let from = self
            .from_account_id
            .as_deref()
            .ok_or(OriginationError::MissingSourceAccount)?;
        let to = self
            .to_account_id
            .as_deref()
            .ok_or(OriginationError::MissingDestinationAccount)?;

        if from == to {
            return Err(OriginationError::SameAccount);
        }

        money::parse_amount(&self.amount_input)?;
        Ok(())
    }

    /// Validate, mint a fresh idempotency key, and create the transfer.
    ///
    /// On failure the backend message is passed through verbatim and the
    /// form state is left exactly as it was, so the user can correct and
    /// retry. A retry mints a new key: it is a new logical intent.
    pub async fn submit(&mut self) -> Result<Transfer, OriginationError> {
        self.validate()?;

        let from = self
            .from_account()
            .ok_or(OriginationError::MissingSourceAccount)?;

        let amount = money::parse_amount(&self.amount_input)?;
        let key = IdempotencyKey::generate("transfer");

        let req = NewTransfer {
            from_account_id: from.id.clone(),
            to_account_id: self
                .to_account_id
                .clone()
                .ok_or(OriginationError::MissingDestinationAccount)?,
            amount,
            currency: from.currency.clone(),
            idempotency_key: key.to_string(),
            description: None,
        };

        debug!(%key, from = %req.from_account_id, to = %req.to_account_id, "submitting transfer");
        let transfer = self.backend.create_transfer(&req, key.as_str()).await?;
        Ok(transfer)
    }
}
