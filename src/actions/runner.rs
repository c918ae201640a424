//! Guarded action execution
//!
//! One method per guarded action. Each runs the same sequence: client-side
//! status gate → justification check (where required) → fresh idempotency
//! key → API call → re-fetch of the entity → toast. On failure the backend
//! message is toasted verbatim and nothing else changes, so the action
//! stays retryable.
//!
//! The confirmation prompt itself is the shell's responsibility; callers
//! invoke these methods only after the user has confirmed.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::ActionError;
use super::guard;
use crate::feedback::ToastSender;
use crate::gateway::{ApiError, Backend, CancelTransferRequest, ReverseTransactionRequest};
use crate::idempotency::IdempotencyKey;
use crate::model::{BatchStatus, JournalBatch, Transaction, Transfer};

pub struct ActionRunner {
    backend: Arc<dyn Backend>,
    toasts: ToastSender,
}

impl ActionRunner {
    pub fn new(backend: Arc<dyn Backend>, toasts: ToastSender) -> Self {
        Self { backend, toasts }
    }

    /// Reverse a COMPLETED transaction. `reason` must be non-empty.
    pub async fn reverse_transaction(
        &self,
        txn: &Transaction,
        reason: &str,
    ) -> Result<Transaction, ActionError> {
        if guard::transaction_actions(txn.status).is_empty() {
            return Err(ActionError::NotAllowed(format!(
                "Transactions in status {} cannot be reversed",
                txn.status
            )));
        }

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ActionError::ReasonRequired);
        }

        let key = IdempotencyKey::generate("txn-reverse");
        let req = ReverseTransactionRequest {
            reason: reason.to_string(),
        };

        debug!(transaction_id = %txn.id, %key, "reversing transaction");
        if let Err(e) = self
            .backend
            .reverse_transaction(&txn.id, &req, key.as_str())
            .await
        {
            return Err(self.fail(e));
        }

        let refreshed = self.refetch_transaction(&txn.id).await?;
        info!(transaction_id = %txn.id, "transaction reversed");
        self.toasts.success("Transaction reversed");
        Ok(refreshed)
    }

    /// Cancel a PENDING transfer. `reason` must be non-empty.
    pub async fn cancel_transfer(
        &self,
        transfer: &Transfer,
        reason: &str,
    ) -> Result<Transfer, ActionError> {
        if guard::transfer_actions(transfer.status).is_empty() {
            return Err(ActionError::NotAllowed(format!(
                "Transfers in status {} cannot be cancelled",
                transfer.status
            )));
        }

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ActionError::ReasonRequired);
        }

        let key = IdempotencyKey::generate("transfer-cancel");
        let req = CancelTransferRequest {
            reason: reason.to_string(),
        };

        debug!(transfer_id = %transfer.id, %key, "cancelling transfer");
        if let Err(e) = self
            .backend
            .cancel_transfer(&transfer.id, &req, key.as_str())
            .await
        {
            return Err(self.fail(e));
        }

        let refreshed = match self.backend.get_transfer(&transfer.id).await {
            Ok(t) => t,
            Err(e) => return Err(self.fail(e)),
        };
        info!(transfer_id = %transfer.id, "transfer cancelled");
        self.toasts.success("Transfer cancelled");
        Ok(refreshed)
    }

    /// Post a DRAFT batch. Blocked client-side while out of equilibrium;
    /// the backend re-validates independently either way.
    pub async fn post_batch(&self, batch: &JournalBatch) -> Result<JournalBatch, ActionError> {
        if batch.status != BatchStatus::Draft {
            return Err(ActionError::NotAllowed(format!(
                "Batches in status {} cannot be posted",
                batch.status
            )));
        }
        if !batch.is_balanced() {
            return Err(ActionError::NotBalanced {
                difference: batch.imbalance(),
            });
        }

        let key = IdempotencyKey::generate("batch-post");
        debug!(batch_id = %batch.id, %key, "posting batch");
        if let Err(e) = self.backend.post_batch(&batch.id, key.as_str()).await {
            return Err(self.fail(e));
        }

        let refreshed = self.refetch_batch(&batch.id).await?;
        info!(batch_id = %batch.id, "batch posted");
        self.toasts.success("Batch posted");
        Ok(refreshed)
    }

    /// Close a POSTED batch.
    pub async fn close_batch(&self, batch: &JournalBatch) -> Result<JournalBatch, ActionError> {
        if batch.status != BatchStatus::Posted {
            return Err(ActionError::NotAllowed(format!(
                "Batches in status {} cannot be closed",
                batch.status
            )));
        }

        let key = IdempotencyKey::generate("batch-close");
        debug!(batch_id = %batch.id, %key, "closing batch");
        if let Err(e) = self.backend.close_batch(&batch.id, key.as_str()).await {
            return Err(self.fail(e));
        }

        let refreshed = self.refetch_batch(&batch.id).await?;
        info!(batch_id = %batch.id, "batch closed");
        self.toasts.success("Batch closed");
        Ok(refreshed)
    }

    /// Recompute a DRAFT batch's totals server-side.
    pub async fn recalculate_batch(
        &self,
        batch: &JournalBatch,
    ) -> Result<JournalBatch, ActionError> {
        if batch.status != BatchStatus::Draft {
            return Err(ActionError::NotAllowed(format!(
                "Batches in status {} cannot be recalculated",
                batch.status
            )));
        }

        let key = IdempotencyKey::generate("batch-recalc");
        debug!(batch_id = %batch.id, %key, "recalculating batch totals");
        if let Err(e) = self.backend.recalculate_batch(&batch.id, key.as_str()).await {
            return Err(self.fail(e));
        }

        let refreshed = self.refetch_batch(&batch.id).await?;
        self.toasts.success("Batch totals recalculated");
        Ok(refreshed)
    }

    async fn refetch_transaction(&self, id: &str) -> Result<Transaction, ActionError> {
        self.backend
            .get_transaction(id)
            .await
            .map_err(|e| self.fail(e))
    }

    async fn refetch_batch(&self, id: &str) -> Result<JournalBatch, ActionError> {
        self.backend.get_batch(id).await.map_err(|e| self.fail(e))
    }

    fn fail(&self, e: ApiError) -> ActionError {
        self.toasts.error(e.to_string());
        ActionError::Api(e)
    }
}
