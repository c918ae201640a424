//! Legal actions per entity status
//!
//! | Entity       | Status                | Enabled actions                     |
//! |--------------|-----------------------|-------------------------------------|
//! | Transaction  | COMPLETED             | Reverse (reason required)           |
//! | Transaction  | anything else         | none                                |
//! | Transfer     | PENDING               | Cancel (reason required)            |
//! | Transfer     | anything else         | none                                |
//! | JournalBatch | DRAFT                 | Recalculate; Post (if balanced)     |
//! | JournalBatch | POSTED                | Close                               |
//! | JournalBatch | CLOSED                | none                                |

use std::fmt;

use rust_decimal::Decimal;

use crate::model::{JournalBatch, TransactionStatus, TransferStatus};

/// What the UI must collect before the action may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationKind {
    /// Blocking yes/no prompt.
    Confirm,
    /// Blocking prompt with a mandatory free-text justification.
    ConfirmWithReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionAction {
    Reverse,
}

impl TransactionAction {
    pub fn confirmation(&self) -> ConfirmationKind {
        ConfirmationKind::ConfirmWithReason
    }

    pub fn as_str(&self) -> &'static str {
        "Reverse"
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    Cancel,
}

impl TransferAction {
    pub fn confirmation(&self) -> ConfirmationKind {
        ConfirmationKind::ConfirmWithReason
    }

    pub fn as_str(&self) -> &'static str {
        "Cancel"
    }
}

impl fmt::Display for TransferAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchAction {
    RecalculateTotals,
    Post,
    Close,
}

impl BatchAction {
    pub fn confirmation(&self) -> ConfirmationKind {
        ConfirmationKind::Confirm
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchAction::RecalculateTotals => "Recalculate totals",
            BatchAction::Post => "Post",
            BatchAction::Close => "Close",
        }
    }
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actions offered for a transaction in `status`.
pub fn transaction_actions(status: TransactionStatus) -> Vec<TransactionAction> {
    if status.can_reverse() {
        vec![TransactionAction::Reverse]
    } else {
        Vec::new()
    }
}

/// Actions offered for a transfer in `status`.
pub fn transfer_actions(status: TransferStatus) -> Vec<TransferAction> {
    if status.can_cancel() {
        vec![TransferAction::Cancel]
    } else {
        Vec::new()
    }
}

/// Actions offered for a journal batch. Post is withheld while the batch is
/// out of equilibrium; the server re-validates regardless.
pub fn batch_actions(batch: &JournalBatch) -> Vec<BatchAction> {
    use crate::model::BatchStatus;

    match batch.status {
        BatchStatus::Draft => {
            let mut actions = vec![BatchAction::RecalculateTotals];
            if batch.is_balanced() {
                actions.push(BatchAction::Post);
            }
            actions
        }
        BatchStatus::Posted => vec![BatchAction::Close],
        BatchStatus::Closed => Vec::new(),
    }
}

/// Display-only equilibrium summary for the batch badge.
///
/// Advisory: computed client-side for responsiveness, never a second source
/// of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEquilibrium {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub difference: Decimal,
    pub balanced: bool,
}

impl BatchEquilibrium {
    pub fn of(batch: &JournalBatch) -> Self {
        Self {
            total_debit: batch.total_debit,
            total_credit: batch.total_credit,
            difference: batch.imbalance(),
            balanced: batch.is_balanced(),
        }
    }

    /// Explanatory text next to the badge.
    pub fn message(&self) -> String {
        if self.balanced {
            "Debits and credits are in equilibrium".to_string()
        } else {
            format!(
                "Out of equilibrium: debits {} vs credits {} (difference {})",
                self.total_debit, self.total_credit, self.difference
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BatchStatus;
    use std::str::FromStr;

    fn batch(status: BatchStatus, debit: &str, credit: &str) -> JournalBatch {
        JournalBatch {
            id: "jb-1".into(),
            status,
            total_debit: Decimal::from_str(debit).unwrap(),
            total_credit: Decimal::from_str(credit).unwrap(),
            currency: "USD".into(),
            description: None,
        }
    }

    #[test]
    fn test_reverse_offered_only_for_completed() {
        assert_eq!(
            transaction_actions(TransactionStatus::Completed),
            vec![TransactionAction::Reverse]
        );
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Processing,
            TransactionStatus::Failed,
            TransactionStatus::Reversed,
        ] {
            assert!(transaction_actions(status).is_empty());
        }
    }

    #[test]
    fn test_cancel_offered_only_for_pending() {
        assert_eq!(
            transfer_actions(TransferStatus::Pending),
            vec![TransferAction::Cancel]
        );
        for status in [
            TransferStatus::Processing,
            TransferStatus::Completed,
            TransferStatus::Failed,
            TransferStatus::Cancelled,
        ] {
            assert!(transfer_actions(status).is_empty());
        }
    }

    #[test]
    fn test_draft_batch_offers_post_only_when_balanced() {
        let balanced = batch(BatchStatus::Draft, "1000.00", "1000.00");
        assert_eq!(
            batch_actions(&balanced),
            vec![BatchAction::RecalculateTotals, BatchAction::Post]
        );

        let skewed = batch(BatchStatus::Draft, "1000.00", "999.99");
        assert_eq!(batch_actions(&skewed), vec![BatchAction::RecalculateTotals]);
    }

    #[test]
    fn test_batch_lifecycle_actions() {
        assert_eq!(
            batch_actions(&batch(BatchStatus::Posted, "10", "10")),
            vec![BatchAction::Close]
        );
        assert!(batch_actions(&batch(BatchStatus::Closed, "10", "10")).is_empty());
    }

    #[test]
    fn test_equilibrium_badge_reports_discrepancy() {
        let eq = BatchEquilibrium::of(&batch(BatchStatus::Draft, "1000.00", "999.99"));
        assert!(!eq.balanced);
        assert_eq!(eq.difference.to_string(), "0.01");
        assert!(eq.message().contains("0.01"));
    }

    #[test]
    fn test_reason_requirements() {
        assert_eq!(
            TransactionAction::Reverse.confirmation(),
            ConfirmationKind::ConfirmWithReason
        );
        assert_eq!(
            TransferAction::Cancel.confirmation(),
            ConfirmationKind::ConfirmWithReason
        );
        assert_eq!(BatchAction::Post.confirmation(), ConfirmationKind::Confirm);
    }
}
