//! Transfer read model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transfer lifecycle status.
///
/// Cancellation is permitted only while `PENDING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl TransferStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransferStatus::Completed | TransferStatus::Failed | TransferStatus::Cancelled
        )
    }

    /// Cancel is only offered while the transfer is still `PENDING`.
    #[inline]
    pub fn can_cancel(&self) -> bool {
        matches!(self, TransferStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "PENDING",
            TransferStatus::Processing => "PROCESSING",
            TransferStatus::Completed => "COMPLETED",
            TransferStatus::Failed => "FAILED",
            TransferStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransferStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransferStatus::Pending),
            "PROCESSING" => Ok(TransferStatus::Processing),
            "COMPLETED" => Ok(TransferStatus::Completed),
            "FAILED" => Ok(TransferStatus::Failed),
            "CANCELLED" => Ok(TransferStatus::Cancelled),
            _ => Err(format!("unknown transfer status: {}", s)),
        }
    }
}

/// Transfer between two customer accounts.
///
/// Invariants enforced server-side and gated client-side:
/// `from_account_id != to_account_id`; `currency` equals the source
/// account's currency. Links up to three transactions once processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub status: TransferStatus,
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: Decimal,
    pub currency: String,
    /// Authoritative fee, computed by the backend at submission time.
    pub fee_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
