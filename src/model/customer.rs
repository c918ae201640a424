//! Customer (client) read model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// KYC/onboarding status.
///
/// Only `VERIFIED` customers are offered as transfer counterparties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    Draft,
    PendingReview,
    Verified,
    Rejected,
    Blocked,
}

impl CustomerStatus {
    #[inline]
    pub fn is_verified(&self) -> bool {
        matches!(self, CustomerStatus::Verified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Draft => "DRAFT",
            CustomerStatus::PendingReview => "PENDING_REVIEW",
            CustomerStatus::Verified => "VERIFIED",
            CustomerStatus::Rejected => "REJECTED",
            CustomerStatus::Blocked => "BLOCKED",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(CustomerStatus::Draft),
            "PENDING_REVIEW" => Ok(CustomerStatus::PendingReview),
            "VERIFIED" => Ok(CustomerStatus::Verified),
            "REJECTED" => Ok(CustomerStatus::Rejected),
            "BLOCKED" => Ok(CustomerStatus::Blocked),
            _ => Err(format!("unknown customer status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub display_name: String,
    pub status: CustomerStatus,
}

impl Customer {
    /// Eligible to appear in the origination counterparty pickers.
    #[inline]
    pub fn is_transfer_counterparty(&self) -> bool {
        self.status.is_verified()
    }
}
