//! Journal batch read model

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// Journal batch lifecycle. Transitions are one-directional:
/// `DRAFT → POSTED → CLOSED`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Draft,
    Posted,
    Closed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Draft => "DRAFT",
            BatchStatus::Posted => "POSTED",
            BatchStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(BatchStatus::Draft),
            "POSTED" => Ok(BatchStatus::Posted),
            "CLOSED" => Ok(BatchStatus::Closed),
            _ => Err(format!("unknown batch status: {}", s)),
        }
    }
}

/// Journal batch totals as reported by the backend.
///
/// `POSTED` is reachable only when the batch is in equilibrium
/// (`total_debit == total_credit` within epsilon); the server re-validates
/// independently of the client-side gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalBatch {
    pub id: String,
    pub status: BatchStatus,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JournalBatch {
    /// |debit - credit|, for the equilibrium badge.
    pub fn imbalance(&self) -> Decimal {
        (self.total_debit - self.total_credit).abs()
    }

    /// Advisory equilibrium check; never a substitute for the server's.
    pub fn is_balanced(&self) -> bool {
        money::is_balanced(self.total_debit, self.total_credit)
    }
}
