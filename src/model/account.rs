//! Customer-facing account read model

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account lifecycle status.
///
/// Only `ACTIVE` accounts are selectable as transfer participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Closed,
    Frozen,
    Suspended,
}

impl AccountStatus {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Closed => "CLOSED",
            AccountStatus::Frozen => "FROZEN",
            AccountStatus::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(AccountStatus::Active),
            "CLOSED" => Ok(AccountStatus::Closed),
            "FROZEN" => Ok(AccountStatus::Frozen),
            "SUSPENDED" => Ok(AccountStatus::Suspended),
            _ => Err(format!("unknown account status: {}", s)),
        }
    }
}

/// Account as returned by the backend.
///
/// `balance` and `available_balance` are server-computed; the client never
/// derives them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub account_number: String,
    pub status: AccountStatus,
    /// ISO currency code, e.g. "USD"
    pub currency: String,
    pub balance: Decimal,
    pub available_balance: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl Account {
    /// Eligible as a transfer participant (source or destination).
    #[inline]
    pub fn is_transfer_eligible(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(status: AccountStatus) -> Account {
        Account {
            id: "acc-1".into(),
            account_number: "1000001".into(),
            status,
            currency: "USD".into(),
            balance: Decimal::from(500),
            available_balance: Decimal::from(500),
            client_id: Some("cli-1".into()),
            product_id: None,
        }
    }

    #[test]
    fn test_only_active_is_transfer_eligible() {
        assert!(account(AccountStatus::Active).is_transfer_eligible());
        assert!(!account(AccountStatus::Closed).is_transfer_eligible());
        assert!(!account(AccountStatus::Frozen).is_transfer_eligible());
        assert!(!account(AccountStatus::Suspended).is_transfer_eligible());
    }

    #[test]
    fn test_status_wire_form() {
        let json = serde_json::to_string(&AccountStatus::Frozen).unwrap();
        assert_eq!(json, "\"FROZEN\"");

        let status: AccountStatus = serde_json::from_str("\"SUSPENDED\"").unwrap();
        assert_eq!(status, AccountStatus::Suspended);
    }

    #[test]
    fn test_account_deserializes_camel_case() {
        let json = r#"{
            "id": "acc-9",
            "accountNumber": "1000009",
            "status": "ACTIVE",
            "currency": "EUR",
            "balance": "120.50",
            "availableBalance": "100.00",
            "clientId": "cli-2"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_number, "1000009");
        assert_eq!(account.available_balance, Decimal::from(100));
        assert_eq!(account.product_id, None);
    }
}
