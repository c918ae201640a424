//! Mutating request payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::TransactionType;

/// Payload for `POST /api/transfers`.
///
/// The idempotency key travels both in the `Idempotency-Key` header and in
/// the body, matching what the backend's de-duplication layer expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub idempotency_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `POST /api/customers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub display_name: String,
}

/// Payload for `POST /api/accounts`.
///
/// New accounts open with zero balances; the backend assigns the account
/// number and the initial status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub client_id: String,
    /// ISO currency code, e.g. "USD"
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

/// Payload for `POST /api/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub account_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `POST /api/transactions/{id}/reverse`.
/// `reason` is mandatory and non-empty; the guard layer enforces it before
/// the request is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseTransactionRequest {
    pub reason: String,
}

/// Payload for `POST /api/transfers/{id}/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelTransferRequest {
    pub reason: String,
}
