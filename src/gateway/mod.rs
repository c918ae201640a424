//! Typed REST gateway to the core banking backend
//!
//! One async method per backend operation, uniform error decoding, no
//! caching and no retries. Idempotency keys are supplied by callers; this
//! layer only transports them.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, Backend};
pub use error::ApiError;
pub use types::{
    CancelTransferRequest, NewAccount, NewCustomer, NewTransaction, NewTransfer,
    ReverseTransactionRequest,
};
