//! Status-gated entity actions
//!
//! Client-side gating mirrors, but never replaces, server-side enforcement:
//! the tables in [`guard`] decide which actions are offered for a status,
//! and [`runner::ActionRunner`] executes a guarded action end-to-end
//! (confirmation check, idempotency key, API call, re-fetch, toast).

pub mod error;
pub mod guard;
pub mod runner;

pub use error::ActionError;
pub use guard::{
    BatchAction, BatchEquilibrium, ConfirmationKind, TransactionAction, TransferAction,
    batch_actions, transaction_actions, transfer_actions,
};
pub use runner::ActionRunner;
