//! Backend entity read models
//!
//! Transient, non-authoritative copies of the entities owned by the core
//! banking backend. The client never persists these beyond the lifetime of a
//! page view and always re-fetches after a mutating action.

pub mod account;
pub mod admin;
pub mod customer;
pub mod journal;
pub mod transaction;
pub mod transfer;

pub use account::{Account, AccountStatus};
pub use admin::{Permission, Product, Role, User};
pub use customer::{Customer, CustomerStatus};
pub use journal::{BatchStatus, JournalBatch};
pub use transaction::{
    EntryType, Transaction, TransactionEntry, TransactionStatus, TransactionType,
};
pub use transfer::{Transfer, TransferStatus};
