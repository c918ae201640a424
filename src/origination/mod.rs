//! Transfer origination workflow
//!
//! The cascading dependent-selection form: source client → source account
//! (fixes the working currency) → destination client → destination account,
//! with a live advisory fee preview and a validation gate in front of
//! submission.

pub mod cascade;
pub mod error;
pub mod fee;

pub use cascade::{CascadeStep, FetchTicket, OriginationForm};
pub use error::OriginationError;
pub use fee::{FeePreview, FeeSchedule};
