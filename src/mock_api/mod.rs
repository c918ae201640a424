//! In-process mock backend (feature `mock-api`)
//!
//! A small in-memory rendition of the core banking API, used by the
//! integration tests and the local demo mode. It enforces the same rules
//! the real backend would (idempotency-key dedup, insufficient funds,
//! status-gated reversal/cancel/post/close, batch equilibrium) so the
//! client's re-fetch-after-mutate behavior can be exercised end to end.
//!
//! MUST be disabled in production builds.

pub mod routes;
pub mod store;

pub use routes::serve;
pub use store::{MockBank, Rejection};
