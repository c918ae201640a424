//! ledgerdesk - Banking Back-Office Workflow Client
//!
//! The client side of a core-banking back office: typed REST gateway,
//! transfer origination, status-gated entity actions and workflow feedback.
//!
//! # Modules
//!
//! - [`model`] - Transient entity read models (accounts, customers, ...)
//! - [`gateway`] - Typed REST client with uniform error decoding
//! - [`idempotency`] - De-duplication token generation
//! - [`money`] - Amount parsing and the equilibrium epsilon
//! - [`origination`] - The dependent-selection transfer form
//! - [`actions`] - Status-gated actions (reverse, cancel, post, close)
//! - [`feedback`] - Last-write-wins toast channel
//! - [`config`] - YAML config with env override
//! - [`mock_api`] - In-process mock backend (feature `mock-api`)

pub mod actions;
pub mod config;
pub mod feedback;
pub mod gateway;
pub mod idempotency;
pub mod logging;
pub mod model;
pub mod money;
pub mod origination;

#[cfg(feature = "mock-api")]
pub mod mock_api;

// Convenient re-exports at crate root
pub use actions::{ActionError, ActionRunner, BatchEquilibrium};
pub use config::AppConfig;
pub use feedback::{Toast, ToastKind, ToastReceiver, ToastSender, toast_channel};
pub use gateway::{ApiClient, ApiError, Backend};
pub use idempotency::IdempotencyKey;
pub use origination::{OriginationError, OriginationForm};
