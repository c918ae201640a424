//! Guarded-action errors

use thiserror::Error;

use crate::gateway::ApiError;

#[derive(Error, Debug)]
pub enum ActionError {
    /// The entity's current status does not permit the action.
    #[error("{0}")]
    NotAllowed(String),

    /// Reversal and cancellation require a non-empty justification.
    #[error("A reason is required for this action")]
    ReasonRequired,

    /// Posting a batch that is out of equilibrium is blocked client-side.
    #[error("Batch is not balanced: debits and credits differ by {difference}")]
    NotBalanced { difference: rust_decimal::Decimal },

    /// Backend rejection, message shown verbatim.
    #[error(transparent)]
    Api(#[from] ApiError),
}
