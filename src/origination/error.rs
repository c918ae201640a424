//! Origination workflow errors

use thiserror::Error;

use crate::gateway::ApiError;

/// Everything that can block or fail the origination workflow.
///
/// Client-side validation variants are raised before any network call;
/// `Api` passes the backend's decoded message through verbatim.
#[derive(Error, Debug)]
pub enum OriginationError {
    #[error("Select a source client")]
    MissingSourceClient,

    #[error("Select a source account")]
    MissingSourceAccount,

    #[error("Select a destination client")]
    MissingDestinationClient,

    #[error("Select a destination account")]
    MissingDestinationAccount,

    #[error("Source and destination accounts must be different")]
    SameAccount,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Destination account currency must match {expected}")]
    CurrencyMismatch { expected: String },

    #[error("Account is not in the current selection: {0}")]
    UnknownAccount(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl OriginationError {
    /// True when the error was produced without a network round-trip.
    pub fn is_client_side(&self) -> bool {
        !matches!(self, OriginationError::Api(_))
    }
}

impl From<crate::money::InvalidAmount> for OriginationError {
    fn from(_: crate::money::InvalidAmount) -> Self {
        OriginationError::InvalidAmount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_is_verbatim() {
        let err = OriginationError::Api(ApiError::Http {
            status: 400,
            message: "Insufficient funds".into(),
        });
        assert_eq!(err.to_string(), "Insufficient funds");
        assert!(!err.is_client_side());
    }

    #[test]
    fn test_validation_errors_are_client_side() {
        assert!(OriginationError::SameAccount.is_client_side());
        assert!(OriginationError::InvalidAmount.is_client_side());
    }
}
