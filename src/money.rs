//! Amount parsing and equilibrium helpers
//!
//! All monetary values are `rust_decimal::Decimal` — exact, no float drift.

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Tolerance for the double-entry equilibrium check (|debit - credit|).
///
/// Advisory only: the backend independently re-validates before posting.
pub const EQUILIBRIUM_EPSILON: &str = "0.01";

/// Rejected amount input: empty, non-numeric, zero or negative.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Amount must be a positive number")]
pub struct InvalidAmount;

/// Parse a user-entered amount string into a strictly positive Decimal.
///
/// Rejects empty input, non-numeric text, zero, and negative values.
/// Scientific notation is not accepted.
pub fn parse_amount(input: &str) -> Result<Decimal, InvalidAmount> {
    let s = input.trim();

    if s.is_empty() {
        return Err(InvalidAmount);
    }

    if s.contains(['e', 'E']) {
        return Err(InvalidAmount);
    }

    let amount = Decimal::from_str(s).map_err(|_| InvalidAmount)?;

    if amount <= Decimal::ZERO {
        return Err(InvalidAmount);
    }

    Ok(amount)
}

/// Equilibrium epsilon as a Decimal.
pub fn equilibrium_epsilon() -> Decimal {
    Decimal::from_str(EQUILIBRIUM_EPSILON).expect("epsilon literal is valid")
}

/// Check the double-entry invariant within [`EQUILIBRIUM_EPSILON`].
pub fn is_balanced(total_debit: Decimal, total_credit: Decimal) -> bool {
    (total_debit - total_credit).abs() < equilibrium_epsilon()
}
