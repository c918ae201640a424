//! Advisory transfer fee preview
//!
//! A client-side estimate only. The authoritative fee is computed by the
//! backend at submission time and may differ; nothing here gates anything
//! the backend does not independently re-check.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default transfer fee rate in basis points (50 = 0.50%).
pub const DEFAULT_TRANSFER_FEE_BPS: u32 = 50;

/// Basis-point denominator.
const BPS_SCALE: u32 = 10_000;

static DEFAULT_SCHEDULE: Lazy<FeeSchedule> = Lazy::new(FeeSchedule::default);

/// Bounded percentage fee model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub rate_bps: u32,
    pub min_fee: Decimal,
    pub max_fee: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            rate_bps: DEFAULT_TRANSFER_FEE_BPS,
            min_fee: Decimal::ZERO,
            // 100.00 cap
            max_fee: Decimal::new(10_000, 2),
        }
    }
}

impl FeeSchedule {
    /// Shared default schedule.
    pub fn standard() -> &'static FeeSchedule {
        &DEFAULT_SCHEDULE
    }

    /// Estimate the fee for `amount`, rounded to cents and clamped to
    /// `[min_fee, max_fee]`.
    pub fn preview(&self, amount: Decimal) -> FeePreview {
        let raw = amount * Decimal::from(self.rate_bps) / Decimal::from(BPS_SCALE);
        let mut fee = raw.round_dp(2).clamp(self.min_fee, self.max_fee);
        // Fixed two-place scale so "0.5" renders as "0.50"
        fee.rescale(2);
        FeePreview {
            fee,
            total_required: amount + fee,
        }
    }
}

/// Display-only estimate, distinct from the authoritative
/// [`Transfer::fee_amount`](crate::model::Transfer::fee_amount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePreview {
    pub fee: Decimal,
    /// Amount the source account must cover: transfer amount + fee.
    pub total_required: Decimal,
}
