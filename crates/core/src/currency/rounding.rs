//! Monetary rounding.
//!
//! Every amount that crosses a currency conversion or enters a balance or
//! settlement is rounded here, so repeated conversions cannot drift by
//! fractions of a cent. Rounds half-up (ties away from zero), the usual
//! behavior for money shown to people.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to `precision` decimal places.
///
/// Uses `RoundingStrategy::MidpointAwayFromZero`: 0.125 -> 0.13 and
/// -0.125 -> -0.13 at two decimal places. Idempotent.
#[must_use]
pub fn round_money(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Zero tolerance for balances at the given precision: one hundredth of the
/// currency's minor unit (`10^-(precision + 2)`).
#[must_use]
pub fn epsilon(precision: u32) -> Decimal {
    Decimal::new(1, precision + 2)
}

/// Returns true if `value` is within [`epsilon`] of zero, i.e. the balance
/// counts as settled.
#[must_use]
pub fn is_settled(value: Decimal, precision: u32) -> bool {
    value.abs() <= epsilon(precision)
}
