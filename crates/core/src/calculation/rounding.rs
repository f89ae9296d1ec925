//! Cent rounding for reported amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use super::types::RoundingMode;

/// Decimal places of every reported monetary amount.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds to cents with standard rounding (halves away from zero).
///
/// The result always carries exactly two decimal places, so `200` becomes `200.00`.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    round_with_strategy(amount, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to cents following the given rounding mode.
#[must_use]
pub fn round_with_mode(amount: Decimal, mode: RoundingMode) -> Decimal {
    round_with_strategy(amount, mode.strategy())
}

fn round_with_strategy(amount: Decimal, strategy: RoundingStrategy) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, strategy);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}
