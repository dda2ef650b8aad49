//! Rounding helpers.
//!
//! Amounts round half away from zero, as peso amounts are printed on a
//! settlement statement. Banker's rounding is never used.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a peso amount or day count to 2 decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate to 4 decimal places.
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
