use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Convert a decimal price in major units to integer minor currency
/// units (cents), rounding midpoints away from zero.
///
/// Settlement amounts sent to the payment provider must be integers;
/// doing the multiplication on `Decimal` keeps `2499.99` at exactly
/// `249999` instead of drifting through a float.
///
/// Returns `None` when the result does not fit an `i64`.
pub fn to_minor_units(price: Decimal) -> Option<i64> {
    price
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
