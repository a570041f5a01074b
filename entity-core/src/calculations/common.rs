//! Shared helpers for tax amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use entity_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole currency units, half-up.
///
/// ```
/// use rust_decimal_macros::dec;
/// use entity_core::calculations::common::round_to_dollars;
///
/// assert_eq!(round_to_dollars(dec!(14129.55)), dec!(14130));
/// assert_eq!(round_to_dollars(dec!(6479.49)), dec!(6479));
/// ```
pub fn round_to_dollars(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero when it is negative.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
