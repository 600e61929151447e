//! Common utility functions for the calculators.
//!
//! Rounding and input coercion shared by the personal tax, scenario and
//! sweep calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(276848.004)), dec!(276848.00));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps an amount into the non-negative domain.
///
/// The engine coerces rather than rejects: a negative salary or revenue is
/// treated as zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-10.00)), dec!(0));
/// assert_eq!(non_negative(dec!(10.00)), dec!(10.00));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
