//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal`; every rounding goes through
//! [`round_money`] so the whole workspace rounds the same way.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fraction digits kept for monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounding rule for every monetary amount (banker's rounding).
pub const MONEY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

/// Smallest representable monetary unit (one cent).
pub const MONEY_UNIT: Decimal = Decimal::from_parts(1, 0, 0, false, MONEY_SCALE);

/// Rounds an amount to cents using round-half-even.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, MONEY_ROUNDING)
}

/// Divides two decimals, resolving a zero denominator to zero.
///
/// Ratio fields (collection rate, on-time rate, averages) must never
/// raise or produce a non-number when there is nothing to divide by.
#[must_use]
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
    }
}

/// Expresses `part / whole` as a percentage rounded to cents.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    round_money(safe_div(part, whole) * Decimal::ONE_HUNDRED)
}

/// Clamps a negative amount to zero.
#[must_use]
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(2.345), dec!(2.34))]
    #[case(dec!(2.355), dec!(2.36))]
    #[case(dec!(2.3451), dec!(2.35))]
    #[case(dec!(-2.345), dec!(-2.34))]
    #[case(dec!(100), dec!(100.00))]
    fn test_round_money_half_even(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_money(input), expected);
    }

    #[test]
    fn test_money_unit_is_one_cent() {
        assert_eq!(MONEY_UNIT, dec!(0.01));
    }

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_div(dec!(10), dec!(4)), dec!(2.5));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(dec!(-3)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(3)), dec!(3));
    }
}
