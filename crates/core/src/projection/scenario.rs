//! Projection scenarios.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tenth, the spread between scenarios.
const SPREAD: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// A what-if stance on variable income and expenses.
///
/// Salary, installment receivables and fixed expenses are contractual and
/// never scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Variable income up 10%, variable expenses down 10%.
    Optimistic,
    /// Historical averages unchanged.
    Realistic,
    /// Variable income down 10%, variable expenses up 10%.
    Pessimistic,
}

impl Scenario {
    /// Every scenario, optimistic first.
    pub const ALL: [Self; 3] = [Self::Optimistic, Self::Realistic, Self::Pessimistic];

    /// Multiplier applied to average variable income.
    #[must_use]
    pub fn income_multiplier(self) -> Decimal {
        match self {
            Self::Optimistic => Decimal::ONE + SPREAD,
            Self::Realistic => Decimal::ONE,
            Self::Pessimistic => Decimal::ONE - SPREAD,
        }
    }

    /// Multiplier applied to average variable expenses.
    #[must_use]
    pub fn expense_multiplier(self) -> Decimal {
        match self {
            Self::Optimistic => Decimal::ONE - SPREAD,
            Self::Realistic => Decimal::ONE,
            Self::Pessimistic => Decimal::ONE + SPREAD,
        }
    }

    /// Confidence for the first projected month, before coverage scaling.
    #[must_use]
    pub const fn base_confidence(self) -> Decimal {
        match self {
            Self::Realistic => Decimal::from_parts(80, 0, 0, false, 2),
            Self::Optimistic | Self::Pessimistic => Decimal::from_parts(60, 0, 0, false, 2),
        }
    }

    /// Lowest confidence reached by decay, before coverage scaling.
    #[must_use]
    pub const fn confidence_floor(self) -> Decimal {
        match self {
            Self::Realistic => Decimal::from_parts(30, 0, 0, false, 2),
            Self::Optimistic | Self::Pessimistic => Decimal::from_parts(20, 0, 0, false, 2),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Optimistic => "optimistic",
            Self::Realistic => "realistic",
            Self::Pessimistic => "pessimistic",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(Scenario::Optimistic, dec!(1.1), dec!(0.9))]
    #[case(Scenario::Realistic, dec!(1), dec!(1))]
    #[case(Scenario::Pessimistic, dec!(0.9), dec!(1.1))]
    fn test_multipliers(
        #[case] scenario: Scenario,
        #[case] income: Decimal,
        #[case] expense: Decimal,
    ) {
        assert_eq!(scenario.income_multiplier(), income);
        assert_eq!(scenario.expense_multiplier(), expense);
    }

    #[test]
    fn test_realistic_is_most_confident() {
        for scenario in [Scenario::Optimistic, Scenario::Pessimistic] {
            assert!(Scenario::Realistic.base_confidence() > scenario.base_confidence());
            assert!(Scenario::Realistic.confidence_floor() > scenario.confidence_floor());
        }
    }

    #[test]
    fn test_display_matches_serde() {
        assert_eq!(Scenario::Pessimistic.to_string(), "pessimistic");
        assert_eq!(
            serde_json::to_string(&Scenario::Optimistic).unwrap(),
            "\"optimistic\""
        );
    }
}
