//! Property-based tests for installment schedules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::scheduler::AmortizationScheduler;
use super::types::InstallmentPlanEntry;

/// Principal between 10,000.00 and 10,000,000.00 so every linear share is well above a cent.
fn principal_strategy() -> impl Strategy<Value = Decimal> {
    (1_000_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Monthly interest percentage between 0.01% and 5.00%.
fn interest_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=500i64).prop_map(|bps| Decimal::new(bps, 2))
}

fn first_due_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2040, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .or_else(|| NaiveDate::from_ymd_opt(y, m, 28))
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Linear plans sum to the principal to the cent.
    #[test]
    fn prop_linear_sum_equals_principal(
        principal in principal_strategy(),
        installments in 1u32..=120,
        first_due in first_due_strategy(),
    ) {
        let plan = AmortizationScheduler::generate_schedule(principal, installments, None, first_due)
            .unwrap();

        prop_assert_eq!(plan.len(), installments as usize);
        prop_assert_eq!(InstallmentPlanEntry::total_amount(&plan), principal);
        prop_assert!(plan.iter().all(|entry| entry.amount > Decimal::ZERO));
        prop_assert!(plan.iter().all(|entry| entry.amount.scale() <= 2));
    }

    /// Amortized plans repay exactly the principal; everything else is interest.
    #[test]
    fn prop_price_principal_portions_sum_to_principal(
        principal in principal_strategy(),
        installments in 1u32..=120,
        interest in interest_strategy(),
        first_due in first_due_strategy(),
    ) {
        let plan = AmortizationScheduler::generate_schedule(
            principal,
            installments,
            Some(interest),
            first_due,
        )
        .unwrap();

        let repaid: Decimal = plan.iter().map(|entry| entry.principal_portion).sum();
        prop_assert_eq!(repaid, principal);
        prop_assert_eq!(
            InstallmentPlanEntry::total_amount(&plan),
            principal + InstallmentPlanEntry::total_interest(&plan)
        );
        prop_assert_eq!(plan.last().unwrap().remaining_balance, Decimal::ZERO);
        prop_assert!(plan.iter().all(|entry| entry.amount > Decimal::ZERO));
        prop_assert!(plan.iter().all(|entry| entry.interest_portion >= Decimal::ZERO));
    }

    /// Numbers are contiguous from 1 and due dates strictly increase month by month.
    #[test]
    fn prop_numbers_and_dates_are_ordered(
        principal in principal_strategy(),
        installments in 1u32..=60,
        interest in proptest::option::of(interest_strategy()),
        first_due in first_due_strategy(),
    ) {
        let plan = AmortizationScheduler::generate_schedule(principal, installments, interest, first_due)
            .unwrap();

        prop_assert_eq!(plan[0].due_date, first_due);
        for (index, entry) in plan.iter().enumerate() {
            prop_assert_eq!(entry.number as usize, index + 1);
        }
        for pair in plan.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
    }
}
