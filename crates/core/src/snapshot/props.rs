//! Property-based tests for snapshot additivity.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::SnapshotService;
use super::types::{MonthlySnapshot, MonthlyTotals};
use crate::ledger::{TransactionKind, TransactionStatus};
use crate::test_support::{VecLedger, date, month};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn totals_strategy() -> impl Strategy<Value = MonthlyTotals> {
    (
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
    )
        .prop_map(
            |(salary, payments_received, variable_income, fixed_expenses, variable_expenses, overdue_amount)| {
                MonthlyTotals {
                    salary,
                    payments_received,
                    variable_income,
                    fixed_expenses,
                    variable_expenses,
                    overdue_amount,
                    active_debtors: 0,
                    active_agreements: 0,
                }
            },
        )
}

fn transaction_strategy() -> impl Strategy<Value = (bool, Decimal, u32, bool)> {
    (any::<bool>(), amount_strategy(), 1u32..=31, any::<bool>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Totals are always the sums of their components.
    #[test]
    fn prop_snapshot_totals_are_additive(totals in totals_strategy()) {
        let snapshot = MonthlySnapshot::from_totals(month(2026, 5), totals.clone());

        prop_assert_eq!(
            snapshot.total_income,
            totals.salary + totals.payments_received + totals.variable_income
        );
        prop_assert_eq!(
            snapshot.total_expenses,
            totals.fixed_expenses + totals.variable_expenses
        );
        prop_assert_eq!(snapshot.net_balance, snapshot.total_income - snapshot.total_expenses);
    }

    /// Variable totals count exactly the paid transactions dated in the month.
    #[test]
    fn prop_only_paid_transactions_count(
        entries in proptest::collection::vec(transaction_strategy(), 0..40),
    ) {
        let mut ledger = VecLedger::default();
        let mut expected_income = Decimal::ZERO;
        let mut expected_expenses = Decimal::ZERO;

        for (is_income, amount, day, paid) in entries {
            let kind = if is_income { TransactionKind::Income } else { TransactionKind::Expense };
            let status = if paid { TransactionStatus::Paid } else { TransactionStatus::Pending };
            // July has 31 days, so every generated day is valid.
            ledger = ledger.transaction(kind, amount, date(2026, 7, day), status);
            match (is_income, paid) {
                (true, true) => expected_income += amount,
                (false, true) => expected_expenses += amount,
                _ => {}
            }
        }

        let snapshot = SnapshotService::compute_month(&ledger, month(2026, 7), date(2026, 8, 1))
            .unwrap();

        prop_assert_eq!(snapshot.variable_income, expected_income);
        prop_assert_eq!(snapshot.variable_expenses, expected_expenses);
        prop_assert_eq!(snapshot.net_balance, expected_income - expected_expenses);
    }
}
