//! Cash-flow projection engine.
//!
//! Contractual flows (salary, installment receivables, fixed expenses) are
//! read forward from the ledger. Variable flows are extrapolated from the
//! paid history of the closed months before today and scaled per scenario.

use chrono::NaiveDate;
use lendbook_shared::types::{CalendarMonth, MONEY_ROUNDING, round_money, safe_div};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::ProjectionError;
use super::scenario::Scenario;
use super::types::{CashFlowProjection, HistoricalBaseline, ScenarioProjections};
use crate::ledger::{FixedExpense, Installment, LedgerReader, ReadError, SalaryRecord};
use crate::snapshot::SnapshotService;

/// Longest accepted projection horizon in months.
pub const MAX_PROJECTION_MONTHS: u32 = 60;

/// Default number of closed months the baseline looks back over.
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 6;

/// Confidence lost per month beyond the first.
const CONFIDENCE_DECAY: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Contractual ledger rows covering the projection horizon.
struct ForwardLedger {
    salary_records: Vec<SalaryRecord>,
    fixed_expenses: Vec<FixedExpense>,
    installments: Vec<Installment>,
}

/// Projects monthly cash flow under the three scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CashFlowProjector {
    lookback_months: u32,
}

impl CashFlowProjector {
    /// Creates a projector looking back over `lookback_months` closed months
    /// (at least one).
    #[must_use]
    pub fn new(lookback_months: u32) -> Self {
        Self {
            lookback_months: lookback_months.max(1),
        }
    }

    /// Number of closed months the baseline covers.
    #[must_use]
    pub const fn lookback_months(&self) -> u32 {
        self.lookback_months
    }

    /// Computes the variable cash-flow baseline as of `today`.
    ///
    /// The current month is excluded; only paid transactions count. Sums are
    /// averaged over the whole window, so a one-off month is diluted rather
    /// than extrapolated. `active_months` only feeds confidence coverage.
    ///
    /// # Errors
    ///
    /// Returns the reader's `ReadError` unchanged.
    pub fn historical_baseline<R>(
        &self,
        reader: &R,
        today: NaiveDate,
    ) -> Result<HistoricalBaseline, ReadError>
    where
        R: LedgerReader + ?Sized,
    {
        let current = CalendarMonth::from_date(today);
        let first_month = current.offset(-i32::try_from(self.lookback_months).unwrap_or(i32::MAX));
        let last_month = current.prev();

        let snapshots = SnapshotService::compute_range(reader, first_month, last_month, today)?;
        let active_months = snapshots
            .iter()
            .filter(|snapshot| snapshot.has_variable_activity())
            .count();
        let active_months = u32::try_from(active_months).unwrap_or(u32::MAX);

        let income: Decimal = snapshots.iter().map(|snapshot| snapshot.variable_income).sum();
        let expenses: Decimal = snapshots.iter().map(|snapshot| snapshot.variable_expenses).sum();
        let divisor = Decimal::from(self.lookback_months);

        Ok(HistoricalBaseline {
            first_month,
            last_month,
            lookback_months: self.lookback_months,
            active_months,
            average_variable_income: round_money(safe_div(income, divisor)),
            average_variable_expenses: round_money(safe_div(expenses, divisor)),
        })
    }

    /// Projects `months` future months under `scenario`, starting with the
    /// month after `today`'s month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonths` when `months` is outside `1..=60` and `Read`
    /// when the ledger cannot be read.
    pub fn project_cash_flow<R>(
        &self,
        months: u32,
        scenario: Scenario,
        reader: &R,
        today: NaiveDate,
    ) -> Result<Vec<CashFlowProjection>, ProjectionError>
    where
        R: LedgerReader + ?Sized,
    {
        Self::validate_months(months)?;

        let baseline = self.historical_baseline(reader, today)?;
        let targets = CalendarMonth::from_date(today).following(months);
        let forward = Self::forward_ledger(reader, &targets)?;

        let table = Self::project_table(&baseline, &forward, &targets, scenario);

        info!(
            %scenario,
            months,
            active_months = baseline.active_months,
            "projected cash flow"
        );

        Ok(table)
    }

    /// Projects all three scenarios from a single read of the ledger.
    ///
    /// # Errors
    ///
    /// Same as [`Self::project_cash_flow`].
    pub fn project_all_scenarios<R>(
        &self,
        months: u32,
        reader: &R,
        today: NaiveDate,
    ) -> Result<ScenarioProjections, ProjectionError>
    where
        R: LedgerReader + ?Sized,
    {
        Self::validate_months(months)?;

        let baseline = self.historical_baseline(reader, today)?;
        let targets = CalendarMonth::from_date(today).following(months);
        let forward = Self::forward_ledger(reader, &targets)?;

        let project = |scenario| Self::project_table(&baseline, &forward, &targets, scenario);
        let optimistic = project(Scenario::Optimistic);
        let realistic = project(Scenario::Realistic);
        let pessimistic = project(Scenario::Pessimistic);

        info!(
            months,
            active_months = baseline.active_months,
            "projected cash flow for all scenarios"
        );

        Ok(ScenarioProjections {
            baseline,
            optimistic,
            realistic,
            pessimistic,
        })
    }

    /// Confidence of the projection `month_index` months after the first
    /// (0-based), scaled by history coverage and rounded to 2 dp.
    #[must_use]
    pub fn confidence(scenario: Scenario, month_index: u32, coverage: Decimal) -> Decimal {
        let decayed = (scenario.base_confidence() - CONFIDENCE_DECAY * Decimal::from(month_index))
            .max(scenario.confidence_floor());
        (decayed * coverage).round_dp_with_strategy(2, MONEY_ROUNDING)
    }

    fn validate_months(months: u32) -> Result<(), ProjectionError> {
        if (1..=MAX_PROJECTION_MONTHS).contains(&months) {
            Ok(())
        } else {
            Err(ProjectionError::InvalidMonths {
                months,
                max: MAX_PROJECTION_MONTHS,
            })
        }
    }

    fn forward_ledger<R>(reader: &R, targets: &[CalendarMonth]) -> Result<ForwardLedger, ReadError>
    where
        R: LedgerReader + ?Sized,
    {
        let installments = match (targets.first(), targets.last()) {
            (Some(first), Some(last)) => {
                reader.installments_due_between(first.first_day(), last.last_day())?
            }
            _ => Vec::new(),
        };

        Ok(ForwardLedger {
            salary_records: reader.salary_records()?,
            fixed_expenses: reader.fixed_expenses()?,
            installments,
        })
    }

    /// Builds one scenario's table.
    ///
    /// Variable components are rounded to cents after the scenario
    /// multiplier, so averages below a few cents can make all three
    /// scenarios coincide.
    fn project_table(
        baseline: &HistoricalBaseline,
        forward: &ForwardLedger,
        targets: &[CalendarMonth],
        scenario: Scenario,
    ) -> Vec<CashFlowProjection> {
        let coverage = baseline.coverage();
        let variable_income =
            round_money(baseline.average_variable_income * scenario.income_multiplier());
        let variable_expenses =
            round_money(baseline.average_variable_expenses * scenario.expense_multiplier());

        let mut cumulative = Decimal::ZERO;
        targets
            .iter()
            .zip(0u32..)
            .map(|(&month, index)| {
                let salary = SalaryRecord::in_force(&forward.salary_records, month);
                let payments: Decimal = forward
                    .installments
                    .iter()
                    .filter(|installment| month.contains(installment.due_date))
                    .map(Installment::remaining)
                    .sum();
                let fixed: Decimal = forward
                    .fixed_expenses
                    .iter()
                    .filter(|expense| expense.applies_to(month))
                    .map(|expense| expense.amount)
                    .sum();

                let total_income = salary + payments + variable_income;
                let total_expenses = fixed + variable_expenses;
                let balance = total_income - total_expenses;
                cumulative += balance;

                debug!(%month, %scenario, %balance, "projected month");

                CashFlowProjection {
                    target_month: month,
                    scenario,
                    projected_salary: salary,
                    projected_payments: payments,
                    projected_variable_income: variable_income,
                    total_projected_income: total_income,
                    projected_fixed_expenses: fixed,
                    projected_variable_expenses: variable_expenses,
                    total_projected_expenses: total_expenses,
                    projected_balance: balance,
                    cumulative_balance: cumulative,
                    confidence_level: Self::confidence(scenario, index, coverage),
                }
            })
            .collect()
    }
}

impl Default for CashFlowProjector {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK_MONTHS)
    }
}
