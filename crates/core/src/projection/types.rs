//! Projection data types.

use lendbook_shared::types::CalendarMonth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scenario::Scenario;

/// Variable cash-flow averages over the closed months before today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalBaseline {
    /// Oldest month of the lookback window.
    pub first_month: CalendarMonth,
    /// Newest month of the lookback window (the month before the current one).
    pub last_month: CalendarMonth,
    /// Number of months in the window.
    pub lookback_months: u32,
    /// Months in the window with any paid variable income or expense.
    pub active_months: u32,
    /// Paid variable income averaged over the whole window.
    pub average_variable_income: Decimal,
    /// Paid variable expenses averaged over the whole window.
    pub average_variable_expenses: Decimal,
}

impl HistoricalBaseline {
    /// Share of the window backed by data, floored at one quarter.
    #[must_use]
    pub fn coverage(&self) -> Decimal {
        let floor = Decimal::from_parts(25, 0, 0, false, 2);
        if self.lookback_months == 0 {
            return floor;
        }
        (Decimal::from(self.active_months) / Decimal::from(self.lookback_months))
            .min(Decimal::ONE)
            .max(floor)
    }
}

/// Projected cash flow for one future month under one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    /// Month projected.
    pub target_month: CalendarMonth,
    /// Scenario applied.
    pub scenario: Scenario,
    /// Salary in force for the month.
    pub projected_salary: Decimal,
    /// Installment balances falling due in the month.
    pub projected_payments: Decimal,
    /// Scaled average variable income.
    pub projected_variable_income: Decimal,
    /// `projected_salary + projected_payments + projected_variable_income`.
    pub total_projected_income: Decimal,
    /// Fixed expenses applying to the month.
    pub projected_fixed_expenses: Decimal,
    /// Scaled average variable expenses.
    pub projected_variable_expenses: Decimal,
    /// `projected_fixed_expenses + projected_variable_expenses`.
    pub total_projected_expenses: Decimal,
    /// `total_projected_income - total_projected_expenses`.
    pub projected_balance: Decimal,
    /// Running sum of `projected_balance` up to and including this month.
    pub cumulative_balance: Decimal,
    /// Confidence from 0 to 1 (2 dp).
    pub confidence_level: Decimal,
}

/// The three scenario tables of one projection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProjections {
    /// Baseline every table was derived from.
    pub baseline: HistoricalBaseline,
    /// Optimistic table.
    pub optimistic: Vec<CashFlowProjection>,
    /// Realistic table.
    pub realistic: Vec<CashFlowProjection>,
    /// Pessimistic table.
    pub pessimistic: Vec<CashFlowProjection>,
}

impl ScenarioProjections {
    /// The table for `scenario`.
    #[must_use]
    pub fn table(&self, scenario: Scenario) -> &[CashFlowProjection] {
        match scenario {
            Scenario::Optimistic => &self.optimistic,
            Scenario::Realistic => &self.realistic,
            Scenario::Pessimistic => &self.pessimistic,
        }
    }
}
