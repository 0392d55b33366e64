//! Monthly snapshot types.

use lendbook_shared::types::CalendarMonth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{DebtAgreement, FixedExpense, Installment, Payment, SalaryRecord, Transaction};

/// The component amounts a snapshot is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    /// Salary in force for the month.
    pub salary: Decimal,
    /// Installment payments received in the month.
    pub payments_received: Decimal,
    /// Paid variable income.
    pub variable_income: Decimal,
    /// Fixed expenses applying to the month.
    pub fixed_expenses: Decimal,
    /// Paid variable expenses.
    pub variable_expenses: Decimal,
    /// Remaining balance of overdue installments.
    pub overdue_amount: Decimal,
    /// Distinct debtors with an active agreement.
    pub active_debtors: u32,
    /// Agreements active in the month.
    pub active_agreements: u32,
}

/// Aggregate of one calendar month's cash flow and debt position.
///
/// Only constructed through [`MonthlySnapshot::from_totals`], which derives
/// the income, expense and balance totals from their components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Month described.
    pub reference_month: CalendarMonth,
    /// Salary in force.
    pub salary: Decimal,
    /// Installment payments received.
    pub payments_received: Decimal,
    /// Paid variable income.
    pub variable_income: Decimal,
    /// `salary + payments_received + variable_income`.
    pub total_income: Decimal,
    /// Fixed expenses.
    pub fixed_expenses: Decimal,
    /// Paid variable expenses.
    pub variable_expenses: Decimal,
    /// `fixed_expenses + variable_expenses`.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub net_balance: Decimal,
    /// Remaining balance of overdue installments.
    pub overdue_amount: Decimal,
    /// Distinct debtors with an active agreement.
    pub active_debtors: u32,
    /// Agreements active in the month.
    pub active_agreements: u32,
}

impl MonthlySnapshot {
    /// Builds a snapshot, deriving the totals from the components.
    #[must_use]
    pub fn from_totals(reference_month: CalendarMonth, totals: MonthlyTotals) -> Self {
        let total_income = totals.salary + totals.payments_received + totals.variable_income;
        let total_expenses = totals.fixed_expenses + totals.variable_expenses;

        Self {
            reference_month,
            salary: totals.salary,
            payments_received: totals.payments_received,
            variable_income: totals.variable_income,
            total_income,
            fixed_expenses: totals.fixed_expenses,
            variable_expenses: totals.variable_expenses,
            total_expenses,
            net_balance: total_income - total_expenses,
            overdue_amount: totals.overdue_amount,
            active_debtors: totals.active_debtors,
            active_agreements: totals.active_agreements,
        }
    }

    /// Returns true if any variable income or expense was recorded.
    #[must_use]
    pub fn has_variable_activity(&self) -> bool {
        !self.variable_income.is_zero() || !self.variable_expenses.is_zero()
    }
}

/// Raw ledger rows a snapshot is folded from.
///
/// Rows outside the month are tolerated and filtered out, so one fetch can
/// feed several months.
#[derive(Debug, Clone, Default)]
pub struct MonthLedger {
    /// All salary records.
    pub salary_records: Vec<SalaryRecord>,
    /// All fixed-expense templates.
    pub fixed_expenses: Vec<FixedExpense>,
    /// Payments, at least those dated in the month.
    pub payments: Vec<Payment>,
    /// Variable transactions, at least those dated in the month.
    pub transactions: Vec<Transaction>,
    /// Agreements owning the installments.
    pub agreements: Vec<DebtAgreement>,
    /// Installments, at least those due on or before the month's last day.
    pub installments: Vec<Installment>,
}
