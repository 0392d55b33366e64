//! Installment plan types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a principal is split into installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMethod {
    /// Equal shares of the principal, no interest.
    Linear,
    /// Fixed payment from the annuity formula (Price / French table).
    Price,
}

/// One entry of a generated installment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPlanEntry {
    /// Installment number (1-based, contiguous).
    pub number: u32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Amount owed for this installment, rounded to cents.
    pub amount: Decimal,
    /// Portion of `amount` that repays principal.
    pub principal_portion: Decimal,
    /// Portion of `amount` that pays interest.
    pub interest_portion: Decimal,
    /// Principal still owed after this installment.
    pub remaining_balance: Decimal,
}

impl InstallmentPlanEntry {
    /// Sums the amounts of a plan.
    #[must_use]
    pub fn total_amount(plan: &[Self]) -> Decimal {
        plan.iter().map(|entry| entry.amount).sum()
    }

    /// Sums the interest portions of a plan.
    #[must_use]
    pub fn total_interest(plan: &[Self]) -> Decimal {
        plan.iter().map(|entry| entry.interest_portion).sum()
    }
}
