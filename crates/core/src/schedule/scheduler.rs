//! Installment schedule generation.

use chrono::{Months, NaiveDate};
use lendbook_shared::types::{MONEY_UNIT, round_money};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::ScheduleError;
use super::types::{InstallmentPlanEntry, ScheduleMethod};

/// Generates installment plans for new agreements.
///
/// All arithmetic is exact decimal; amounts round half-even to cents and
/// the final installment absorbs whatever rounding left over.
pub struct AmortizationScheduler;

impl AmortizationScheduler {
    /// Generates the installment plan for an agreement.
    ///
    /// `monthly_interest` is a raw percentage (`2` means 2% per month). It is
    /// converted to a fraction here and nowhere else. `None` or zero selects
    /// linear division.
    ///
    /// # Errors
    ///
    /// - `NonPositivePrincipal` / `ZeroInstallments` / `NegativeInterestRate`
    ///   for malformed arguments
    /// - `PrincipalTooSmall` if either plan would produce an installment below one cent
    /// - `Overflow` / `DateOutOfRange` when the plan exceeds decimal or calendar range
    pub fn generate_schedule(
        principal: Decimal,
        installments: u32,
        monthly_interest: Option<Decimal>,
        first_due_date: NaiveDate,
    ) -> Result<Vec<InstallmentPlanEntry>, ScheduleError> {
        let principal = round_money(principal);
        if principal <= Decimal::ZERO {
            return Err(ScheduleError::NonPositivePrincipal(principal));
        }
        if installments == 0 {
            return Err(ScheduleError::ZeroInstallments);
        }
        if let Some(percent) = monthly_interest
            && percent < Decimal::ZERO
        {
            return Err(ScheduleError::NegativeInterestRate(percent));
        }

        let method = Self::method_for(monthly_interest);
        let plan = match (method, monthly_interest) {
            (ScheduleMethod::Price, Some(percent)) => Self::price_plan(
                principal,
                installments,
                Self::percentage_to_rate(percent),
                first_due_date,
            )?,
            _ => Self::linear_plan(principal, installments, first_due_date)?,
        };

        debug!(
            %principal,
            installments,
            ?method,
            total = %InstallmentPlanEntry::total_amount(&plan),
            "generated installment schedule"
        );

        Ok(plan)
    }

    /// Picks the schedule method for an optional interest percentage.
    #[must_use]
    pub fn method_for(monthly_interest: Option<Decimal>) -> ScheduleMethod {
        match monthly_interest {
            Some(percent) if !percent.is_zero() => ScheduleMethod::Price,
            _ => ScheduleMethod::Linear,
        }
    }

    /// Converts a percentage (`2` for 2%) into a fractional rate (`0.02`).
    #[must_use]
    pub fn percentage_to_rate(percent: Decimal) -> Decimal {
        percent / Decimal::ONE_HUNDRED
    }

    /// Computes the unrounded annuity payment `P × r / (1 − (1+r)^−n)`.
    ///
    /// Evaluated as `P × r × f / (f − 1)` with `f = (1+r)^n` so every
    /// intermediate value stays an exact decimal.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the compounding factor leaves decimal range.
    pub fn fixed_payment(
        principal: Decimal,
        rate: Decimal,
        installments: u32,
    ) -> Result<Decimal, ScheduleError> {
        if rate.is_zero() {
            return Ok(principal / Decimal::from(installments));
        }

        let growth = Decimal::ONE + rate;
        let mut factor = Decimal::ONE;
        for period in 1..=installments {
            factor = factor
                .checked_mul(growth)
                .ok_or(ScheduleError::Overflow { periods: period })?;
        }

        let overflow = ScheduleError::Overflow {
            periods: installments,
        };
        principal
            .checked_mul(rate)
            .and_then(|value| value.checked_mul(factor))
            .and_then(|value| value.checked_div(factor - Decimal::ONE))
            .ok_or(overflow)
    }

    /// Due date of the installment at `index` (0-based).
    ///
    /// Always offset from the first due date so a day-31 schedule returns to
    /// day 31 after passing through shorter months.
    pub fn due_date(first_due_date: NaiveDate, index: u32) -> Result<NaiveDate, ScheduleError> {
        first_due_date
            .checked_add_months(Months::new(index))
            .ok_or(ScheduleError::DateOutOfRange(index + 1))
    }

    fn linear_plan(
        principal: Decimal,
        installments: u32,
        first_due_date: NaiveDate,
    ) -> Result<Vec<InstallmentPlanEntry>, ScheduleError> {
        let share = round_money(principal / Decimal::from(installments));
        let last = principal - share * Decimal::from(installments - 1);
        if share < MONEY_UNIT || last < MONEY_UNIT {
            return Err(ScheduleError::PrincipalTooSmall {
                principal,
                installments,
            });
        }

        let mut plan = Vec::with_capacity(installments as usize);
        let mut balance = principal;
        for index in 0..installments {
            let amount = if index + 1 == installments { last } else { share };
            balance -= amount;
            plan.push(InstallmentPlanEntry {
                number: index + 1,
                due_date: Self::due_date(first_due_date, index)?,
                amount,
                principal_portion: amount,
                interest_portion: Decimal::ZERO,
                remaining_balance: balance,
            });
        }
        Ok(plan)
    }

    fn price_plan(
        principal: Decimal,
        installments: u32,
        rate: Decimal,
        first_due_date: NaiveDate,
    ) -> Result<Vec<InstallmentPlanEntry>, ScheduleError> {
        let payment = round_money(Self::fixed_payment(principal, rate, installments)?);
        let too_small = ScheduleError::PrincipalTooSmall {
            principal,
            installments,
        };
        if payment < MONEY_UNIT {
            return Err(too_small);
        }

        let mut plan = Vec::with_capacity(installments as usize);
        let mut balance = principal;
        for index in 0..installments {
            let interest = round_money(balance * rate);
            let (amount, principal_portion) = if index + 1 == installments {
                (balance + interest, balance)
            } else {
                // Never amortize past the outstanding balance.
                let portion = (payment - interest).min(balance);
                (portion + interest, portion)
            };
            if amount < MONEY_UNIT {
                return Err(too_small);
            }
            balance -= principal_portion;
            plan.push(InstallmentPlanEntry {
                number: index + 1,
                due_date: Self::due_date(first_due_date, index)?,
                amount,
                principal_portion,
                interest_portion: interest,
                remaining_balance: balance,
            });
        }
        Ok(plan)
    }
}
