//! Read seam between the computation core and persistence.

use chrono::NaiveDate;

use super::error::ReadError;
use super::types::{DebtAgreement, FixedExpense, Installment, Payment, SalaryRecord, Transaction};

/// Read-only access to ledger entities.
///
/// This trait is implemented by the store crate. Implementations must return
/// point-in-time consistent data; the core performs no locking of its own.
/// Empty collections are valid "no data" answers, not errors.
pub trait LedgerReader {
    /// Monotonic counter bumped on every ledger mutation.
    ///
    /// Used as a cache key component; two reads with the same revision must
    /// return the same data.
    fn revision(&self) -> u64;

    /// All debt agreements.
    fn agreements(&self) -> Result<Vec<DebtAgreement>, ReadError>;

    /// Installments whose due date falls in `start..=end`.
    fn installments_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Installment>, ReadError>;

    /// Payments dated in `start..=end`.
    fn payments_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Payment>, ReadError>;

    /// Variable transactions dated in `start..=end`, paid and pending alike.
    fn transactions_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, ReadError>;

    /// All salary records.
    fn salary_records(&self) -> Result<Vec<SalaryRecord>, ReadError>;

    /// All fixed-expense templates, active or not.
    fn fixed_expenses(&self) -> Result<Vec<FixedExpense>, ReadError>;
}
