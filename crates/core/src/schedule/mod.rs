//! Installment plan generation.
//!
//! Splits a principal into monthly installments, either by linear division
//! or by Price (French) amortization when a monthly interest percentage is
//! supplied.

pub mod error;
pub mod scheduler;
pub mod types;

#[cfg(test)]
mod props;

pub use error::ScheduleError;
pub use scheduler::AmortizationScheduler;
pub use types::{InstallmentPlanEntry, ScheduleMethod};
