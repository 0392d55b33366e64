//! Financial computation core for Lendbook.
//!
//! This crate contains pure business logic with ZERO storage or UI dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Debtors, agreements, installments, payments and the read seams
//! - `schedule` - Installment plan generation (linear and Price amortization)
//! - `credit` - Debtor credit scoring
//! - `snapshot` - Monthly income/expense aggregation
//! - `projection` - Scenario-based cash-flow projections

pub mod credit;
pub mod ledger;
pub mod projection;
pub mod schedule;
pub mod snapshot;

#[cfg(test)]
mod test_support;
