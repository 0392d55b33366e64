//! Monthly income, expense and debt aggregation.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::SnapshotService;
pub use types::{MonthLedger, MonthlySnapshot, MonthlyTotals};
