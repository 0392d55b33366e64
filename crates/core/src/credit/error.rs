//! Credit scoring error types.

use lendbook_shared::AppError;
use thiserror::Error;

use crate::ledger::ReadError;

/// Credit scoring errors.
///
/// Scoring itself never fails on malformed or empty history; only the
/// history read can.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreditError {
    /// Debtor history could not be read.
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl From<CreditError> for AppError {
    fn from(err: CreditError) -> Self {
        match err {
            CreditError::Read(inner) => inner.into(),
        }
    }
}
