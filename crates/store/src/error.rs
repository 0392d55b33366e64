//! Store error types.

use lendbook_core::ledger::LedgerError;
use lendbook_shared::AppError;
use lendbook_shared::types::{AgreementId, DebtorId, InstallmentId};
use thiserror::Error;

/// Errors from loading, saving or mutating the ledger store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document was written by an unknown format version.
    #[error("Unsupported ledger document version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// Debtor does not exist.
    #[error("Debtor {0} not found")]
    DebtorNotFound(DebtorId),

    /// Agreement does not exist.
    #[error("Agreement {0} not found")]
    AgreementNotFound(AgreementId),

    /// Installment does not exist.
    #[error("Installment {0} not found")]
    InstallmentNotFound(InstallmentId),

    /// A write-side rule rejected the mutation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A writer panicked while holding the store lock.
    #[error("Ledger store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Ledger(inner) => inner.into(),
            StoreError::DebtorNotFound(_)
            | StoreError::AgreementNotFound(_)
            | StoreError::InstallmentNotFound(_) => Self::NotFound(err.to_string()),
            StoreError::Poisoned => Self::Internal(err.to_string()),
            StoreError::Io(_) | StoreError::Json(_) | StoreError::UnsupportedVersion { .. } => {
                Self::Persistence(err.to_string())
            }
        }
    }
}
