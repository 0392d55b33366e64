//! Projection error types.

use lendbook_shared::AppError;
use thiserror::Error;

use crate::ledger::ReadError;

/// Projection-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// Projection horizon out of range.
    #[error("Projection months must be between 1 and {max}, got {months}")]
    InvalidMonths {
        /// Requested horizon.
        months: u32,
        /// Largest accepted horizon.
        max: u32,
    },

    /// Ledger data could not be read.
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl From<ProjectionError> for AppError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::InvalidMonths { .. } => Self::Validation(err.to_string()),
            ProjectionError::Read(inner) => inner.into(),
        }
    }
}
