//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Module errors in the core convert into this taxonomy so presentation
/// callers only translate one set of codes into user-facing messages.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input (e.g. a non-positive principal).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule violation (e.g. paying more than is owed).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// The ledger store could not read or write data.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Arithmetic could not be carried out within decimal range.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Arithmetic(_) => "ARITHMETIC_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the same call could succeed.
    ///
    /// Only persistence failures qualify; the core itself never retries.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}
