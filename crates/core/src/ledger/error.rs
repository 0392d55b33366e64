//! Ledger error types for validation and read failures.

use lendbook_shared::AppError;
use lendbook_shared::types::InstallmentId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::schedule::ScheduleError;

/// A read collaborator could not supply data.
///
/// Carries the collaborator's message; the core never substitutes partial
/// data for a failed read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Ledger read failed: {0}")]
pub struct ReadError(pub String);

impl ReadError {
    /// Creates a read error from any displayable cause.
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self(cause.to_string())
    }
}

impl From<ReadError> for AppError {
    fn from(err: ReadError) -> Self {
        Self::Persistence(err.0)
    }
}

/// Errors raised by the write-side ledger helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Installment plan could not be generated.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Payment amount must be positive.
    #[error("Payment amount must be positive, got {0}")]
    NonPositivePayment(Decimal),

    /// Installment is already fully paid.
    #[error("Installment {0} is already paid")]
    AlreadyPaid(InstallmentId),

    /// Payment exceeds what is still owed.
    #[error("Payment of {attempted} exceeds remaining balance {remaining} on installment {installment_id}")]
    Overpayment {
        /// Installment being paid.
        installment_id: InstallmentId,
        /// Remaining balance.
        remaining: Decimal,
        /// Attempted payment.
        attempted: Decimal,
    },

    /// Debtor name cannot be blank.
    #[error("Debtor name cannot be empty")]
    EmptyDebtorName,

    /// Transaction or expense amount must be positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Due day must be a valid day of month.
    #[error("Due day must be between 1 and 31, got {0}")]
    InvalidDueDay(u32),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Schedule(inner) => inner.into(),
            LedgerError::AlreadyPaid(_) | LedgerError::Overpayment { .. } => {
                Self::BusinessRule(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_read_error_maps_to_persistence() {
        let app: AppError = ReadError::new("disk unplugged").into();
        assert_eq!(app.error_code(), "PERSISTENCE_ERROR");
        assert!(app.to_string().contains("disk unplugged"));
    }

    #[test]
    fn test_ledger_error_taxonomy() {
        let app: AppError = LedgerError::NonPositivePayment(dec!(0)).into();
        assert_eq!(app.error_code(), "INVALID_INPUT");

        let app: AppError = LedgerError::AlreadyPaid(InstallmentId::new()).into();
        assert_eq!(app.error_code(), "BUSINESS_RULE_VIOLATION");

        let app: AppError = LedgerError::Schedule(ScheduleError::ZeroInstallments).into();
        assert_eq!(app.error_code(), "INVALID_INPUT");
    }
}
