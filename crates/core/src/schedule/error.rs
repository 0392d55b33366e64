//! Schedule error types.

use lendbook_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Installment schedule errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// Principal must be greater than zero.
    #[error("Principal must be positive, got {0}")]
    NonPositivePrincipal(Decimal),

    /// At least one installment is required.
    #[error("Installment count must be at least 1")]
    ZeroInstallments,

    /// Interest percentage cannot be negative.
    #[error("Monthly interest cannot be negative, got {0}%")]
    NegativeInterestRate(Decimal),

    /// Principal cannot be split into the requested number of non-zero installments.
    #[error("Principal {principal} is too small to split into {installments} installments")]
    PrincipalTooSmall {
        /// Principal amount.
        principal: Decimal,
        /// Requested installment count.
        installments: u32,
    },

    /// Compounding factor exceeded decimal range.
    #[error("Interest compounding overflowed after {periods} periods")]
    Overflow {
        /// Number of periods compounded before overflowing.
        periods: u32,
    },

    /// A due date fell outside the supported calendar range.
    #[error("Due date for installment {0} is out of range")]
    DateOutOfRange(u32),
}

impl ScheduleError {
    /// Returns true for malformed caller arguments (the InvalidInput kind).
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NonPositivePrincipal(_)
                | Self::ZeroInstallments
                | Self::NegativeInterestRate(_)
                | Self::PrincipalTooSmall { .. }
        )
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        if err.is_invalid_input() {
            Self::Validation(err.to_string())
        } else {
            Self::Arithmetic(err.to_string())
        }
    }
}
