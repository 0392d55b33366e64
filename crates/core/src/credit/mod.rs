//! Debtor credit scoring.
//!
//! Converts a debtor's agreement, installment and payment history into a
//! 0-100 score with a risk band and descriptive statistics.

pub mod calculator;
pub mod error;
pub mod history;
pub mod types;


pub use calculator::CreditScoreCalculator;
pub use error::CreditError;
pub use history::{AgreementHistory, DebtorHistory, DebtorHistoryReader, InstallmentHistory};
pub use types::{CreditProfile, RiskLevel, ScoreBreakdown};
