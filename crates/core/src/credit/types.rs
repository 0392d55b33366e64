//! Credit profile types.

use chrono::{DateTime, Utc};
use lendbook_shared::types::DebtorId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Risk band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score of 75 or more.
    Low,
    /// Score from 50 to 74.
    Medium,
    /// Score below 50.
    High,
}

impl RiskLevel {
    /// Lowest score banded as low risk.
    pub const LOW_THRESHOLD: u8 = 75;
    /// Lowest score banded as medium risk.
    pub const MEDIUM_THRESHOLD: u8 = 50;

    /// Bands a 0-100 score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= Self::LOW_THRESHOLD {
            Self::Low
        } else if score >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// The components that produced a score, each rounded to 2 dp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Base from the on-time rate, or the neutral value.
    pub base: Decimal,
    /// Deduction for the average delay.
    pub delay_penalty: Decimal,
    /// Bonus for the current on-time streak.
    pub streak_bonus: Decimal,
    /// Deduction for overdue installments.
    pub overdue_penalty: Decimal,
}

/// A debtor's payment reliability summary.
///
/// Recomputed wholesale on every call; never updated incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditProfile {
    /// Debtor described.
    pub debtor_id: DebtorId,
    /// Score from 0 to 100.
    pub score: u8,
    /// Risk band.
    pub risk_level: RiskLevel,
    /// Score components.
    pub score_breakdown: ScoreBreakdown,
    /// Number of agreements.
    pub total_agreements: u32,
    /// Number of installments across all agreements.
    pub total_installments: u32,
    /// Installments settled on or before their due date.
    pub paid_on_time_count: u32,
    /// Installments settled after their due date.
    pub paid_late_count: u32,
    /// Installments past due with a balance left.
    pub overdue_count: u32,
    /// Average delay of late installments in days (2 dp).
    pub average_days_late: Decimal,
    /// Share of settled installments paid on time, 0 to 1 (4 dp).
    pub on_time_payment_rate: Decimal,
    /// Sum of principals.
    pub total_lent: Decimal,
    /// Sum of payments received.
    pub total_paid: Decimal,
    /// Payments received beyond the principal, per agreement.
    pub total_interest_earned: Decimal,
    /// Balance still owed.
    pub current_outstanding: Decimal,
    /// Interest earned as a percentage of the amount lent.
    pub return_on_investment: Decimal,
    /// Payments received as a percentage of the amounts scheduled.
    pub collection_rate: Decimal,
    /// On-time streak counted back from the most recent installment.
    pub consecutive_on_time_payments: u32,
    /// Longest delay of a late installment in days.
    pub longest_delay_days: u32,
    /// When the profile was computed.
    pub last_calculated: DateTime<Utc>,
}
