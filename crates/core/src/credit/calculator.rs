//! Credit score calculation.
//!
//! A score is built from four components:
//! - a base driven by the share of settled installments paid on time
//! - a delay penalty that grows with the average delay but never exceeds 25
//! - a bonus for the current on-time streak
//! - a penalty per overdue installment, capped at 40
//!
//! The result is clamped to 0..=100 and rounded half-even.

use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use lendbook_shared::types::{non_negative, percent_of, round_money, safe_div};

use super::error::CreditError;
use super::history::{DebtorHistory, DebtorHistoryReader, InstallmentHistory};
use super::types::{CreditProfile, RiskLevel, ScoreBreakdown};
use crate::ledger::Debtor;

/// Score given when nothing has been rated yet.
const NEUTRAL_BASE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Base for a debtor who never paid on time.
const BASE_FLOOR: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
/// Base added by a perfect on-time rate.
const ON_TIME_WEIGHT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Upper bound of the delay penalty.
const MAX_DELAY_PENALTY: Decimal = Decimal::from_parts(25, 0, 0, false, 0);
/// Average delay at which half the maximum delay penalty applies.
const DELAY_HALF_POINT: Decimal = Decimal::from_parts(15, 0, 0, false, 0);
/// Bonus per installment in the on-time streak.
const STREAK_STEP: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Longest streak that still earns a bonus.
const STREAK_CAP: u32 = 10;
/// Penalty per overdue installment.
const OVERDUE_STEP: Decimal = Decimal::from_parts(8, 0, 0, false, 0);
/// Upper bound of the overdue penalty.
const MAX_OVERDUE_PENALTY: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
/// Highest score.
const MAX_SCORE: Decimal = Decimal::ONE_HUNDRED;

/// How one installment counts toward the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rating {
    OnTime,
    Late { days: i64 },
    Overdue,
}

impl Rating {
    /// Rates an installment as of `today`; `None` when it is not yet due
    /// and still open.
    fn of(entry: &InstallmentHistory, today: NaiveDate) -> Option<Self> {
        let due = entry.installment.due_date;
        match entry.settlement_date() {
            Some(settled) if settled <= due => Some(Self::OnTime),
            Some(settled) => Some(Self::Late {
                days: (settled - due).num_days(),
            }),
            None if due < today => Some(Self::Overdue),
            None => None,
        }
    }
}

/// Counters gathered from the rated installments.
#[derive(Debug, Default)]
struct RatingTally {
    on_time: u32,
    late: u32,
    overdue: u32,
    total_days_late: i64,
    longest_delay: i64,
    streak: u32,
}

impl RatingTally {
    /// Tallies ratings given in chronological order.
    fn from_ratings(ratings: &[Rating]) -> Self {
        let mut tally = Self::default();
        for rating in ratings {
            match *rating {
                Rating::OnTime => tally.on_time += 1,
                Rating::Late { days } => {
                    tally.late += 1;
                    tally.total_days_late += days;
                    tally.longest_delay = tally.longest_delay.max(days);
                }
                Rating::Overdue => tally.overdue += 1,
            }
        }

        tally.streak = ratings
            .iter()
            .rev()
            .take_while(|rating| **rating == Rating::OnTime)
            .count()
            .try_into()
            .unwrap_or(u32::MAX);

        tally
    }

    fn settled(&self) -> u32 {
        self.on_time + self.late
    }

    fn on_time_rate(&self) -> Decimal {
        safe_div(Decimal::from(self.on_time), Decimal::from(self.settled()))
    }

    fn average_days_late(&self) -> Decimal {
        safe_div(Decimal::from(self.total_days_late), Decimal::from(self.late))
    }
}

/// Stateless credit score calculator.
pub struct CreditScoreCalculator;

impl CreditScoreCalculator {
    /// Reads a debtor's history and computes a fresh profile.
    ///
    /// # Errors
    ///
    /// Returns `CreditError::Read` if the history cannot be read.
    pub fn calculate_profile<R>(
        debtor: &Debtor,
        reader: &R,
        now: DateTime<Utc>,
    ) -> Result<CreditProfile, CreditError>
    where
        R: DebtorHistoryReader + ?Sized,
    {
        let history = reader.debtor_history(debtor.id)?;
        Ok(Self::profile_from_history(&history, now))
    }

    /// Scores many debtors in parallel, one result per debtor in input order.
    pub fn calculate_profiles<R>(
        debtors: &[Debtor],
        reader: &R,
        now: DateTime<Utc>,
    ) -> Vec<Result<CreditProfile, CreditError>>
    where
        R: DebtorHistoryReader + Sync + ?Sized,
    {
        debtors
            .par_iter()
            .map(|debtor| Self::calculate_profile(debtor, reader, now))
            .collect()
    }

    /// Computes a profile from an already assembled history.
    #[must_use]
    pub fn profile_from_history(history: &DebtorHistory, now: DateTime<Utc>) -> CreditProfile {
        let today = now.date_naive();

        let mut rated: Vec<(NaiveDate, u32, Rating)> = history
            .installments()
            .filter_map(|entry| {
                Rating::of(entry, today).map(|rating| {
                    (
                        entry.installment.due_date,
                        entry.installment.number,
                        rating,
                    )
                })
            })
            .collect();
        rated.sort_by_key(|(due, number, _)| (*due, *number));
        let ratings: Vec<Rating> = rated.into_iter().map(|(_, _, rating)| rating).collect();
        let tally = RatingTally::from_ratings(&ratings);

        let breakdown = Self::breakdown(&tally);
        let score = Self::score(&breakdown);

        let total_lent: Decimal = history
            .agreements
            .iter()
            .map(|entry| entry.agreement.principal)
            .sum();
        let total_paid: Decimal = history.agreements.iter().map(|entry| entry.total_paid()).sum();
        let total_interest_earned: Decimal = history
            .agreements
            .iter()
            .map(|entry| non_negative(entry.total_paid() - entry.agreement.principal))
            .sum();
        let total_scheduled: Decimal = history
            .installments()
            .map(|entry| entry.installment.amount)
            .sum();
        let current_outstanding: Decimal = history
            .installments()
            .map(|entry| entry.installment.remaining())
            .sum();

        debug!(
            debtor_id = %history.debtor_id,
            score,
            on_time = tally.on_time,
            late = tally.late,
            overdue = tally.overdue,
            streak = tally.streak,
            "calculated credit score"
        );

        CreditProfile {
            debtor_id: history.debtor_id,
            score,
            risk_level: RiskLevel::from_score(score),
            score_breakdown: breakdown,
            total_agreements: count(history.agreements.len()),
            total_installments: count(history.installments().count()),
            paid_on_time_count: tally.on_time,
            paid_late_count: tally.late,
            overdue_count: tally.overdue,
            average_days_late: round_money(tally.average_days_late()),
            on_time_payment_rate: tally.on_time_rate().round_dp(4),
            total_lent,
            total_paid,
            total_interest_earned,
            current_outstanding,
            return_on_investment: percent_of(total_interest_earned, total_lent),
            collection_rate: percent_of(total_paid, total_scheduled),
            consecutive_on_time_payments: tally.streak,
            longest_delay_days: u32::try_from(tally.longest_delay).unwrap_or(u32::MAX),
            last_calculated: now,
        }
    }

    fn breakdown(tally: &RatingTally) -> ScoreBreakdown {
        let base = if tally.settled() == 0 {
            NEUTRAL_BASE
        } else {
            BASE_FLOOR + ON_TIME_WEIGHT * tally.on_time_rate()
        };

        let average = tally.average_days_late();
        let delay_penalty = safe_div(MAX_DELAY_PENALTY * average, average + DELAY_HALF_POINT);

        let streak_bonus = STREAK_STEP * Decimal::from(tally.streak.min(STREAK_CAP));
        let overdue_penalty = (OVERDUE_STEP * Decimal::from(tally.overdue)).min(MAX_OVERDUE_PENALTY);

        ScoreBreakdown {
            base: round_money(base),
            delay_penalty: round_money(delay_penalty),
            streak_bonus,
            overdue_penalty,
        }
    }

    fn score(breakdown: &ScoreBreakdown) -> u8 {
        let raw = breakdown.base - breakdown.delay_penalty + breakdown.streak_bonus
            - breakdown.overdue_penalty;
        raw.clamp(Decimal::ZERO, MAX_SCORE)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_u8()
            .unwrap_or(0)
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
