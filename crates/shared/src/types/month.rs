//! Calendar month arithmetic.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, represented by its first day.
///
/// Snapshots and projections are month-scoped facts; this type keeps the
/// "first of month" invariant in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarMonth(NaiveDate);

impl CalendarMonth {
    /// Returns the month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Builds a month from a year and a 1-based month number.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next().0.pred_opt().unwrap_or(self.0)
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1-based.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// The following month.
    #[must_use]
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// The preceding month.
    #[must_use]
    pub fn prev(self) -> Self {
        self.offset(-1)
    }

    /// Shifts by `months` (negative goes back), saturating at the calendar bounds.
    #[must_use]
    pub fn offset(self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        match shifted {
            Some(date) => Self(date),
            None if months >= 0 => Self::from_date(NaiveDate::MAX),
            None => Self::from_date(NaiveDate::MIN),
        }
    }

    /// Returns true if `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::from_date(date) == self
    }

    /// The `count` months immediately preceding this one, oldest first.
    #[must_use]
    pub fn preceding(self, count: u32) -> Vec<Self> {
        let count = i32::try_from(count).unwrap_or(i32::MAX);
        (1..=count).rev().map(|back| self.offset(-back)).collect()
    }

    /// The `count` months immediately following this one, nearest first.
    #[must_use]
    pub fn following(self, count: u32) -> Vec<Self> {
        let count = i32::try_from(count).unwrap_or(i32::MAX);
        (1..=count).map(|ahead| self.offset(ahead)).collect()
    }
}

impl From<NaiveDate> for CalendarMonth {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
