//! Payroll period models.
//!
//! This module contains the [`Period`] value object and the [`PeriodStatus`]
//! returned by the scheduler. Periods are never stored; they are derived from
//! the calendar anchor on demand.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the 13 fixed 28-day payroll periods of a year.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period {
///     id: "period_2025_12".to_string(),
///     period_number: 12,
///     start_date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
///     payout_date: NaiveDate::from_ymd_opt(2025, 12, 8).unwrap(),
///     year: 2025,
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Stable identifier, `period_<year>_<number>`.
    pub id: String,
    /// Period number, 1 through 13.
    pub period_number: u32,
    /// First day of work (a Monday, inclusive).
    pub start_date: NaiveDate,
    /// Last day of work (a Sunday, inclusive).
    pub end_date: NaiveDate,
    /// The Monday the period is paid out.
    pub payout_date: NaiveDate,
    /// The payroll year the period belongs to.
    pub year: i32,
}

impl Period {
    /// Checks if a date falls within the work dates of this period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if a date lies in the processing gap: after the work period
    /// ended and on or before the payout date.
    pub fn in_processing_gap(&self, date: NaiveDate) -> bool {
        date > self.end_date && date <= self.payout_date
    }
}

/// A payout that is pending while the next period is already being worked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayout {
    /// Number of the period awaiting payout.
    pub period_number: u32,
    /// When it will be paid.
    pub payout_date: NaiveDate,
    /// Always true; kept so hosts can branch on a single flag.
    pub is_processing_week: bool,
}

/// The scheduler's answer for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatus {
    /// The period whose work dates contain the day.
    pub current_period: Period,
    /// Set when the previous period has ended but not yet been paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_payout: Option<PendingPayout>,
}
