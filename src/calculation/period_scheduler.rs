//! The 13-period payroll calendar.
//!
//! Every year has 13 work periods of 28 days (364 days in all). A period's
//! work runs Monday to Sunday for four weeks and is paid out on the Monday
//! eight days after it ends. All dates are derived from a single anchor: the
//! payout date of one known period.
//!
//! Nothing here reads the clock; "today" is always passed in.

use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PendingPayout, Period, PeriodStatus};

/// Number of periods in a payroll year.
pub const PERIODS_PER_YEAR: u32 = 13;

/// Years the calendar will compute periods for.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1900..=2999;

/// Anchor and spacing of the payroll calendar.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = PayrollCalendar::default();
/// let period = calendar.period(12, 2025).unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 11, 30).unwrap());
/// assert_eq!(period.payout_date, NaiveDate::from_ymd_opt(2025, 12, 8).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalendar {
    /// Payout date of the anchor period (a Monday).
    pub anchor_payout_date: NaiveDate,
    /// Number of the anchor period.
    pub anchor_period: u32,
    /// Year of the anchor period.
    pub anchor_year: i32,
    /// Length of a work period in days.
    pub period_length_days: i64,
    /// Days from the end of a work period to its payout.
    pub processing_gap_days: i64,
}

impl Default for PayrollCalendar {
    fn default() -> Self {
        Self {
            anchor_payout_date: NaiveDate::from_ymd_opt(2025, 12, 8).unwrap_or_default(),
            anchor_period: 12,
            anchor_year: 2025,
            period_length_days: 28,
            processing_gap_days: 8,
        }
    }
}

impl PayrollCalendar {
    /// Days in one 13-period cycle.
    pub fn cycle_days(&self) -> i64 {
        self.period_length_days * i64::from(PERIODS_PER_YEAR)
    }

    fn check_year(year: i32) -> EngineResult<()> {
        if SUPPORTED_YEARS.contains(&year) {
            Ok(())
        } else {
            Err(EngineError::UnsupportedYear { year })
        }
    }

    fn shift_date(date: NaiveDate, days: i64, year: i32) -> EngineResult<NaiveDate> {
        date.checked_add_signed(Duration::days(days))
            .ok_or(EngineError::UnsupportedYear { year })
    }

    /// Payout date of a period: a linear offset from the anchor.
    ///
    /// The period number is not range-checked here, so `13 + 1` of one year
    /// lands on period 1 of the next.
    pub fn payout_date_for(&self, period_number: u32, year: i32) -> EngineResult<NaiveDate> {
        Self::check_year(year)?;
        let year_offset = i64::from(year - self.anchor_year) * self.cycle_days();
        let period_offset =
            (i64::from(period_number) - i64::from(self.anchor_period)) * self.period_length_days;
        Self::shift_date(self.anchor_payout_date, year_offset + period_offset, year)
    }

    /// Last day of work (a Sunday).
    pub fn work_period_end_for(&self, period_number: u32, year: i32) -> EngineResult<NaiveDate> {
        let payout = self.payout_date_for(period_number, year)?;
        Self::shift_date(payout, -self.processing_gap_days, year)
    }

    /// First day of work (a Monday).
    pub fn work_period_start_for(&self, period_number: u32, year: i32) -> EngineResult<NaiveDate> {
        let end = self.work_period_end_for(period_number, year)?;
        Self::shift_date(end, -(self.period_length_days - 1), year)
    }

    /// Builds the period with the given number and year.
    ///
    /// # Errors
    ///
    /// `InvalidPeriod` when the number is outside 1..=13, `UnsupportedYear`
    /// when the year is outside [`SUPPORTED_YEARS`].
    pub fn period(&self, period_number: u32, year: i32) -> EngineResult<Period> {
        if !(1..=PERIODS_PER_YEAR).contains(&period_number) {
            return Err(EngineError::InvalidPeriod { period_number });
        }

        Ok(Period {
            id: format!("period_{}_{}", year, period_number),
            period_number,
            start_date: self.work_period_start_for(period_number, year)?,
            end_date: self.work_period_end_for(period_number, year)?,
            payout_date: self.payout_date_for(period_number, year)?,
            year,
        })
    }

    /// All 13 periods of a year, in order.
    pub fn periods_for_year(&self, year: i32) -> EngineResult<Vec<Period>> {
        (1..=PERIODS_PER_YEAR)
            .map(|period_number| self.period(period_number, year))
            .collect()
    }

    /// The period before the given one, wrapping to period 13 of the previous year.
    pub fn previous_period(&self, period: &Period) -> EngineResult<Period> {
        if period.period_number == 1 {
            self.period(PERIODS_PER_YEAR, period.year - 1)
        } else {
            self.period(period.period_number - 1, period.year)
        }
    }

    /// The period whose work dates contain `today`.
    ///
    /// Searches every period of last year, this year and next year. Falls
    /// back to period 1 of this year if none matches.
    pub fn current_period_for(&self, today: NaiveDate) -> EngineResult<Period> {
        let this_year = today.year();

        let found = [this_year - 1, this_year, this_year + 1]
            .into_iter()
            .flat_map(|year| (1..=PERIODS_PER_YEAR).map(move |n| (n, year)))
            .filter_map(|(n, year)| self.period(n, year).ok())
            .find(|period| period.contains_date(today));

        match found {
            Some(period) => Ok(period),
            None => {
                tracing::warn!(
                    today = %today,
                    "No payroll period contains date; falling back to period 1"
                );
                self.period(1, this_year)
            }
        }
    }

    /// The previous period, if `today` lies between its end and its payout.
    ///
    /// Both bounds use the previous period: the gap opens the day after its
    /// work ends and closes on (and including) its payout date.
    pub fn pending_payout(&self, today: NaiveDate) -> EngineResult<Option<PendingPayout>> {
        let current = self.current_period_for(today)?;
        self.pending_payout_after(&current, today)
    }

    fn pending_payout_after(
        &self,
        current: &Period,
        today: NaiveDate,
    ) -> EngineResult<Option<PendingPayout>> {
        let previous = self.previous_period(current)?;

        Ok(previous.in_processing_gap(today).then(|| PendingPayout {
            period_number: previous.period_number,
            payout_date: previous.payout_date,
            is_processing_week: true,
        }))
    }

    /// The current period and any pending payout for `today`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::PayrollCalendar;
    /// use chrono::NaiveDate;
    ///
    /// let calendar = PayrollCalendar::default();
    /// let status = calendar
    ///     .period_status(NaiveDate::from_ymd_opt(2025, 12, 3).unwrap())
    ///     .unwrap();
    ///
    /// assert_eq!(status.current_period.period_number, 13);
    /// assert_eq!(status.pending_payout.unwrap().period_number, 12);
    /// ```
    pub fn period_status(&self, today: NaiveDate) -> EngineResult<PeriodStatus> {
        let current_period = self.current_period_for(today)?;
        let pending_payout = self.pending_payout_after(&current_period, today)?;

        Ok(PeriodStatus {
            current_period,
            pending_payout,
        })
    }

    /// The Monday each week of a period starts on.
    pub fn week_start_dates_for(
        &self,
        period_number: u32,
        year: i32,
    ) -> EngineResult<Vec<NaiveDate>> {
        let period = self.period(period_number, year)?;
        let weeks = self.period_length_days / 7;

        (0..weeks)
            .map(|week| Self::shift_date(period.start_date, week * 7, year))
            .collect()
    }

    /// Monday-to-Sunday ranges of each week of a period, for labelling.
    pub fn week_ranges_for(
        &self,
        period_number: u32,
        year: i32,
    ) -> EngineResult<Vec<(NaiveDate, NaiveDate)>> {
        self.week_start_dates_for(period_number, year)?
            .into_iter()
            .map(|monday| Ok((monday, Self::shift_date(monday, 6, year)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> PayrollCalendar {
        PayrollCalendar::default()
    }

    /// PS-001: anchor period dates
    #[test]
    fn test_anchor_period() {
        let period = calendar().period(12, 2025).unwrap();

        assert_eq!(period.id, "period_2025_12");
        assert_eq!(period.start_date, date(2025, 11, 3));
        assert_eq!(period.end_date, date(2025, 11, 30));
        assert_eq!(period.payout_date, date(2025, 12, 8));
    }

    /// PS-002: period 13 to period 1 of the next year is one period apart
    #[test]
    fn test_year_rollover_spacing() {
        let calendar = calendar();
        let last = calendar.payout_date_for(13, 2025).unwrap();
        let first = calendar.payout_date_for(1, 2026).unwrap();

        assert_eq!((first - last).num_days(), 28);
    }

    /// PS-003: a year of periods spans 364 days
    #[test]
    fn test_cycle_spans_364_days() {
        let periods = calendar().periods_for_year(2026).unwrap();

        assert_eq!(periods.len(), 13);
        let span = (periods[12].end_date - periods[0].start_date).num_days() + 1;
        assert_eq!(span, 364);
    }

    #[test]
    fn test_periods_are_contiguous() {
        let periods = calendar().periods_for_year(2025).unwrap();
        for pair in periods.windows(2) {
            assert_eq!((pair[1].start_date - pair[0].end_date).num_days(), 1);
        }
    }

    #[test]
    fn test_weekdays() {
        for period in calendar().periods_for_year(2027).unwrap() {
            assert_eq!(period.start_date.weekday(), Weekday::Mon);
            assert_eq!(period.end_date.weekday(), Weekday::Sun);
            assert_eq!(period.payout_date.weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn test_invalid_period_numbers() {
        assert!(matches!(
            calendar().period(0, 2025),
            Err(EngineError::InvalidPeriod { period_number: 0 })
        ));
        assert!(matches!(
            calendar().period(14, 2025),
            Err(EngineError::InvalidPeriod { period_number: 14 })
        ));
    }

    #[test]
    fn test_unsupported_year() {
        assert!(matches!(
            calendar().period(1, 12000),
            Err(EngineError::UnsupportedYear { year: 12000 })
        ));
    }

    /// PS-004: current period for a mid-period date
    #[test]
    fn test_current_period_mid_period() {
        let status = calendar().period_status(date(2026, 10, 19)).unwrap();

        assert_eq!(status.current_period.period_number, 11);
        assert_eq!(status.current_period.year, 2026);
        assert_eq!(status.current_period.start_date, date(2026, 10, 5));
        assert_eq!(status.current_period.end_date, date(2026, 11, 1));
        assert_eq!(status.current_period.payout_date, date(2026, 11, 9));
        assert!(status.pending_payout.is_none());
    }

    /// PS-005: payout date itself is still inside the previous period's gap
    #[test]
    fn test_payout_date_boundary() {
        let calendar = calendar();
        let payout = date(2025, 12, 8);

        let status = calendar.period_status(payout).unwrap();
        assert_eq!(status.current_period.period_number, 13);
        assert!(status.current_period.contains_date(payout));

        let pending = status.pending_payout.unwrap();
        assert_eq!(pending.period_number, 12);
        assert_eq!(pending.payout_date, payout);
        assert!(pending.is_processing_week);

        let next_day = calendar.period_status(date(2025, 12, 9)).unwrap();
        assert_eq!(next_day.current_period.period_number, 13);
        assert!(next_day.pending_payout.is_none());
    }

    #[test]
    fn test_payout_date_outside_earlier_gap() {
        let calendar = calendar();
        let period_11 = calendar.period(11, 2025).unwrap();
        assert!(!period_11.in_processing_gap(date(2025, 12, 8)));
    }

    #[test]
    fn test_gap_opens_day_after_period_end() {
        let calendar = calendar();

        assert!(calendar.pending_payout(date(2025, 11, 30)).unwrap().is_none());
        let pending = calendar.pending_payout(date(2025, 12, 1)).unwrap().unwrap();
        assert_eq!(pending.period_number, 12);
    }

    /// PS-006: year crossover resolves to period 1 of next year
    #[test]
    fn test_year_crossover() {
        let status = calendar().period_status(date(2025, 12, 29)).unwrap();

        assert_eq!(status.current_period.period_number, 1);
        assert_eq!(status.current_period.year, 2026);

        let pending = status.pending_payout.unwrap();
        assert_eq!(pending.period_number, 13);
        assert_eq!(pending.payout_date, date(2026, 1, 5));
    }

    #[test]
    fn test_previous_period_wraps_year() {
        let calendar = calendar();
        let first = calendar.period(1, 2026).unwrap();
        let previous = calendar.previous_period(&first).unwrap();

        assert_eq!(previous.period_number, 13);
        assert_eq!(previous.year, 2025);
    }

    #[test]
    fn test_week_start_dates() {
        let calendar = calendar();
        let starts = calendar.week_start_dates_for(12, 2025).unwrap();

        assert_eq!(
            starts,
            vec![
                date(2025, 11, 3),
                date(2025, 11, 10),
                date(2025, 11, 17),
                date(2025, 11, 24)
            ]
        );

        let ranges = calendar.week_ranges_for(12, 2025).unwrap();
        assert_eq!(ranges[3], (date(2025, 11, 24), date(2025, 11, 30)));
    }

    #[test]
    fn test_calendar_deserializes_from_yaml() {
        let yaml = r#"
anchor_payout_date: "2025-12-08"
anchor_period: 12
anchor_year: 2025
period_length_days: 28
processing_gap_days: 8
"#;
        let parsed: PayrollCalendar = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, PayrollCalendar::default());
    }

    proptest! {
        #[test]
        fn prop_rollover_is_one_period(year in 1901i32..2998) {
            let calendar = PayrollCalendar::default();
            let last = calendar.payout_date_for(13, year).unwrap();
            let first = calendar.payout_date_for(1, year + 1).unwrap();
            prop_assert_eq!((first - last).num_days(), 28);
        }

        #[test]
        fn prop_every_date_has_one_current_period(offset in 0i64..3650) {
            let calendar = PayrollCalendar::default();
            let today = date(2020, 1, 1) + Duration::days(offset);
            let period = calendar.current_period_for(today).unwrap();
            prop_assert!(period.contains_date(today));
        }
    }
}
