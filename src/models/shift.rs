//! Shift model and the weekly shift lists.
//!
//! This module defines the [`Shift`] and [`WeekShifts`] structs. Shift times
//! are kept as `H:MM` text, the way they are entered; everything derived from
//! them (elapsed time, night flag, allowance split) is recomputed on demand.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::parse_minutes;
use crate::error::{EngineError, EngineResult};

/// Minutes in a day, used for midnight wrap.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Represents one labour interval within a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Opaque stable identifier used for update and delete.
    pub id: String,
    /// Start time of day as `H:MM`.
    pub start_time: String,
    /// End time of day as `H:MM`. May be earlier than the start (shift wraps past midnight).
    pub end_time: String,
    /// Manually entered break length. `None` means compute it from the break policy.
    #[serde(default)]
    pub break_minutes: Option<u32>,
    /// Whether the shift falls on a Sunday.
    #[serde(default)]
    pub is_sunday: bool,
    /// Whether the shift falls on a public holiday.
    #[serde(default)]
    pub is_holiday: bool,
}

impl Shift {
    /// Creates a shift with a fresh id, an automatic break and no day flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    ///
    /// let shift = Shift::new("09:00", "17:00");
    /// assert!(shift.id.starts_with("shift_"));
    /// assert_eq!(shift.elapsed_minutes(), 480);
    /// ```
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            id: generate_shift_id(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            break_minutes: None,
            is_sunday: false,
            is_holiday: false,
        }
    }

    /// Start time in minutes since midnight (0 when unparseable).
    pub fn start_minutes(&self) -> i64 {
        parse_minutes(&self.start_time)
    }

    /// End time in minutes since the shift's start day, wrapped past midnight
    /// when the end is earlier than the start.
    pub fn end_minutes(&self) -> i64 {
        let start = self.start_minutes();
        let end = parse_minutes(&self.end_time);
        if end < start {
            end + MINUTES_PER_DAY
        } else {
            end
        }
    }

    /// Total elapsed minutes between start and end, including any break.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    ///
    /// assert_eq!(Shift::new("22:00", "06:00").elapsed_minutes(), 480);
    /// assert_eq!(Shift::new("09:00", "09:00").elapsed_minutes(), 0);
    /// ```
    pub fn elapsed_minutes(&self) -> i64 {
        self.end_minutes() - self.start_minutes()
    }

    /// Whether the shift touches the 22:00-06:00 night window.
    ///
    /// Derived from the times only: the start or end hour lies in the night
    /// window, or the shift wraps past midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    ///
    /// assert!(Shift::new("22:00", "06:00").is_night_shift());
    /// assert!(Shift::new("18:00", "23:00").is_night_shift());
    /// assert!(!Shift::new("09:00", "17:00").is_night_shift());
    /// ```
    pub fn is_night_shift(&self) -> bool {
        let start_hour = parse_minutes(&self.start_time) / 60;
        let end_hour = parse_minutes(&self.end_time) / 60;
        let in_night = |hour: i64| !(6..22).contains(&hour);

        in_night(start_hour) || in_night(end_hour) || start_hour > end_hour
    }
}

/// Generates a new opaque shift id.
pub fn generate_shift_id() -> String {
    format!("shift_{}", Uuid::new_v4().simple())
}

/// One week of shift entry within a payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekShifts {
    /// 1-based week number within the period.
    pub week_number: u32,
    /// Shifts in entry order.
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl WeekShifts {
    /// Creates an empty week.
    pub fn new(week_number: u32) -> Self {
        Self {
            week_number,
            shifts: Vec::new(),
        }
    }

    /// Appends a shift and returns its id. A blank id is replaced by a fresh one.
    pub fn add_shift(&mut self, mut shift: Shift) -> String {
        if shift.id.trim().is_empty() {
            shift.id = generate_shift_id();
        }
        let id = shift.id.clone();
        self.shifts.push(shift);
        id
    }

    /// Replaces the shift whose id matches `shift.id`, keeping its position.
    pub fn update_shift(&mut self, shift: Shift) -> EngineResult<()> {
        let slot = self
            .shifts
            .iter_mut()
            .find(|s| s.id == shift.id)
            .ok_or_else(|| EngineError::ShiftNotFound {
                shift_id: shift.id.clone(),
            })?;
        *slot = shift;
        Ok(())
    }

    /// Removes and returns the shift with the given id.
    pub fn remove_shift(&mut self, shift_id: &str) -> EngineResult<Shift> {
        let index = self
            .shifts
            .iter()
            .position(|s| s.id == shift_id)
            .ok_or_else(|| EngineError::ShiftNotFound {
                shift_id: shift_id.to_string(),
            })?;
        Ok(self.shifts.remove(index))
    }
}

/// Resizes the week list to `number_of_weeks`.
///
/// Existing weeks keep their shifts by index; extra weeks are dropped and
/// missing weeks are added empty. Week numbers are renumbered 1..=n.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::{resize_weeks, Shift, WeekShifts};
///
/// let mut week = WeekShifts::new(1);
/// week.add_shift(Shift::new("09:00", "17:00"));
///
/// let weeks = resize_weeks(vec![week], 4);
/// assert_eq!(weeks.len(), 4);
/// assert_eq!(weeks[0].shifts.len(), 1);
/// assert_eq!(weeks[3].week_number, 4);
/// ```
pub fn resize_weeks(weeks: Vec<WeekShifts>, number_of_weeks: usize) -> Vec<WeekShifts> {
    let mut weeks = weeks;
    weeks.truncate(number_of_weeks);
    while weeks.len() < number_of_weeks {
        weeks.push(WeekShifts::new(0));
    }
    for (index, week) in weeks.iter_mut().enumerate() {
        week.week_number = index as u32 + 1;
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(id: &str, start: &str, end: &str) -> Shift {
        Shift {
            id: id.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            break_minutes: None,
            is_sunday: false,
            is_holiday: false,
        }
    }

    /// SH-001: day shift elapsed time
    #[test]
    fn test_day_shift_elapsed() {
        assert_eq!(shift("SH-001", "09:00", "17:00").elapsed_minutes(), 480);
    }

    /// SH-002: shift wrapping past midnight
    #[test]
    fn test_overnight_shift_elapsed() {
        let s = shift("SH-002", "22:00", "06:00");
        assert_eq!(s.start_minutes(), 22 * 60);
        assert_eq!(s.end_minutes(), 30 * 60);
        assert_eq!(s.elapsed_minutes(), 480);
    }

    /// SH-003: blank times yield an empty shift
    #[test]
    fn test_blank_times_elapsed_zero() {
        assert_eq!(shift("SH-003", "", "").elapsed_minutes(), 0);
    }

    #[test]
    fn test_night_shift_detection() {
        assert!(shift("a", "22:00", "06:00").is_night_shift());
        assert!(shift("b", "05:00", "13:00").is_night_shift());
        assert!(shift("c", "14:00", "22:30").is_night_shift());
        assert!(shift("d", "20:00", "01:00").is_night_shift());
        assert!(!shift("e", "06:00", "21:59").is_night_shift());
        assert!(!shift("f", "09:00", "17:00").is_night_shift());
    }

    #[test]
    fn test_new_generates_unique_ids() {
        let a = Shift::new("09:00", "17:00");
        let b = Shift::new("09:00", "17:00");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_add_shift_keeps_given_id() {
        let mut week = WeekShifts::new(1);
        let id = week.add_shift(shift("keep_me", "09:00", "12:00"));
        assert_eq!(id, "keep_me");
        assert_eq!(week.shifts.len(), 1);
    }

    #[test]
    fn test_add_shift_fills_blank_id() {
        let mut week = WeekShifts::new(1);
        let id = week.add_shift(shift("", "09:00", "12:00"));
        assert!(id.starts_with("shift_"));
        assert_eq!(week.shifts[0].id, id);
    }

    #[test]
    fn test_update_shift_in_place() {
        let mut week = WeekShifts::new(1);
        week.add_shift(shift("a", "09:00", "12:00"));
        week.add_shift(shift("b", "13:00", "17:00"));

        let mut edited = shift("a", "08:00", "12:00");
        edited.is_sunday = true;
        week.update_shift(edited).unwrap();

        assert_eq!(week.shifts[0].start_time, "08:00");
        assert!(week.shifts[0].is_sunday);
        assert_eq!(week.shifts[1].id, "b");
    }

    #[test]
    fn test_update_unknown_shift_returns_error() {
        let mut week = WeekShifts::new(1);
        let result = week.update_shift(shift("missing", "09:00", "12:00"));
        match result {
            Err(EngineError::ShiftNotFound { shift_id }) => assert_eq!(shift_id, "missing"),
            other => panic!("Expected ShiftNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_shift() {
        let mut week = WeekShifts::new(1);
        week.add_shift(shift("a", "09:00", "12:00"));
        week.add_shift(shift("b", "13:00", "17:00"));

        let removed = week.remove_shift("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(week.shifts.len(), 1);
        assert!(week.remove_shift("a").is_err());
    }

    #[test]
    fn test_resize_weeks_truncates_and_preserves() {
        let weeks: Vec<WeekShifts> = (1..=4)
            .map(|n| {
                let mut week = WeekShifts::new(n);
                week.add_shift(shift(&format!("w{}", n), "09:00", "17:00"));
                week
            })
            .collect();

        let resized = resize_weeks(weeks, 2);
        assert_eq!(resized.len(), 2);
        assert_eq!(resized[0].shifts[0].id, "w1");
        assert_eq!(resized[1].shifts[0].id, "w2");
    }

    #[test]
    fn test_resize_weeks_pads_with_empty_weeks() {
        let resized = resize_weeks(vec![], 3);
        assert_eq!(resized.len(), 3);
        assert!(resized.iter().all(|w| w.shifts.is_empty()));
        assert_eq!(
            resized.iter().map(|w| w.week_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_shift_deserialization_defaults() {
        let json = r#"{
            "id": "shift_001",
            "start_time": "09:00",
            "end_time": "17:00"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.break_minutes, None);
        assert!(!shift.is_sunday);
        assert!(!shift.is_holiday);
    }

    #[test]
    fn test_shift_serialization_round_trip() {
        let mut original = shift("shift_001", "22:00", "06:00");
        original.break_minutes = Some(30);
        original.is_holiday = true;

        let json = serde_json::to_string(&original).unwrap();
        let parsed: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);
    }
}
