//! Shift well-formedness checks.
//!
//! This is the only validating surface of the engine. It reports problems as
//! messages for inline display instead of failing; the calculation itself
//! still accepts (and zeroes) anything it cannot read.

use crate::models::Shift;

use super::time_duration::parse_minutes;

/// Checks that `text` is a time of day: `H:MM` or `HH:MM`, hour 0-23.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::is_valid_time_of_day;
///
/// assert!(is_valid_time_of_day("9:05"));
/// assert!(is_valid_time_of_day("23:59"));
/// assert!(!is_valid_time_of_day("24:00"));
/// assert!(!is_valid_time_of_day("9:5"));
/// ```
pub fn is_valid_time_of_day(text: &str) -> bool {
    let Some((hours, minutes)) = text.split_once(':') else {
        return false;
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || hours.len() > 2 || !digits(minutes) || minutes.len() != 2 {
        return false;
    }

    matches!(
        (hours.parse::<u32>(), minutes.parse::<u32>()),
        (Ok(h), Ok(m)) if h < 24 && m < 60
    )
}

/// Validates a shift and returns human-readable problems; empty when valid.
///
/// Both times must be present and valid times of day, and the end must fall
/// strictly after the start once a midnight wrap is applied. Equal times are
/// rejected.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_shift;
/// use payroll_engine::models::Shift;
///
/// assert!(validate_shift(&Shift::new("22:00", "06:00")).is_empty());
/// assert_eq!(
///     validate_shift(&Shift::new("09:00", "09:00")),
///     vec!["End time must be after start time".to_string()]
/// );
/// ```
pub fn validate_shift(shift: &Shift) -> Vec<String> {
    let mut errors = Vec::new();
    let start = shift.start_time.trim();
    let end = shift.end_time.trim();

    if start.is_empty() {
        errors.push("Start time is required".to_string());
    } else if !is_valid_time_of_day(start) {
        errors.push(format!("Start time '{}' is not a valid time (H:MM)", start));
    }

    if end.is_empty() {
        errors.push("End time is required".to_string());
    } else if !is_valid_time_of_day(end) {
        errors.push(format!("End time '{}' is not a valid time (H:MM)", end));
    }

    if errors.is_empty() && parse_minutes(start) == parse_minutes(end) {
        errors.push("End time must be after start time".to_string());
    }

    errors
}
