//! Conversion between `H:MM` text and decimal hours.
//!
//! Parsing is permissive: blank, `"0"` and malformed input all
//! read as zero. Validation of entered times happens elsewhere
//! (see [`validate_shift`](super::validate_shift)).
//!
//! Both directions are memoized in process-wide tables. The tables are a pure
//! cache; [`clear_time_caches`] may be called at any time without changing a
//! single result.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

static MINUTES_CACHE: LazyLock<RwLock<HashMap<String, i64>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

static TEXT_CACHE: LazyLock<RwLock<HashMap<Decimal, String>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

const MINUTES_PER_HOUR: i64 = 60;

/// Parses `H:MM` into whole minutes.
///
/// Hours are unbounded; minutes must be two digits in `00..=59`. Anything
/// else, including an empty string, yields 0.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_minutes;
///
/// assert_eq!(parse_minutes("8:30"), 510);
/// assert_eq!(parse_minutes("99:59"), 5999);
/// assert_eq!(parse_minutes(""), 0);
/// assert_eq!(parse_minutes("12:75"), 0);
/// ```
pub fn parse_minutes(text: &str) -> i64 {
    if let Ok(cache) = MINUTES_CACHE.read() {
        if let Some(minutes) = cache.get(text) {
            return *minutes;
        }
    }

    let minutes = parse_minutes_uncached(text);

    if let Ok(mut cache) = MINUTES_CACHE.write() {
        cache.insert(text.to_string(), minutes);
    }
    minutes
}

fn parse_minutes_uncached(text: &str) -> i64 {
    let Some((hours, minutes)) = text.trim().split_once(':') else {
        return 0;
    };

    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }

    match (hours.parse::<i64>(), minutes.parse::<i64>()) {
        (Ok(h), Ok(m)) if m < MINUTES_PER_HOUR => h
            .checked_mul(MINUTES_PER_HOUR)
            .and_then(|total| total.checked_add(m))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Converts `H:MM` text to decimal hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::to_decimal;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(to_decimal("8:30"), Decimal::from_str("8.5").unwrap());
/// assert_eq!(to_decimal("0:45"), Decimal::from_str("0.75").unwrap());
/// assert_eq!(to_decimal("0:00"), Decimal::ZERO);
/// assert_eq!(to_decimal("abc"), Decimal::ZERO);
/// ```
pub fn to_decimal(text: &str) -> Decimal {
    minutes_to_hours(parse_minutes(text))
}

/// Converts whole minutes to decimal hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR)
}

/// Formats decimal hours as `HH:MM`, rounding to the nearest minute.
///
/// Hours are zero-padded to at least two digits and are not capped at 24.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::to_text;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(to_text(Decimal::from_str("8.5").unwrap()), "08:30");
/// assert_eq!(to_text(Decimal::from(99)), "99:00");
/// assert_eq!(to_text(Decimal::from_str("23.983333333333334").unwrap()), "23:59");
/// ```
pub fn to_text(hours: Decimal) -> String {
    if let Ok(cache) = TEXT_CACHE.read() {
        if let Some(text) = cache.get(&hours) {
            return text.clone();
        }
    }

    let total_minutes = (hours * Decimal::from(MINUTES_PER_HOUR))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    let text = format_minutes(total_minutes);

    if let Ok(mut cache) = TEXT_CACHE.write() {
        cache.insert(hours, text.clone());
    }
    text
}

/// Formats whole minutes as `HH:MM`.
pub fn format_minutes(total_minutes: i64) -> String {
    let sign = if total_minutes < 0 { "-" } else { "" };
    let abs = total_minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Empties both memoization tables.
pub fn clear_time_caches() {
    if let Ok(mut cache) = MINUTES_CACHE.write() {
        cache.clear();
    }
    if let Ok(mut cache) = TEXT_CACHE.write() {
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// TD-001: H:MM to decimal hours
    #[test]
    fn test_to_decimal_standard_values() {
        assert_eq!(to_decimal("8:30"), dec("8.5"));
        assert_eq!(to_decimal("12:00"), dec("12"));
        assert_eq!(to_decimal("0:45"), dec("0.75"));
        assert_eq!(to_decimal("08:15"), dec("8.25"));
    }

    /// TD-002: zero forms and blanks
    #[test]
    fn test_to_decimal_zero_forms() {
        assert_eq!(to_decimal("0:00"), Decimal::ZERO);
        assert_eq!(to_decimal(""), Decimal::ZERO);
        assert_eq!(to_decimal("0"), Decimal::ZERO);
    }

    /// TD-003: hours beyond a day
    #[test]
    fn test_to_decimal_large_hours() {
        assert_eq!(to_decimal("99:00"), dec("99"));
        assert_eq!(to_decimal("99:30"), dec("99.5"));
        assert_eq!(to_decimal("120:15"), dec("120.25"));
    }

    /// TD-004: malformed input degrades to zero
    #[test]
    fn test_to_decimal_malformed_is_zero() {
        assert_eq!(to_decimal("abc"), Decimal::ZERO);
        assert_eq!(to_decimal("8"), Decimal::ZERO);
        assert_eq!(to_decimal("8:60"), Decimal::ZERO);
        assert_eq!(to_decimal("8:5"), Decimal::ZERO);
        assert_eq!(to_decimal("-1:00"), Decimal::ZERO);
        assert_eq!(to_decimal(":30"), Decimal::ZERO);
        assert_eq!(to_decimal("99999999999999999999:00"), Decimal::ZERO);
    }

    #[test]
    fn test_to_text_standard_values() {
        assert_eq!(to_text(dec("8.5")), "08:30");
        assert_eq!(to_text(dec("12")), "12:00");
        assert_eq!(to_text(dec("0.75")), "00:45");
        assert_eq!(to_text(Decimal::ZERO), "00:00");
        assert_eq!(to_text(dec("1")), "01:00");
    }

    #[test]
    fn test_to_text_rounds_to_nearest_minute() {
        assert_eq!(to_text(dec("99.983333333333334")), "99:59");
        // 0.9999 hours is 59.994 minutes, which rounds up into the next hour
        assert_eq!(to_text(dec("0.9999")), "01:00");
    }

    #[test]
    fn test_format_minutes_negative() {
        assert_eq!(format_minutes(-90), "-01:30");
    }

    #[test]
    fn test_clearing_caches_does_not_change_results() {
        let before = (to_decimal("7:45"), to_text(dec("7.75")));
        clear_time_caches();
        let after = (to_decimal("7:45"), to_text(dec("7.75")));
        assert_eq!(before, after);
        assert_eq!(after, (dec("7.75"), "07:45".to_string()));
    }

    proptest! {
        #[test]
        fn prop_round_trip_whole_minutes(minutes in 0i64..200_000) {
            let hours = minutes_to_hours(minutes);
            prop_assert_eq!(to_decimal(&to_text(hours)), hours);
        }

        #[test]
        fn prop_to_text_within_one_minute(hundredths in 0i64..1_000_000) {
            let hours = Decimal::new(hundredths, 2);
            let back = to_decimal(&to_text(hours));
            let diff = (back - hours).abs();
            prop_assert!(diff <= Decimal::ONE / Decimal::from(60));
        }
    }
}
