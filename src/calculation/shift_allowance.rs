//! Per-shift hour classification.
//!
//! This module partitions a shift's worked time into regular time and the
//! 50% and 100% allowance tiers, after subtracting the break.
//!
//! # Precedence
//!
//! 1. Night: the part of the shift inside 22:00-06:00 moves from regular to
//!    the 50% tier.
//! 2. Holiday: the whole shift moves to the 100% tier, replacing step 1.
//! 3. Sunday (when not a holiday): the whole shift moves to the 50% tier,
//!    replacing step 1.
//!
//! Day flags reclassify the entire shift; they never stack with the night
//! split. All arithmetic is done in whole minutes so the buckets always sum
//! exactly to the worked time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AgeClass, AuditStep, Shift};

use super::break_policy::{BreakAllowance, resolve_break_with_audit};
use super::time_duration::minutes_to_hours;

/// Start of the night window, in minutes since the shift's start day.
pub const NIGHT_WINDOW_START: i64 = 22 * 60;

/// End of the night window (06:00 the next day).
pub const NIGHT_WINDOW_END: i64 = 30 * 60;

/// Classified time of one shift, in whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftHours {
    /// Elapsed time minus the break.
    pub worked_minutes: i64,
    /// Break subtracted from the elapsed time.
    pub break_minutes: i64,
    /// Time paid at the base rate.
    pub regular_minutes: i64,
    /// Paid part of the break.
    pub paid_break_minutes: i64,
    /// Time paid at 150%.
    pub allowance_50_minutes: i64,
    /// Time paid at 200%.
    pub allowance_100_minutes: i64,
}

impl ShiftHours {
    /// Regular hours.
    pub fn regular(&self) -> Decimal {
        minutes_to_hours(self.regular_minutes)
    }

    /// Paid break hours.
    pub fn paid_break(&self) -> Decimal {
        minutes_to_hours(self.paid_break_minutes)
    }

    /// 150% hours.
    pub fn allowance_50(&self) -> Decimal {
        minutes_to_hours(self.allowance_50_minutes)
    }

    /// 200% hours.
    pub fn allowance_100(&self) -> Decimal {
        minutes_to_hours(self.allowance_100_minutes)
    }

    /// Worked hours.
    pub fn worked(&self) -> Decimal {
        minutes_to_hours(self.worked_minutes)
    }
}

/// The result of classifying one shift, including audit steps.
#[derive(Debug, Clone)]
pub struct ShiftClassification {
    /// The classified time.
    pub hours: ShiftHours,
    /// The break that was applied.
    pub break_allowance: BreakAllowance,
    /// Audit steps: the break decision, then the allowance split.
    pub audit_steps: Vec<AuditStep>,
}

/// Minutes of `[start, end)` that fall inside the 22:00-06:00 window.
///
/// `end` must already be extended past midnight for wrapping shifts.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::night_overlap_minutes;
///
/// assert_eq!(night_overlap_minutes(22 * 60, 30 * 60), 480);
/// assert_eq!(night_overlap_minutes(18 * 60, 23 * 60), 60);
/// assert_eq!(night_overlap_minutes(9 * 60, 17 * 60), 0);
/// ```
pub fn night_overlap_minutes(start: i64, end: i64) -> i64 {
    let overlap_start = start.max(NIGHT_WINDOW_START);
    let overlap_end = end.min(NIGHT_WINDOW_END);
    (overlap_end - overlap_start).max(0)
}

/// Classifies the worked time of one shift.
///
/// `step_number` is the number of the first audit step; two steps are
/// produced.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::classify_shift;
/// use payroll_engine::models::{AgeClass, Shift};
///
/// let mut shift = Shift::new("09:00", "17:00");
/// shift.is_sunday = true;
/// shift.break_minutes = Some(30);
///
/// let classification = classify_shift(&shift, AgeClass::Adult, 1);
/// assert_eq!(classification.hours.regular_minutes, 0);
/// assert_eq!(classification.hours.allowance_50_minutes, 450);
/// ```
pub fn classify_shift(
    shift: &Shift,
    age_class: AgeClass,
    step_number: u32,
) -> ShiftClassification {
    let (break_allowance, break_step) = resolve_break_with_audit(shift, age_class, step_number);

    let start = shift.start_minutes();
    let end = shift.end_minutes();
    let elapsed = end - start;
    let break_minutes = i64::from(break_allowance.break_minutes);
    let worked = (elapsed - break_minutes).max(0);

    let mut regular = worked;
    let mut allowance_50 = 0;
    let mut allowance_100 = 0;

    let is_night = shift.is_night_shift();
    let night_overlap = if is_night {
        night_overlap_minutes(start, end)
    } else {
        0
    };
    if night_overlap > 0 {
        // The break is not placed on the clock: the whole overlap is paid at
        // 150% and only the regular remainder is floored at zero.
        allowance_50 += night_overlap;
        regular = (regular - night_overlap).max(0);
    }

    let classification = if shift.is_holiday {
        allowance_100 = worked;
        allowance_50 = 0;
        regular = 0;
        "holiday"
    } else if shift.is_sunday {
        allowance_50 = worked;
        regular = 0;
        "sunday"
    } else if night_overlap > 0 {
        "night"
    } else {
        "regular"
    };

    let hours = ShiftHours {
        worked_minutes: worked,
        break_minutes,
        regular_minutes: regular.max(0),
        paid_break_minutes: i64::from(break_allowance.paid_minutes),
        allowance_50_minutes: allowance_50,
        allowance_100_minutes: allowance_100,
    };

    let reasoning = match classification {
        "holiday" => format!(
            "Public holiday: all {} worked hours at 200%",
            hours.worked()
        ),
        "sunday" => format!("Sunday: all {} worked hours at 150%", hours.worked()),
        "night" => format!(
            "{} of {} worked hours fall in 22:00-06:00 and are paid at 150%",
            hours.allowance_50(),
            hours.worked()
        ),
        _ => format!("All {} worked hours at the base rate", hours.worked()),
    };

    let allowance_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "shift_allowance".to_string(),
        rule_name: "Shift Allowance Classification".to_string(),
        input: serde_json::json!({
            "shift_id": shift.id,
            "start_time": shift.start_time,
            "end_time": shift.end_time,
            "elapsed_minutes": elapsed,
            "break_minutes": break_minutes,
            "is_night_shift": is_night,
            "is_sunday": shift.is_sunday,
            "is_holiday": shift.is_holiday,
        }),
        output: serde_json::json!({
            "classification": classification,
            "night_overlap_minutes": night_overlap,
            "regular_hours": hours.regular().to_string(),
            "paid_break_hours": hours.paid_break().to_string(),
            "allowance_50_hours": hours.allowance_50().to_string(),
            "allowance_100_hours": hours.allowance_100().to_string(),
        }),
        reasoning,
    };

    ShiftClassification {
        hours,
        break_allowance,
        audit_steps: vec![break_step, allowance_step],
    }
}
