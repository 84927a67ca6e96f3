//! Mandatory unpaid-break policy.
//!
//! This module derives the break length for a shift from its elapsed time and
//! the worker's age classification, following the break tiers of the
//! collective labour agreement, and determines which part of that break is
//! nonetheless paid.

use serde::{Deserialize, Serialize};

use crate::models::{AgeClass, AuditStep, Shift};

/// Shifts shorter than this carry no mandatory break.
pub const MIN_MINUTES_FOR_BREAK: i64 = 4 * 60;

/// The paid portion of a 15 or 45 minute break.
pub const PAID_BREAK_MINUTES: u32 = 15;

/// Where a shift's break length came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakSource {
    /// Derived from the break tiers.
    Automatic,
    /// Entered by hand on the shift.
    Manual,
}

/// The break applied to one shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakAllowance {
    /// Total break length subtracted from the elapsed time.
    pub break_minutes: u32,
    /// Part of the break that is paid at the base rate.
    pub paid_minutes: u32,
    /// Where the break length came from.
    pub source: BreakSource,
}

/// Returns the mandatory break for a shift of the given elapsed length.
///
/// | elapsed        | minor | adult |
/// |----------------|-------|-------|
/// | < 4h           | 0     | 0     |
/// | 4h - 4.5h      | 15    | 15    |
/// | 4.5h - 5.5h    | 30    | 15    |
/// | 5.5h - 6h      | 45    | 30    |
/// | > 6h           | 45    | 45    |
///
/// Upper bounds are inclusive.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::break_minutes_for;
/// use payroll_engine::models::AgeClass;
///
/// assert_eq!(break_minutes_for(3 * 60 + 59, AgeClass::Adult), 0);
/// assert_eq!(break_minutes_for(5 * 60, AgeClass::Minor), 30);
/// assert_eq!(break_minutes_for(5 * 60, AgeClass::Adult), 15);
/// assert_eq!(break_minutes_for(8 * 60, AgeClass::Adult), 45);
/// ```
pub fn break_minutes_for(elapsed_minutes: i64, age_class: AgeClass) -> u32 {
    if elapsed_minutes < MIN_MINUTES_FOR_BREAK {
        return 0;
    }

    match age_class {
        AgeClass::Minor => match elapsed_minutes {
            m if m <= 270 => 15,
            m if m <= 330 => 30,
            _ => 45,
        },
        AgeClass::Adult => match elapsed_minutes {
            m if m <= 330 => 15,
            m if m <= 360 => 30,
            _ => 45,
        },
    }
}

/// Returns the paid portion of an automatically derived break.
///
/// A 15 minute break is paid in full; a 45 minute break pays its first 15
/// minutes; a 30 minute break (and no break) pays nothing.
pub fn paid_break_minutes(break_minutes: u32) -> u32 {
    match break_minutes {
        15 | 45 => PAID_BREAK_MINUTES,
        _ => 0,
    }
}

/// Resolves the break for a shift.
///
/// A manual break overrides the tiers entirely and is treated as wholly
/// unpaid.
pub fn resolve_break(shift: &Shift, age_class: AgeClass) -> BreakAllowance {
    match shift.break_minutes {
        Some(manual) => BreakAllowance {
            break_minutes: manual,
            paid_minutes: 0,
            source: BreakSource::Manual,
        },
        None => {
            let break_minutes = break_minutes_for(shift.elapsed_minutes(), age_class);
            BreakAllowance {
                break_minutes,
                paid_minutes: paid_break_minutes(break_minutes),
                source: BreakSource::Automatic,
            }
        }
    }
}

/// Resolves the break for a shift and records an audit step for it.
pub fn resolve_break_with_audit(
    shift: &Shift,
    age_class: AgeClass,
    step_number: u32,
) -> (BreakAllowance, AuditStep) {
    let allowance = resolve_break(shift, age_class);
    let elapsed = shift.elapsed_minutes();

    let reasoning = match allowance.source {
        BreakSource::Manual => format!(
            "Manual break of {} min overrides the break tiers; treated as unpaid",
            allowance.break_minutes
        ),
        BreakSource::Automatic if allowance.break_minutes == 0 => format!(
            "{} min shift is under 4 hours: no mandatory break",
            elapsed
        ),
        BreakSource::Automatic => format!(
            "{} min shift for {}: {} min break, {} min of it paid",
            elapsed, age_class, allowance.break_minutes, allowance.paid_minutes
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "break_policy".to_string(),
        rule_name: "Mandatory Break".to_string(),
        input: serde_json::json!({
            "shift_id": shift.id,
            "elapsed_minutes": elapsed,
            "age_class": age_class,
            "manual_break_minutes": shift.break_minutes,
        }),
        output: serde_json::json!({
            "break_minutes": allowance.break_minutes,
            "paid_minutes": allowance.paid_minutes,
            "source": allowance.source,
        }),
        reasoning,
    };

    (allowance, audit_step)
}
