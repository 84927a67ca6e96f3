//! Aggregation of classified shift time across a period.
//!
//! Totals are accumulated in whole minutes and converted to decimal hours
//! once, so summing many shifts never drifts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AgeClass, AuditStep, HourTotals, WeekShifts};

use super::shift_allowance::{ShiftHours, classify_shift};
use super::time_duration::minutes_to_hours;

/// Period totals per category, in whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Regular minutes.
    pub regular_minutes: i64,
    /// Paid break minutes.
    pub paid_break_minutes: i64,
    /// 150% minutes.
    pub allowance_50_minutes: i64,
    /// 200% minutes.
    pub allowance_100_minutes: i64,
    /// Number of shifts that contributed.
    pub shift_count: usize,
}

impl PeriodTotals {
    /// Adds one classified shift.
    pub fn add(&mut self, hours: &ShiftHours) {
        self.regular_minutes += hours.regular_minutes;
        self.paid_break_minutes += hours.paid_break_minutes;
        self.allowance_50_minutes += hours.allowance_50_minutes;
        self.allowance_100_minutes += hours.allowance_100_minutes;
        self.shift_count += 1;
    }

    /// Converts to decimal-hour totals. The legacy 125% bucket is zero.
    pub fn hour_totals(&self) -> HourTotals {
        HourTotals {
            regular: minutes_to_hours(self.regular_minutes),
            paid_break: minutes_to_hours(self.paid_break_minutes),
            allowance_25: Decimal::ZERO,
            allowance_50: minutes_to_hours(self.allowance_50_minutes),
            allowance_100: minutes_to_hours(self.allowance_100_minutes),
        }
    }
}

/// The result of aggregating a period, including audit steps.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// The period totals.
    pub totals: PeriodTotals,
    /// Per-shift audit steps followed by the aggregation step.
    pub audit_steps: Vec<AuditStep>,
}

/// Classifies every shift of every week and sums the buckets.
///
/// `step_number` is the number of the first audit step produced.
pub fn aggregate_weeks(
    weeks: &[WeekShifts],
    age_class: AgeClass,
    step_number: u32,
) -> AggregationResult {
    let mut totals = PeriodTotals::default();
    let mut audit_steps = Vec::new();
    let mut next_step = step_number;

    for week in weeks {
        for shift in &week.shifts {
            let classification = classify_shift(shift, age_class, next_step);
            next_step += classification.audit_steps.len() as u32;
            totals.add(&classification.hours);
            audit_steps.extend(classification.audit_steps);
        }
    }

    let hours = totals.hour_totals();
    audit_steps.push(AuditStep {
        step_number: next_step,
        rule_id: "period_aggregation".to_string(),
        rule_name: "Period Hour Totals".to_string(),
        input: serde_json::json!({
            "weeks": weeks.len(),
            "shifts": totals.shift_count,
        }),
        output: serde_json::json!({
            "regular": hours.regular.to_string(),
            "paid_break": hours.paid_break.to_string(),
            "allowance_50": hours.allowance_50.to_string(),
            "allowance_100": hours.allowance_100.to_string(),
        }),
        reasoning: format!(
            "Summed {} shifts across {} weeks",
            totals.shift_count,
            weeks.len()
        ),
    });

    AggregationResult {
        totals,
        audit_steps,
    }
}
