//! Calculation logic for the payroll engine.
//!
//! This module contains the time conversions, the rate and break policies,
//! per-shift allowance classification, period aggregation, gross pay and the
//! deduction chain, the payroll calendar, shift validation and configuration
//! transitions. [`compute_results`] ties the pay calculation together;
//! [`PayrollCalendar::period_status`] answers calendar questions.

mod aggregation;
mod break_policy;
mod config_events;
mod deductions;
mod period_scheduler;
mod pipeline;
mod rate_policy;
mod shift_allowance;
mod time_duration;
mod validation;

pub use aggregation::{AggregationResult, PeriodTotals, aggregate_weeks};
pub use break_policy::{
    BreakAllowance, BreakSource, MIN_MINUTES_FOR_BREAK, PAID_BREAK_MINUTES, break_minutes_for,
    paid_break_minutes, resolve_break, resolve_break_with_audit,
};
pub use config_events::{ConfigEvent, DEFAULT_NUMBER_OF_WEEKS, apply_config_event};
pub use deductions::{
    AllowanceMultipliers, DeductionBreakdown, GrossPayResult, apply_deductions,
    calculate_gross_pay, round_currency,
};
pub use period_scheduler::{PERIODS_PER_YEAR, PayrollCalendar, SUPPORTED_YEARS};
pub use pipeline::{compute_results, compute_results_from_hours};
pub use rate_policy::{
    MAX_SERVICE_BRACKET, RateLookup, RateResolution, age_groups, job_functions_for, lookup_rate,
    parse_rate, resolve_rate, service_bracket, years_of_service_options,
};
pub use shift_allowance::{
    NIGHT_WINDOW_END, NIGHT_WINDOW_START, ShiftClassification, ShiftHours, classify_shift,
    night_overlap_minutes,
};
pub use time_duration::{
    clear_time_caches, format_minutes, minutes_to_hours, parse_minutes, to_decimal, to_text,
};
pub use validation::{is_valid_time_of_day, validate_shift};
