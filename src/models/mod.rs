//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod pay_period;
mod payroll_config;
mod shift;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, HourTotals, HourTotalsText, Results,
};
pub use employee::{AgeClass, AgeGroup, JobFunction};
pub use pay_period::{PendingPayout, Period, PeriodStatus};
pub use payroll_config::{DeductionRates, PayrollConfig, RateMode};
pub use shift::{MINUTES_PER_DAY, Shift, WeekShifts, generate_shift_id, resize_weeks};
