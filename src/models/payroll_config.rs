//! User-selected payroll configuration.
//!
//! [`PayrollConfig`] holds the rate-selection mode, the profile used for
//! table lookups and the deduction percentages. It is plain data; changes
//! go through [`crate::calculation::apply_config_event`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgeGroup, JobFunction};

/// How the hourly rate is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateMode {
    /// Use `flat_hourly_rate` as entered.
    Flat,
    /// Look the rate up by job function, age group and years of service.
    FunctionBased,
}

/// Deduction percentages, expressed as percent numbers (1.59 means 1.59%).
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = DeductionRates {
///     pension_percent: Decimal::from_str("1.59").unwrap(),
///     secondary_fund_percent: Decimal::from_str("0.1").unwrap(),
///     disability_premium_percent: Decimal::from_str("0.47").unwrap(),
///     wage_tax_percent: Decimal::from_str("7.81").unwrap(),
///     tax_credit_elected: false,
/// };
/// assert!(!rates.tax_credit_elected);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRates {
    /// Pension premium, taken from gross pay.
    pub pension_percent: Decimal,
    /// Secondary (sector) fund premium, taken from gross pay.
    pub secondary_fund_percent: Decimal,
    /// Disability premium, taken from the taxable base.
    pub disability_premium_percent: Decimal,
    /// Wage tax, taken from the taxable base.
    pub wage_tax_percent: Decimal,
    /// When true the wage-tax deduction is waived.
    #[serde(default)]
    pub tax_credit_elected: bool,
}

/// The active payroll configuration.
///
/// When `rate_mode` is [`RateMode::FunctionBased`] the table lookup is the
/// source of truth and `flat_hourly_rate` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// How the hourly rate is chosen.
    pub rate_mode: RateMode,
    /// Hourly rate used in flat mode.
    pub flat_hourly_rate: Decimal,
    /// Selected age group.
    pub age_group: AgeGroup,
    /// Selected job function.
    pub job_function: JobFunction,
    /// Completed years of service (the lead table caps this at 5).
    #[serde(default)]
    pub years_of_service: u8,
    /// Number of weeks in the entry period.
    pub number_of_weeks: u8,
    /// Deduction percentages.
    pub deductions: DeductionRates,
}
