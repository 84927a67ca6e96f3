//! Hourly rate resolution.
//!
//! This module determines the hourly rate a calculation uses, either the
//! flat rate entered by the user or a lookup in the published rate tables
//! keyed by job function, age group and years of service. It also provides
//! the option lists a host offers for those three axes.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateTable;
use crate::models::{AgeGroup, AuditStep, AuditWarning, JobFunction, PayrollConfig, RateMode};

/// Highest years-of-service bracket in the lead table.
pub const MAX_SERVICE_BRACKET: u8 = 5;

/// Outcome of a rate table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "rate", rename_all = "snake_case")]
pub enum RateLookup {
    /// A rate is published for the combination.
    Available(Decimal),
    /// No rate is published for the combination.
    Unavailable,
}

impl RateLookup {
    /// The rate, or zero when unavailable.
    pub fn rate_or_zero(self) -> Decimal {
        match self {
            RateLookup::Available(rate) => rate,
            RateLookup::Unavailable => Decimal::ZERO,
        }
    }

    /// Returns true when a rate is published.
    pub fn is_available(self) -> bool {
        matches!(self, RateLookup::Available(_))
    }
}

/// The result of resolving the hourly rate, including the audit step.
#[derive(Debug, Clone)]
pub struct RateResolution {
    /// The hourly rate to calculate with.
    pub rate: Decimal,
    /// The table lookup outcome (always available in flat mode).
    pub lookup: RateLookup,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
    /// Set when the selected combination has no published rate.
    pub warning: Option<AuditWarning>,
}

/// Maps years of service to a lead-table bracket.
///
/// 1 through 5 are used as given, anything above 5 caps at 5, and 0 stays 0.
pub fn service_bracket(years_of_service: u8) -> u8 {
    years_of_service.min(MAX_SERVICE_BRACKET)
}

/// Looks up the published rate for a function, age group and years of service.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::{lookup_rate, RateLookup};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{AgeGroup, JobFunction};
///
/// let loader = ConfigLoader::load("./config/ah2025").unwrap();
/// let lookup = lookup_rate(loader.rates(), JobFunction::ShiftLeader, AgeGroup::Age16, 0);
/// assert_eq!(lookup, RateLookup::Unavailable);
/// ```
pub fn lookup_rate(
    table: &RateTable,
    function: JobFunction,
    age_group: AgeGroup,
    years_of_service: u8,
) -> RateLookup {
    let rate = match function {
        JobFunction::ShiftLeader if age_group.is_minor() => None,
        JobFunction::ShiftLeader => table.lead_rate(age_group, service_bracket(years_of_service)),
        JobFunction::ShelfStocker
        | JobFunction::Cashier
        | JobFunction::SalesAssociate
        | JobFunction::QualityAssociate => table.base_rate(function, age_group),
    };

    rate.map_or(RateLookup::Unavailable, RateLookup::Available)
}

/// Parses an entered hourly rate.
///
/// Invalid or negative input reads as zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_rate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_rate("19.18"), Decimal::from_str("19.18").unwrap());
/// assert_eq!(parse_rate("19,18"), Decimal::ZERO);
/// assert_eq!(parse_rate("-4"), Decimal::ZERO);
/// ```
pub fn parse_rate(text: &str) -> Decimal {
    Decimal::from_str(text.trim())
        .map(|rate| rate.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// Resolves the hourly rate for a configuration.
///
/// In flat mode the entered rate is used (negative rates read as zero). In
/// function-based mode the table is the source of truth and the flat rate
/// field is ignored; an unpublished combination resolves to zero and
/// produces a warning.
pub fn resolve_rate(config: &PayrollConfig, table: &RateTable, step_number: u32) -> RateResolution {
    match config.rate_mode {
        RateMode::Flat => {
            let rate = config.flat_hourly_rate.max(Decimal::ZERO);
            let audit_step = AuditStep {
                step_number,
                rule_id: "rate_resolution".to_string(),
                rule_name: "Hourly Rate Resolution".to_string(),
                input: serde_json::json!({
                    "rate_mode": config.rate_mode,
                    "flat_hourly_rate": config.flat_hourly_rate.to_string(),
                }),
                output: serde_json::json!({
                    "rate": rate.to_string(),
                    "source": "flat",
                }),
                reasoning: format!("Using flat hourly rate €{}", rate),
            };

            RateResolution {
                rate,
                lookup: RateLookup::Available(rate),
                audit_step,
                warning: None,
            }
        }
        RateMode::FunctionBased => {
            let lookup = lookup_rate(
                table,
                config.job_function,
                config.age_group,
                config.years_of_service,
            );
            let rate = lookup.rate_or_zero();

            let reasoning = match lookup {
                RateLookup::Available(rate) => format!(
                    "Looked up rate for {} aged {} with {} years of service: €{}",
                    config.job_function, config.age_group, config.years_of_service, rate
                ),
                RateLookup::Unavailable => format!(
                    "No rate published for {} aged {} with {} years of service; using €0",
                    config.job_function, config.age_group, config.years_of_service
                ),
            };

            let warning = (!lookup.is_available()).then(|| AuditWarning {
                code: "RATE_UNAVAILABLE".to_string(),
                message: format!(
                    "No hourly rate is published for {} aged {}",
                    config.job_function, config.age_group
                ),
                severity: "high".to_string(),
            });

            let audit_step = AuditStep {
                step_number,
                rule_id: "rate_resolution".to_string(),
                rule_name: "Hourly Rate Resolution".to_string(),
                input: serde_json::json!({
                    "rate_mode": config.rate_mode,
                    "job_function": config.job_function,
                    "age_group": config.age_group,
                    "years_of_service": config.years_of_service,
                }),
                output: serde_json::json!({
                    "rate": rate.to_string(),
                    "source": "table",
                    "lookup": lookup,
                }),
                reasoning,
            };

            RateResolution {
                rate,
                lookup,
                audit_step,
                warning,
            }
        }
    }
}

/// Age groups in ascending order.
pub fn age_groups() -> Vec<AgeGroup> {
    AgeGroup::ALL.to_vec()
}

/// Job functions that can be selected for an age group.
///
/// The lead function is only offered from 18.
pub fn job_functions_for(age_group: AgeGroup) -> Vec<JobFunction> {
    let mut functions = JobFunction::BASE.to_vec();
    if JobFunction::ShiftLeader.is_available_for(age_group) {
        functions.push(JobFunction::ShiftLeader);
    }
    functions
}

/// Years-of-service values that can be selected for an age group.
///
/// Only 21+ has seniority steps.
pub fn years_of_service_options(age_group: AgeGroup) -> Vec<u8> {
    match age_group {
        AgeGroup::Age21Plus => (0..=MAX_SERVICE_BRACKET).collect(),
        _ => vec![0],
    }
}
