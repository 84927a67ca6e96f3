//! Configuration transitions.
//!
//! A host never edits a [`PayrollConfig`] field by field. It sends a
//! [`ConfigEvent`] through [`apply_config_event`], which keeps the selection
//! consistent: the lead function is dropped for age groups it is not offered
//! to, and years of service stay within the options of the age group.

use serde::{Deserialize, Serialize};

use crate::models::{AgeGroup, DeductionRates, JobFunction, PayrollConfig, RateMode};

use super::rate_policy::{parse_rate, years_of_service_options};

/// Number of weeks used when zero weeks is requested.
pub const DEFAULT_NUMBER_OF_WEEKS: u8 = 4;

/// A user-initiated change to the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigEvent {
    /// A different age group was selected.
    AgeGroupChanged {
        /// The new age group.
        age_group: AgeGroup,
    },
    /// A different job function was selected.
    JobFunctionChanged {
        /// The new job function.
        job_function: JobFunction,
    },
    /// Years of service were changed.
    YearsOfServiceChanged {
        /// The new number of years.
        years_of_service: u8,
    },
    /// Switched between flat and table rates.
    RateModeChanged {
        /// The new mode.
        rate_mode: RateMode,
    },
    /// A flat rate was typed in.
    FlatRateEntered {
        /// The text as entered.
        text: String,
    },
    /// The number of weeks in the entry period was changed.
    NumberOfWeeksChanged {
        /// The new number of weeks.
        number_of_weeks: u8,
    },
    /// Deduction percentages were edited.
    DeductionsChanged {
        /// The new percentages.
        deductions: DeductionRates,
    },
}

fn normalise_years(age_group: AgeGroup, years_of_service: u8) -> u8 {
    let max = years_of_service_options(age_group)
        .into_iter()
        .max()
        .unwrap_or(0);
    years_of_service.min(max)
}

fn available_function(age_group: AgeGroup, job_function: JobFunction) -> JobFunction {
    if job_function.is_available_for(age_group) {
        job_function
    } else {
        JobFunction::FALLBACK
    }
}

/// Applies an event and returns the resulting configuration.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::{apply_config_event, ConfigEvent};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{AgeGroup, JobFunction};
///
/// let mut config = ConfigLoader::load("./config/ah2025").unwrap().defaults().clone();
/// config.job_function = JobFunction::ShiftLeader;
///
/// let config = apply_config_event(config, ConfigEvent::AgeGroupChanged {
///     age_group: AgeGroup::Age16,
/// });
/// assert_eq!(config.job_function, JobFunction::ShelfStocker);
/// ```
pub fn apply_config_event(config: PayrollConfig, event: ConfigEvent) -> PayrollConfig {
    let mut config = config;

    match event {
        ConfigEvent::AgeGroupChanged { age_group } => {
            config.age_group = age_group;
            config.job_function = available_function(age_group, config.job_function);
            config.years_of_service = normalise_years(age_group, config.years_of_service);
        }
        ConfigEvent::JobFunctionChanged { job_function } => {
            config.job_function = available_function(config.age_group, job_function);
        }
        ConfigEvent::YearsOfServiceChanged { years_of_service } => {
            config.years_of_service = normalise_years(config.age_group, years_of_service);
        }
        ConfigEvent::RateModeChanged { rate_mode } => {
            config.rate_mode = rate_mode;
        }
        ConfigEvent::FlatRateEntered { text } => {
            config.flat_hourly_rate = parse_rate(&text);
        }
        ConfigEvent::NumberOfWeeksChanged { number_of_weeks } => {
            config.number_of_weeks = if number_of_weeks == 0 {
                DEFAULT_NUMBER_OF_WEEKS
            } else {
                number_of_weeks
            };
        }
        ConfigEvent::DeductionsChanged { deductions } => {
            config.deductions = deductions;
        }
    }

    tracing::debug!(
        age_group = %config.age_group,
        job_function = %config.job_function,
        years_of_service = config.years_of_service,
        "Applied configuration event"
    );

    config
}
