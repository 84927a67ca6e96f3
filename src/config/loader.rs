//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll data
//! from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::{AllowanceMultipliers, PayrollCalendar};
use crate::error::{EngineError, EngineResult};
use crate::models::PayrollConfig;

use super::types::{PayrollData, PayrollFile, PayrollMetadata, RateTable};

/// Loads and provides access to static payroll data.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides the rate tables, defaults, multipliers and calendar anchor.
///
/// # Directory Structure
///
/// ```text
/// config/ah2025/
/// ├── payroll.yaml   # Metadata, defaults, multipliers, calendar anchor
/// └── rates.yaml     # Hourly rate tables
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{AgeGroup, JobFunction};
///
/// let loader = ConfigLoader::load("./config/ah2025").unwrap();
/// let rate = loader.rates().base_rate(JobFunction::Cashier, AgeGroup::Age21Plus);
/// println!("Cashier 21+: {:?}", rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    data: PayrollData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    /// - The calendar anchor cannot produce 13 whole-week periods
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/ah2025")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollFile>(&path.join("payroll.yaml"))?;
        let rates = Self::load_yaml::<RateTable>(&path.join("rates.yaml"))?;

        validate_calendar(&payroll.calendar).map_err(|message| EngineError::ConfigParseError {
            path: path.join("payroll.yaml").display().to_string(),
            message,
        })?;

        if rates.base.is_empty() {
            return Err(EngineError::ConfigParseError {
                path: path.join("rates.yaml").display().to_string(),
                message: "no base function rates defined".to_string(),
            });
        }

        tracing::info!(
            data_set = %payroll.metadata.code,
            version = %payroll.metadata.version,
            base_functions = rates.base.len(),
            "Loaded payroll data"
        );

        Ok(Self {
            data: PayrollData::new(payroll, rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll data.
    pub fn data(&self) -> &PayrollData {
        &self.data
    }

    /// Returns the data set metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        self.data.metadata()
    }

    /// Returns the configuration a new user starts from.
    pub fn defaults(&self) -> &PayrollConfig {
        self.data.defaults()
    }

    /// Returns the hourly rate tables.
    pub fn rates(&self) -> &RateTable {
        self.data.rates()
    }

    /// Returns the allowance multipliers.
    pub fn multipliers(&self) -> &AllowanceMultipliers {
        self.data.multipliers()
    }

    /// Returns the payroll calendar anchor.
    pub fn calendar(&self) -> &PayrollCalendar {
        self.data.calendar()
    }
}

/// Checks the calendar block before any period is derived from it.
fn validate_calendar(calendar: &PayrollCalendar) -> Result<(), String> {
    if calendar.period_length_days <= 0 || calendar.period_length_days % 7 != 0 {
        return Err(format!(
            "calendar.period_length_days must be a positive multiple of 7, got {}",
            calendar.period_length_days
        ));
    }
    if calendar.processing_gap_days < 0 {
        return Err(format!(
            "calendar.processing_gap_days must not be negative, got {}",
            calendar.processing_gap_days
        ));
    }
    if !(1..=13).contains(&calendar.anchor_period) {
        return Err(format!(
            "calendar.anchor_period must be between 1 and 13, got {}",
            calendar.anchor_period
        ));
    }
    Ok(())
}
