//! Configuration types for payroll estimation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculation::{AllowanceMultipliers, PayrollCalendar};
use crate::models::{AgeGroup, JobFunction, PayrollConfig};

/// Metadata about the payroll data set.
///
/// Contains identifying information about the labour agreement the rates
/// and break tiers were taken from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollMetadata {
    /// Short code of the data set (e.g., "AH2025").
    pub code: String,
    /// The human-readable name of the agreement.
    pub name: String,
    /// The version or effective date of the rates.
    pub version: String,
    /// URL to the published agreement.
    pub source_url: String,
}

/// Structure of `payroll.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollFile {
    /// Data set metadata.
    pub metadata: PayrollMetadata,
    /// Configuration a new user starts from.
    pub defaults: PayrollConfig,
    /// Allowance tier multipliers.
    pub multipliers: AllowanceMultipliers,
    /// Payroll calendar anchor.
    pub calendar: PayrollCalendar,
}

/// Hourly rate tables, the structure of `rates.yaml`.
///
/// Base functions are priced by age group. The lead function is priced by
/// age group and years of service and only exists for adults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    /// Base function rates: function, then age group.
    pub base: HashMap<JobFunction, HashMap<AgeGroup, Decimal>>,
    /// Lead function rates: age group, then years of service.
    pub shift_leader: HashMap<AgeGroup, HashMap<u8, Decimal>>,
}

impl RateTable {
    /// Rate for a base function, if one is published.
    pub fn base_rate(&self, function: JobFunction, age_group: AgeGroup) -> Option<Decimal> {
        self.base.get(&function)?.get(&age_group).copied()
    }

    /// Rate for the lead function, if one is published.
    pub fn lead_rate(&self, age_group: AgeGroup, service_bracket: u8) -> Option<Decimal> {
        self.shift_leader
            .get(&age_group)?
            .get(&service_bracket)
            .copied()
    }
}

/// The complete static payroll data.
///
/// This is the top-level structure that combines all configuration
/// components into a single, queryable structure.
#[derive(Debug, Clone)]
pub struct PayrollData {
    metadata: PayrollMetadata,
    defaults: PayrollConfig,
    multipliers: AllowanceMultipliers,
    calendar: PayrollCalendar,
    rates: RateTable,
}

impl PayrollData {
    /// Creates a new `PayrollData` from its components.
    pub fn new(file: PayrollFile, rates: RateTable) -> Self {
        Self {
            metadata: file.metadata,
            defaults: file.defaults,
            multipliers: file.multipliers,
            calendar: file.calendar,
            rates,
        }
    }

    /// Returns the data set metadata.
    pub fn metadata(&self) -> &PayrollMetadata {
        &self.metadata
    }

    /// Returns the default configuration.
    pub fn defaults(&self) -> &PayrollConfig {
        &self.defaults
    }

    /// Returns the allowance multipliers.
    pub fn multipliers(&self) -> &AllowanceMultipliers {
        &self.multipliers
    }

    /// Returns the payroll calendar.
    pub fn calendar(&self) -> &PayrollCalendar {
        &self.calendar
    }

    /// Returns the hourly rate tables.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_rate_table() {
        let yaml = r#"
base:
  cashier:
    "13-15": "6.35"
    "21+": "19.85"
shift_leader:
  "21+":
    0: "19.97"
    5: "23.20"
"#;
        let table: RateTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            table.base_rate(JobFunction::Cashier, AgeGroup::Age13To15),
            Some(dec("6.35"))
        );
        assert_eq!(table.base_rate(JobFunction::Cashier, AgeGroup::Age16), None);
        assert_eq!(table.lead_rate(AgeGroup::Age21Plus, 5), Some(dec("23.20")));
        assert_eq!(table.lead_rate(AgeGroup::Age21Plus, 3), None);
        assert_eq!(table.lead_rate(AgeGroup::Age18, 0), None);
    }

    #[test]
    fn test_deserialize_metadata() {
        let yaml = r#"
code: "AH2025"
name: "Supermarket CAO"
version: "2025-07-01"
source_url: "https://example.org/cao"
"#;
        let metadata: PayrollMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.code, "AH2025");
        assert_eq!(metadata.version, "2025-07-01");
    }
}
