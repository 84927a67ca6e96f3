//! Request types for the payroll estimator API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! HTTP endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::ConfigEvent;
use crate::models::{AgeGroup, PayrollConfig, Shift, WeekShifts};

/// Request body for the `/calculate` endpoint.
///
/// Contains the active configuration and the shifts entered for each week
/// of the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The configuration to price the shifts with.
    pub config: PayrollConfig,
    /// The weeks of shift entry.
    #[serde(default)]
    pub weeks: Vec<WeekShifts>,
}

/// Query string for `/periods/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodStatusQuery {
    /// The day to answer for. Defaults to the server's local date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for `/shifts/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateShiftRequest {
    /// The shift to check.
    pub shift: Shift,
}

/// Request body for `/config/transition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigTransitionRequest {
    /// The configuration before the change. Uses the data-set defaults when omitted.
    #[serde(default)]
    pub config: Option<PayrollConfig>,
    /// The change to apply.
    pub event: ConfigEvent,
    /// The weeks entered so far, resized to the new number of weeks.
    #[serde(default)]
    pub weeks: Vec<WeekShifts>,
}

/// Query string for `/rates/options`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateOptionsQuery {
    /// Restricts the function and service options to this age group.
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
}
