//! Response types for the payroll estimator API.
//!
//! This module defines the success envelopes and the error response
//! structures for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AgeGroup, JobFunction, PayrollConfig, Results, WeekShifts};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPeriod { period_number } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    format!("Invalid period number: {}", period_number),
                    "Period numbers run from 1 to 13",
                ),
            },
            EngineError::UnsupportedYear { year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNSUPPORTED_YEAR",
                    format!("Unsupported payroll year {}", year),
                    "Payroll years run from 1900 to 2999",
                ),
            },
            EngineError::ShiftNotFound { shift_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SHIFT_NOT_FOUND", format!("Shift not found: {}", shift_id)),
            },
        }
    }
}

/// Response body of `/calculate`.
///
/// Wraps the engine [`Results`] with the request metadata the engine itself
/// never produces, so the results stay deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique id of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version that produced the result.
    pub engine_version: String,
    /// Time spent in the engine, in microseconds.
    pub duration_us: u64,
    /// The estimate.
    pub results: Results,
}

/// Response body of `/shifts/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// True when `errors` is empty.
    pub valid: bool,
    /// Problems found, in display order.
    pub errors: Vec<String>,
}

impl From<Vec<String>> for ValidationResponse {
    fn from(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Response body of `/config/transition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigTransitionResponse {
    /// The configuration after the event.
    pub config: PayrollConfig,
    /// The submitted weeks, resized to `config.number_of_weeks`.
    pub weeks: Vec<WeekShifts>,
}

/// Response body of `/rates/options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateOptionsResponse {
    /// Every age group, ascending.
    pub age_groups: Vec<AgeGroup>,
    /// The age group the other lists were computed for.
    pub age_group: AgeGroup,
    /// Job functions offered to that age group.
    pub job_functions: Vec<JobFunction>,
    /// Years-of-service choices for that age group.
    pub years_of_service: Vec<u8>,
}
