//! Error types for the payroll engine.
//!
//! The calculation paths themselves never fail on malformed numbers or times;
//! they degrade to zero. The errors here cover configuration loading, period
//! lookups outside the 13-period cycle and addressing shifts by id.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll period number outside 1..=13 was requested.
    #[error("Invalid period number {period_number}: must be between 1 and 13")]
    InvalidPeriod {
        /// The rejected period number.
        period_number: u32,
    },

    /// No shift with the given id exists in the week.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The id that was looked up.
        shift_id: String,
    },

    /// A payroll year outside the range the calendar can represent.
    #[error("Unsupported payroll year {year}")]
    UnsupportedYear {
        /// The rejected year.
        year: i32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
