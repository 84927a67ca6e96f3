//! HTTP API module for the payroll estimator.
//!
//! This module exposes the estimate, the payroll calendar, shift validation,
//! configuration transitions and the rate option lists as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, ConfigTransitionRequest, PeriodStatusQuery, RateOptionsQuery,
    ValidateShiftRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, ConfigTransitionResponse,
    RateOptionsResponse, ValidationResponse,
};
pub use state::AppState;
