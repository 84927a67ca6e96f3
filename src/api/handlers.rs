//! HTTP request handlers for the payroll estimator API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    age_groups, apply_config_event, compute_results, job_functions_for, validate_shift,
    years_of_service_options,
};
use crate::models::resize_weeks;

use super::request::{
    CalculationRequest, ConfigTransitionRequest, PeriodStatusQuery, RateOptionsQuery,
    ValidateShiftRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, ConfigTransitionResponse,
    RateOptionsResponse, ValidationResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/periods/status", get(period_status_handler))
        .route("/periods/:year", get(periods_for_year_handler))
        .route("/shifts/validate", post(validate_shift_handler))
        .route("/config/transition", post(config_transition_handler))
        .route("/rates/options", get(rate_options_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a body rejection to the API error shape.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Handler for POST /calculate.
///
/// Prices the submitted weeks of shifts with the submitted configuration.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let shift_count: usize = request.weeks.iter().map(|week| week.shifts.len()).sum();
    let start_time = Instant::now();
    let results = compute_results(&request.config, &request.weeks, state.config().data());
    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);

    info!(
        correlation_id = %correlation_id,
        weeks = request.weeks.len(),
        shifts_count = shift_count,
        gross_pay = %results.gross_pay,
        net_pay = %results.net_pay,
        duration_us = duration_us,
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_us,
            results,
        },
    )
}

/// Handler for GET /periods/status.
///
/// Answers for `today` when given, otherwise for the server's local date.
async fn period_status_handler(
    State(state): State<AppState>,
    query: Result<Query<PeriodStatusQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    match state.config().calendar().period_status(today) {
        Ok(status) => {
            info!(
                correlation_id = %correlation_id,
                today = %today,
                period = status.current_period.period_number,
                pending = status.pending_payout.is_some(),
                "Resolved period status"
            );
            json_response(StatusCode::OK, status)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Period status failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /periods/:year.
async fn periods_for_year_handler(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> Response {
    let year = match year {
        Ok(Path(year)) => year,
        Err(rejection) => {
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    match state.config().calendar().periods_for_year(year) {
        Ok(periods) => json_response(StatusCode::OK, periods),
        Err(err) => {
            warn!(year = year, error = %err, "Period listing failed");
            error_response(err.into())
        }
    }
}

/// Handler for POST /shifts/validate.
async fn validate_shift_handler(
    payload: Result<Json<ValidateShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let response: ValidationResponse = validate_shift(&request.shift).into();
    json_response(StatusCode::OK, response)
}

/// Handler for POST /config/transition.
///
/// Returns the new configuration and the submitted weeks resized to its
/// number of weeks; content is kept by index.
async fn config_transition_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConfigTransitionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let current = request
        .config
        .unwrap_or_else(|| state.config().defaults().clone());
    let config = apply_config_event(current, request.event);
    let weeks = resize_weeks(request.weeks, usize::from(config.number_of_weeks));

    json_response(StatusCode::OK, ConfigTransitionResponse { config, weeks })
}

/// Handler for GET /rates/options.
///
/// Without an age group the lists are computed for the data-set default.
async fn rate_options_handler(
    State(state): State<AppState>,
    query: Result<Query<RateOptionsQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    let age_group = query
        .age_group
        .unwrap_or(state.config().defaults().age_group);

    json_response(
        StatusCode::OK,
        RateOptionsResponse {
            age_groups: age_groups(),
            age_group,
            job_functions: job_functions_for(age_group),
            years_of_service: years_of_service_options(age_group),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let config = ConfigLoader::load("./config/ah2025").unwrap();
        create_router(AppState::new(config))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = create_test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_rate_options_for_minor() {
        let (status, body) = get_json("/rates/options?age_group=16").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age_groups"].as_array().unwrap().len(), 7);
        assert_eq!(body["job_functions"].as_array().unwrap().len(), 4);
        assert_eq!(body["years_of_service"], serde_json::json!([0]));
    }

    #[tokio::test]
    async fn test_rate_options_default_age_group() {
        let (status, body) = get_json("/rates/options").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age_group"], "21+");
        assert_eq!(body["years_of_service"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_unknown_age_group_is_rejected() {
        let (status, body) = get_json("/rates/options?age_group=12").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
