//! HTTP request handlers for the settlement API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::ingest::parse_employee_batch;
use crate::models::EmployeeRecord;

use super::request::{BatchRequest, SettlementRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/settlements", post(settlement_handler))
        .route("/settlements/batch", post(batch_handler))
        .with_state(state)
}

/// Handler for POST /settlements.
///
/// Accepts one employee with adjustments and returns the settlement.
async fn settlement_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let options = request.options();
    let economy = state.economy_or_default(request.economy);
    let calculation_type = request.calculation_type;
    let employee: EmployeeRecord = request.employee.into();

    let start_time = Instant::now();
    match state
        .engine()
        .compute(&employee, economy, calculation_type, &options)
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                calculation_type = calculation_type.as_str(),
                net_total = %result.net_total,
                duration_us = start_time.elapsed().as_micros(),
                "Settlement completed successfully"
            );
            json_response(StatusCode::OK, Json(result))
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /settlements/batch.
///
/// Parses tab-separated rows and settles every valid employee with default
/// adjustments.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch settlement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let employees = match parse_employee_batch(&request.rows) {
        Ok(employees) => employees,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let economy = state.economy_or_default(request.economy);
    let start_time = Instant::now();
    match state
        .engine()
        .compute_batch(&employees, economy, request.calculation_type)
    {
        Ok(results) => {
            info!(
                correlation_id = %correlation_id,
                employees = results.len(),
                calculation_type = request.calculation_type.as_str(),
                duration_us = start_time.elapsed().as_micros(),
                "Batch settlement completed successfully"
            );
            json_response(StatusCode::OK, Json(results))
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn json_response(status: StatusCode, body: impl IntoResponse) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Settlement failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, Json(api_error.error))
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message, e.g. "missing field `employee`"
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
    json_response(StatusCode::BAD_REQUEST, Json(error))
}
