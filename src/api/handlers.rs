//! HTTP request handlers for the payroll audit API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{
    PayrollReport, RecordFilter, RecordTotals, compare_periods, latest_comparison,
};
use crate::audit::{filter_by_kind, run_all_checks_with, run_period_checks};
use crate::error::EngineError;
use crate::models::validate_records;

use super::request::{AuditRequest, CompareRequest, ReportRequest, SearchRequest, checked_period};
use super::response::{ApiError, ApiErrorResponse, AuditResponse, HealthResponse, SearchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/audit", post(audit_handler))
        .route("/records/search", post(search_handler))
        .route("/reports/summary", post(summary_handler))
        .route("/reports/compare", post(compare_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for POST /audit.
///
/// Validates the records, runs every rule (optionally scoped to one period)
/// and returns the alerts with their summary.
async fn audit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing audit request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = validate_records(&request.records) {
        return engine_error_response(err, correlation_id);
    }

    let period = match request.period.map(checked_period).transpose() {
        Ok(period) => period,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    let rules = state.config().rules();
    let alerts = match period {
        Some(period) => run_period_checks(&request.records, period, rules),
        None => run_all_checks_with(&request.records, rules),
    };
    let alerts = filter_by_kind(alerts, &request.kinds);
    let response = AuditResponse::new(request.records.len(), period, alerts);

    info!(
        correlation_id = %correlation_id,
        report_id = %response.report_id,
        records = response.record_count,
        alerts = response.summary.total,
        duration_us = start_time.elapsed().as_micros(),
        "Audit completed successfully"
    );

    json_response(StatusCode::OK, &response)
}

/// Handler for POST /records/search.
async fn search_handler(payload: Result<Json<SearchRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing search request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = validate_records(&request.records) {
        return engine_error_response(err, correlation_id);
    }
    if let Some(month) = request.filter.month {
        if !(1..=12).contains(&month) {
            let year = request.filter.year.unwrap_or_default();
            let err = EngineError::InvalidPeriod { year, month };
            return engine_error_response(err, correlation_id);
        }
    }

    let records = request.filter.apply(&request.records);
    let totals = RecordTotals::from_records(&records);

    info!(
        correlation_id = %correlation_id,
        received = request.records.len(),
        matched = records.len(),
        "Search completed successfully"
    );

    json_response(StatusCode::OK, &SearchResponse { records, totals })
}

/// Handler for POST /reports/summary.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = validate_records(&request.records) {
        return engine_error_response(err, correlation_id);
    }

    let records = RecordFilter {
        year: request.year,
        ..Default::default()
    }
    .apply(&request.records);

    let config = state.config();
    let report = PayrollReport::build(&records, config.reports(), config.rules());

    info!(
        correlation_id = %correlation_id,
        records = report.record_count,
        alerts = report.alerts.total,
        "Summary report completed successfully"
    );

    json_response(StatusCode::OK, &report)
}

/// Handler for POST /reports/compare.
///
/// Compares `from` and `to` when both are given, or the last two periods
/// present when neither is.
async fn compare_handler(payload: Result<Json<CompareRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    if let Err(err) = validate_records(&request.records) {
        return engine_error_response(err, correlation_id);
    }

    let result = match (request.from, request.to) {
        (Some(from), Some(to)) => checked_period(from)
            .and_then(|from| Ok((from, checked_period(to)?)))
            .and_then(|(from, to)| compare_periods(&request.records, from, to)),
        (None, None) => latest_comparison(&request.records),
        _ => {
            warn!(correlation_id = %correlation_id, "Comparison needs both periods or neither");
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                "'from' and 'to' must be given together",
            )));
        }
    };

    match result {
        Ok(comparison) => {
            info!(
                correlation_id = %correlation_id,
                from = %comparison.from,
                to = %comparison.to,
                payees = comparison.changes.len(),
                "Comparison completed successfully"
            );
            json_response(StatusCode::OK, &comparison)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
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
    error_response(ApiErrorResponse::bad_request(error))
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    error_response(err.into())
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    api_error.into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
