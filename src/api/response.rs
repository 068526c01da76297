//! Response types for the payroll audit API.
//!
//! This module defines the success bodies, the error body, and the mapping
//! from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::RecordTotals;
use crate::audit::AlertSummary;
use crate::error::EngineError;
use crate::models::{AuditAlert, PayrollRecord, Period};

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}

impl HealthResponse {
    /// The current service health.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response body for `POST /audit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResponse {
    /// Unique id of this audit run.
    pub report_id: Uuid,
    /// When the audit ran.
    pub generated_at: DateTime<Utc>,
    /// Number of records received.
    pub record_count: usize,
    /// The period the audit was scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// Alert counts.
    pub summary: AlertSummary,
    /// The alerts, in rule order.
    pub alerts: Vec<AuditAlert>,
}

impl AuditResponse {
    /// Wraps a finished audit run.
    pub fn new(record_count: usize, period: Option<Period>, alerts: Vec<AuditAlert>) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            record_count,
            period,
            summary: AlertSummary::from_alerts(&alerts),
            alerts,
        }
    }
}

/// Response body for `POST /records/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The matching records.
    pub records: Vec<PayrollRecord>,
    /// Totals over the matching records.
    pub totals: RecordTotals,
}

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
    /// A 400 response carrying `error`.
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
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        message,
                    ),
                }
            }
            EngineError::InvalidRecord { index, field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_RECORD",
                    message,
                    format!("Record {} has an invalid '{}' value", index, field),
                ),
            ),
            EngineError::InvalidPeriod { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PERIOD", message))
            }
            EngineError::PeriodNotFound { period } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "PERIOD_NOT_FOUND",
                    message,
                    format!("Submit records for {} or pick another period", period.label()),
                ),
            },
            EngineError::InsufficientPeriods { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::new("INSUFFICIENT_PERIODS", message),
            },
        }
    }
}
