//! HTTP API module for the payroll audit engine.
//!
//! This module exposes the audit rules and analytics as JSON endpoints. The
//! service is stateless: each request carries the records it works on.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AuditRequest, CompareRequest, ReportRequest, SearchRequest};
pub use response::{ApiError, ApiErrorResponse, AuditResponse, HealthResponse, SearchResponse};
pub use state::AppState;
