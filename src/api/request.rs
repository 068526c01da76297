//! Request types for the payroll audit API.
//!
//! Every endpoint receives the record set in the body; the service keeps no
//! records between requests.

use serde::{Deserialize, Serialize};

use crate::analytics::RecordFilter;
use crate::error::EngineResult;
use crate::models::{AlertKind, PayrollRecord, Period};

/// Request body for the `/audit` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// The records to audit.
    pub records: Vec<PayrollRecord>,
    /// Scope the audit to one period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    /// Keep only alerts of these kinds; empty keeps all.
    #[serde(default)]
    pub kinds: Vec<AlertKind>,
}

/// Request body for the `/records/search` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The records to search.
    pub records: Vec<PayrollRecord>,
    /// Filter criteria; an absent filter matches everything.
    #[serde(default)]
    pub filter: RecordFilter,
}

/// Request body for the `/reports/summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The records to report on.
    pub records: Vec<PayrollRecord>,
    /// Restrict the report to one year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Request body for the `/reports/compare` endpoint.
///
/// With neither `from` nor `to`, the last two periods present are compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// The records to compare.
    pub records: Vec<PayrollRecord>,
    /// The earlier period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Period>,
    /// The later period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Period>,
}

/// Re-checks a period that came in over the wire.
pub(crate) fn checked_period(period: Period) -> EngineResult<Period> {
    Period::try_new(period.year, period.month)
}
