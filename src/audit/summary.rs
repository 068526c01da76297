//! Alert counting for summary cards and reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{AlertKind, AuditAlert, Severity};

/// Alert counts by kind and by severity.
///
/// Every kind and severity is present, with zero when nothing was found.
///
/// # Example
///
/// ```
/// use payroll_audit::audit::AlertSummary;
/// use payroll_audit::models::{AlertKind, Severity};
///
/// let summary = AlertSummary::from_alerts(&[]);
/// assert_eq!(summary.total, 0);
/// assert_eq!(summary.count_kind(AlertKind::Duplicate), 0);
/// assert_eq!(summary.count_severity(Severity::High), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    /// Total number of alerts.
    pub total: usize,
    /// Alert count per kind.
    pub by_kind: BTreeMap<AlertKind, usize>,
    /// Alert count per severity.
    pub by_severity: BTreeMap<Severity, usize>,
}

impl AlertSummary {
    /// Counts a list of alerts.
    pub fn from_alerts(alerts: &[AuditAlert]) -> Self {
        let mut by_kind: BTreeMap<AlertKind, usize> =
            AlertKind::ALL.iter().map(|kind| (*kind, 0)).collect();
        let mut by_severity: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|severity| (*severity, 0)).collect();

        for alert in alerts {
            *by_kind.entry(alert.kind).or_insert(0) += 1;
            *by_severity.entry(alert.severity).or_insert(0) += 1;
        }

        Self {
            total: alerts.len(),
            by_kind,
            by_severity,
        }
    }

    /// Number of alerts of one kind.
    pub fn count_kind(&self, kind: AlertKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Number of alerts of one severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}
