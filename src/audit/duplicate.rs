//! Duplicate entry check.

use tracing::debug;

use crate::grouping::group_by_first_seen;
use crate::models::{AlertKind, AuditAlert, PayrollRecord, Severity};

/// Runs the duplicate check.
///
/// Records sharing the full natural key `(tax_id, year, month, department)`
/// are duplicates. Each such group yields one high-severity alert, however
/// many copies it holds.
pub fn run_duplicate_check(records: &[PayrollRecord]) -> Vec<AuditAlert> {
    let alerts: Vec<AuditAlert> = group_by_first_seen(records, |r| {
        (r.tax_id.as_str(), r.year, r.month, r.department.as_str())
    })
    .into_iter()
    .filter(|group| group.len() > 1)
    .map(|group| duplicate_alert(&group))
    .collect();

    debug!(
        rule = "duplicate",
        records = records.len(),
        alerts = alerts.len(),
        "Audit rule evaluated"
    );

    alerts
}

fn duplicate_alert(group: &[&PayrollRecord]) -> AuditAlert {
    let first = group[0];
    AuditAlert {
        kind: AlertKind::Duplicate,
        severity: Severity::High,
        title: "Tax ID duplicated in month".to_string(),
        description: format!(
            "{} ({}) appears {}x in {} - {}",
            first.name,
            first.tax_id,
            group.len(),
            first.department,
            first.period()
        ),
        evidence: group.iter().map(|r| (*r).clone()).collect(),
    }
}
