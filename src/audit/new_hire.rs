//! New-on-payroll check.
//!
//! Flags payees who were not paid in the previous payroll period present in
//! the data. The earliest period has nothing to compare against, so everyone
//! in it is treated as pre-existing.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::models::{AlertKind, AuditAlert, PayrollRecord, Period, Severity};

use super::format::format_currency;

/// Runs the new-on-payroll check.
///
/// Periods are visited in chronological order. Each record whose tax id is
/// missing from the preceding period yields one low-severity alert. Alerts
/// are per record: a new payee paid by two departments in their first month
/// produces two alerts.
///
/// The "previous period" is the previous period *present in the data*, not
/// necessarily the previous calendar month.
pub fn run_new_hire_check(records: &[PayrollRecord]) -> Vec<AuditAlert> {
    let mut by_period: BTreeMap<Period, Vec<&PayrollRecord>> = BTreeMap::new();
    for record in records {
        by_period.entry(record.period()).or_default().push(record);
    }

    let periods: Vec<&Vec<&PayrollRecord>> = by_period.values().collect();
    let mut alerts = Vec::new();

    for pair in periods.windows(2) {
        let previous: HashSet<&str> = pair[0].iter().map(|r| r.tax_id.as_str()).collect();
        alerts.extend(
            pair[1]
                .iter()
                .filter(|r| !previous.contains(r.tax_id.as_str()))
                .map(|r| new_hire_alert(r)),
        );
    }

    debug!(
        rule = "new_hire",
        records = records.len(),
        periods = by_period.len(),
        alerts = alerts.len(),
        "Audit rule evaluated"
    );

    alerts
}

fn new_hire_alert(record: &PayrollRecord) -> AuditAlert {
    AuditAlert {
        kind: AlertKind::NewHire,
        severity: Severity::Low,
        title: format!("New on payroll: {}", record.name),
        description: format!(
            "{} ({}) appeared for the first time in {} - {} (Gross: {})",
            record.name,
            record.tax_id,
            record.department,
            record.period(),
            format_currency(record.gross_amount)
        ),
        evidence: vec![record.clone()],
    }
}
