//! Cross-department check.
//!
//! Flags payees who were paid by more than one department in the same month.
//! Being paid twice by the *same* department is the duplicate check's job.

use tracing::debug;

use crate::grouping::group_by_first_seen;
use crate::models::{AlertKind, AuditAlert, PayrollRecord, Severity};

/// Runs the cross-department check over a record set.
///
/// Records are grouped by `(tax_id, year, month)`. Any group spanning more
/// than one distinct department produces one high-severity alert whose
/// evidence is every record in the group.
///
/// # Example
///
/// ```
/// use payroll_audit::audit::run_cross_department_check;
/// use payroll_audit::models::{AlertKind, PayrollRecord};
/// use rust_decimal::Decimal;
///
/// let paid_by = |department: &str| PayrollRecord {
///     tax_id: "123".to_string(),
///     name: "Jane Doe".to_string(),
///     role: "Clerk".to_string(),
///     department: department.to_string(),
///     municipality: String::new(),
///     year: 2024,
///     month: 3,
///     gross_amount: Decimal::new(3000, 0),
///     net_amount: Decimal::new(2500, 0),
/// };
///
/// let alerts = run_cross_department_check(&[paid_by("Health"), paid_by("Education")]);
/// assert_eq!(alerts.len(), 1);
/// assert_eq!(alerts[0].kind, AlertKind::CrossDepartment);
/// assert_eq!(alerts[0].evidence.len(), 2);
/// ```
pub fn run_cross_department_check(records: &[PayrollRecord]) -> Vec<AuditAlert> {
    let alerts: Vec<AuditAlert> =
        group_by_first_seen(records, |r| (r.tax_id.as_str(), r.year, r.month))
            .into_iter()
            .filter_map(|group| cross_department_alert(&group))
            .collect();

    debug!(
        rule = "cross_department",
        records = records.len(),
        alerts = alerts.len(),
        "Audit rule evaluated"
    );

    alerts
}

fn cross_department_alert(group: &[&PayrollRecord]) -> Option<AuditAlert> {
    let departments = distinct_departments(group);
    if departments.len() < 2 {
        return None;
    }

    let first = group.first()?;
    Some(AuditAlert {
        kind: AlertKind::CrossDepartment,
        severity: Severity::High,
        title: format!("Tax ID {} in multiple departments", first.tax_id),
        description: format!(
            "{} was paid by {} in the same month ({})",
            first.name,
            departments.join(", "),
            first.period()
        ),
        evidence: group.iter().map(|r| (*r).clone()).collect(),
    })
}

/// Distinct departments in order of first occurrence.
fn distinct_departments<'a>(group: &[&'a PayrollRecord]) -> Vec<&'a str> {
    let mut departments: Vec<&str> = Vec::new();
    for &record in group {
        if !departments.contains(&record.department.as_str()) {
            departments.push(record.department.as_str());
        }
    }
    departments
}
