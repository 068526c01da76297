//! Audit alert models.
//!
//! An [`AuditAlert`] is one finding produced by an audit rule, carrying the
//! payroll records that justify it.

use serde::{Deserialize, Serialize};

use super::{PayrollRecord, Period};

/// The anomaly pattern an alert reports.
///
/// # Example
///
/// ```
/// use payroll_audit::models::AlertKind;
///
/// assert_eq!(
///     serde_json::to_string(&AlertKind::ZeroWithholding).unwrap(),
///     "\"zero_withholding\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Same payee paid by more than one department in the same month.
    CrossDepartment,
    /// Net pay rose above the threshold between consecutive months.
    Variation,
    /// Net pay equals gross pay, so nothing was withheld.
    ZeroWithholding,
    /// Same payee listed more than once for a department and month.
    Duplicate,
    /// Payee absent from the previous payroll period.
    NewHire,
}

impl AlertKind {
    /// All kinds, in composition order.
    pub const ALL: [AlertKind; 5] = [
        AlertKind::CrossDepartment,
        AlertKind::Variation,
        AlertKind::ZeroWithholding,
        AlertKind::Duplicate,
        AlertKind::NewHire,
    ];

    /// Human-readable label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::CrossDepartment => "Tax ID in multiple departments",
            AlertKind::Variation => "Net pay variation",
            AlertKind::ZeroWithholding => "Net equals gross",
            AlertKind::Duplicate => "Duplicated in month",
            AlertKind::NewHire => "New on payroll",
        }
    }
}

/// How urgently an alert needs review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Likely fraud or a data error that inflates cost.
    High,
    /// Suspicious, needs explanation.
    Medium,
    /// Informational.
    Low,
}

impl Severity {
    /// All severities, most urgent first.
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];
}

/// One finding produced by an audit rule.
///
/// Alerts are derived values: computed on demand from a record set and
/// never mutated afterwards.
///
/// # Example
///
/// ```
/// use payroll_audit::models::{AlertKind, AuditAlert, Severity};
///
/// let alert = AuditAlert {
///     kind: AlertKind::Duplicate,
///     severity: Severity::High,
///     title: "Tax ID duplicated in month".to_string(),
///     description: "Jane Doe (123) appears 2x in Health - 3/2024".to_string(),
///     evidence: vec![],
/// };
/// assert_eq!(alert.kind, AlertKind::Duplicate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditAlert {
    /// The anomaly pattern detected.
    pub kind: AlertKind,
    /// The severity of the finding.
    pub severity: Severity,
    /// Short human label.
    pub title: String,
    /// Full explanation with concrete values.
    pub description: String,
    /// The records that justify the finding.
    pub evidence: Vec<PayrollRecord>,
}

impl AuditAlert {
    /// Returns true if any evidence record falls in `period`.
    pub fn touches_period(&self, period: Period) -> bool {
        self.evidence.iter().any(|r| r.period() == period)
    }
}
