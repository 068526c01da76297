//! The consolidated payroll report.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::breakdown::{
    BandCount, DepartmentTotals, RoleTotals, department_breakdown, role_breakdown,
    salary_distribution,
};
use super::evolution::{PeriodTotals, cost_evolution};
use super::snapshot::PayrollSnapshot;
use crate::audit::{AlertSummary, run_all_checks_with};
use crate::config::{AuditRules, ReportSettings};
use crate::models::PayrollRecord;

/// Everything the report page shows for one record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Municipality of the first record that names one.
    pub municipality: Option<String>,
    /// Number of records the report covers.
    pub record_count: usize,
    /// Sum of gross amounts across every period.
    pub total_gross: Decimal,
    /// Latest-period indicators; `None` for an empty set.
    pub snapshot: Option<PayrollSnapshot>,
    /// Per-period totals.
    pub evolution: Vec<PeriodTotals>,
    /// Cost per department.
    pub departments: Vec<DepartmentTotals>,
    /// Most common roles.
    pub top_roles: Vec<RoleTotals>,
    /// Records per salary band.
    pub salary_distribution: Vec<BandCount>,
    /// Audit findings by kind and severity.
    pub alerts: AlertSummary,
}

impl PayrollReport {
    /// Builds the report over `records`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_audit::analytics::PayrollReport;
    /// use payroll_audit::config::{AuditRules, ReportSettings};
    ///
    /// let report = PayrollReport::build(&[], &ReportSettings::default(), &AuditRules::default());
    /// assert!(report.snapshot.is_none());
    /// assert_eq!(report.alerts.total, 0);
    /// ```
    pub fn build(records: &[PayrollRecord], settings: &ReportSettings, rules: &AuditRules) -> Self {
        let alerts = run_all_checks_with(records, rules);

        let report = Self {
            municipality: records
                .iter()
                .map(|r| r.municipality.trim())
                .find(|m| !m.is_empty())
                .map(str::to_string),
            record_count: records.len(),
            total_gross: records.iter().map(|r| r.gross_amount).sum(),
            snapshot: PayrollSnapshot::latest(records),
            evolution: cost_evolution(records),
            departments: department_breakdown(records),
            top_roles: role_breakdown(records, settings.top_roles),
            salary_distribution: salary_distribution(records, &settings.salary_bands),
            alerts: AlertSummary::from_alerts(&alerts),
        };

        info!(
            records = report.record_count,
            periods = report.evolution.len(),
            alerts = report.alerts.total,
            "Payroll report built"
        );

        report
    }
}
