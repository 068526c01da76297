//! Zero-withholding check.
//!
//! A real payroll line always withholds something, so a positive gross
//! amount paid out in full is an anomaly.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AlertKind, AuditAlert, PayrollRecord, Severity};

use super::format::format_currency;

/// Runs the zero-withholding check.
///
/// Emits one medium-severity alert per record with `gross_amount > 0` and
/// `net_amount == gross_amount`. No grouping is applied.
pub fn run_zero_withholding_check(records: &[PayrollRecord]) -> Vec<AuditAlert> {
    let alerts: Vec<AuditAlert> = records
        .iter()
        .filter(|r| r.gross_amount > Decimal::ZERO && r.net_amount == r.gross_amount)
        .map(zero_withholding_alert)
        .collect();

    debug!(
        rule = "zero_withholding",
        records = records.len(),
        alerts = alerts.len(),
        "Audit rule evaluated"
    );

    alerts
}

fn zero_withholding_alert(record: &PayrollRecord) -> AuditAlert {
    AuditAlert {
        kind: AlertKind::ZeroWithholding,
        severity: Severity::Medium,
        title: "Net equals gross (no withholding)".to_string(),
        description: format!(
            "{} ({}): {} in {} - {}",
            record.name,
            record.tax_id,
            format_currency(record.gross_amount),
            record.period(),
            record.department
        ),
        evidence: vec![record.clone()],
    }
}
