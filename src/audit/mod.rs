//! The audit rule engine.
//!
//! Each rule is a pure function over a slice of payroll records that returns
//! the alerts it finds. Rules are independent: none calls another and none
//! keeps state between calls, so any subset may be run, in any order, on the
//! same input. This module also provides the compositions the alert screens
//! use: every rule over the full set, or a period-scoped run.

mod cross_department;
mod duplicate;
mod format;
mod new_hire;
mod summary;
mod variation;
mod zero_withholding;

pub use cross_department::run_cross_department_check;
pub use duplicate::run_duplicate_check;
pub use format::{CURRENCY_SYMBOL, format_currency, format_percent};
pub use new_hire::run_new_hire_check;
pub use summary::AlertSummary;
pub use variation::{
    DEFAULT_VARIATION_THRESHOLD, percent_change, run_variation_check,
    run_variation_check_with_threshold,
};
pub use zero_withholding::run_zero_withholding_check;

use tracing::debug;

use crate::config::AuditRules;
use crate::models::{AlertKind, AuditAlert, PayrollRecord, Period};

/// Runs all five checks with default thresholds.
///
/// Alerts are concatenated in a fixed order: cross-department, variation,
/// zero-withholding, duplicate, new-hire.
pub fn run_all_checks(records: &[PayrollRecord]) -> Vec<AuditAlert> {
    run_all_checks_with(records, &AuditRules::default())
}

/// Runs all five checks with the given thresholds.
pub fn run_all_checks_with(records: &[PayrollRecord], rules: &AuditRules) -> Vec<AuditAlert> {
    let mut alerts = run_cross_department_check(records);
    alerts.extend(run_variation_check_with_threshold(
        records,
        rules.variation_threshold_pct,
    ));
    alerts.extend(run_zero_withholding_check(records));
    alerts.extend(run_duplicate_check(records));
    alerts.extend(run_new_hire_check(records));

    debug!(
        records = records.len(),
        alerts = alerts.len(),
        "All audit rules evaluated"
    );

    alerts
}

/// Runs all five checks scoped to one period.
///
/// The non-temporal checks (cross-department, zero-withholding, duplicate)
/// see only the records of `period`. The temporal checks (variation,
/// new-hire) need neighbouring months, so they run over the full set and
/// keep only alerts whose evidence falls in `period`. Output order matches
/// [`run_all_checks`].
pub fn run_period_checks(
    records: &[PayrollRecord],
    period: Period,
    rules: &AuditRules,
) -> Vec<AuditAlert> {
    let scoped: Vec<PayrollRecord> = records
        .iter()
        .filter(|r| r.period() == period)
        .cloned()
        .collect();

    let mut alerts = run_cross_department_check(&scoped);
    alerts.extend(
        run_variation_check_with_threshold(records, rules.variation_threshold_pct)
            .into_iter()
            .filter(|alert| alert.touches_period(period)),
    );
    alerts.extend(run_zero_withholding_check(&scoped));
    alerts.extend(run_duplicate_check(&scoped));
    alerts.extend(
        run_new_hire_check(records)
            .into_iter()
            .filter(|alert| alert.touches_period(period)),
    );

    debug!(
        period = %period,
        scoped_records = scoped.len(),
        alerts = alerts.len(),
        "Period audit rules evaluated"
    );

    alerts
}

/// Keeps only alerts of the given kinds. An empty `kinds` keeps everything.
pub fn filter_by_kind(alerts: Vec<AuditAlert>, kinds: &[AlertKind]) -> Vec<AuditAlert> {
    if kinds.is_empty() {
        return alerts;
    }
    alerts
        .into_iter()
        .filter(|alert| kinds.contains(&alert.kind))
        .collect()
}
