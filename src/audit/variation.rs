//! Month-over-month net pay variation check.
//!
//! Flags a payee whose combined net pay rose by more than a threshold
//! percentage between two consecutive calendar months. Months where the
//! payee is absent break the sequence: a payee paid in January and March is
//! never compared across the gap.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::grouping::group_by_first_seen;
use crate::models::{AlertKind, AuditAlert, PayrollRecord, Period, Severity};

use super::format::{format_currency, format_percent};

/// Default variation threshold in percent.
///
/// Increases strictly above this value are flagged.
pub const DEFAULT_VARIATION_THRESHOLD: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// A payee's pay for one period, summed across departments.
struct MonthlyPay<'a> {
    /// First record seen for the period; supplies display fields.
    representative: &'a PayrollRecord,
    gross: Decimal,
    net: Decimal,
}

impl MonthlyPay<'_> {
    /// The representative record carrying the aggregated amounts.
    fn evidence(&self) -> PayrollRecord {
        PayrollRecord {
            gross_amount: self.gross,
            net_amount: self.net,
            ..self.representative.clone()
        }
    }
}

/// Runs the variation check with the default 20% threshold.
///
/// # Example
///
/// ```
/// use payroll_audit::audit::run_variation_check;
/// use payroll_audit::models::{AlertKind, PayrollRecord};
/// use rust_decimal::Decimal;
///
/// let paid = |month: u32, net: i64| PayrollRecord {
///     tax_id: "123".to_string(),
///     name: "Jane Doe".to_string(),
///     role: "Clerk".to_string(),
///     department: "Health".to_string(),
///     municipality: String::new(),
///     year: 2024,
///     month,
///     gross_amount: Decimal::new(net * 2, 0),
///     net_amount: Decimal::new(net, 0),
/// };
///
/// let alerts = run_variation_check(&[paid(1, 1000), paid(2, 1300)]);
/// assert_eq!(alerts.len(), 1);
/// assert_eq!(alerts[0].kind, AlertKind::Variation);
/// ```
pub fn run_variation_check(records: &[PayrollRecord]) -> Vec<AuditAlert> {
    run_variation_check_with_threshold(records, DEFAULT_VARIATION_THRESHOLD)
}

/// Runs the variation check with an explicit threshold in percent.
///
/// For each payee, net pay is summed per period, periods are walked in
/// chronological order, and each strictly consecutive pair is compared.
/// Only increases above `threshold` are flagged; a previous month with zero
/// net pay is skipped rather than treated as an infinite increase.
pub fn run_variation_check_with_threshold(
    records: &[PayrollRecord],
    threshold: Decimal,
) -> Vec<AuditAlert> {
    let mut alerts = Vec::new();

    for payee_records in group_by_first_seen(records, |r| r.tax_id.as_str()) {
        let monthly = aggregate_by_period(&payee_records);
        let sequence: Vec<(&Period, &MonthlyPay)> = monthly.iter().collect();

        for pair in sequence.windows(2) {
            let (prev_period, prev) = pair[0];
            let (curr_period, curr) = pair[1];

            if !curr_period.is_consecutive_to(prev_period) {
                continue;
            }

            let Some(variation) = percent_change(prev.net, curr.net) else {
                continue;
            };

            if variation > threshold {
                alerts.push(variation_alert(prev_period, prev, curr_period, curr, variation));
            }
        }
    }

    debug!(
        rule = "variation",
        records = records.len(),
        threshold = %threshold,
        alerts = alerts.len(),
        "Audit rule evaluated"
    );

    alerts
}

/// Percentage change from `previous` to `current`.
///
/// Returns `None` when `previous` is not positive, since the change is
/// undefined there.
///
/// # Example
///
/// ```
/// use payroll_audit::audit::percent_change;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     percent_change(Decimal::new(1000, 0), Decimal::new(1300, 0)),
///     Some(Decimal::new(30, 0))
/// );
/// assert_eq!(percent_change(Decimal::ZERO, Decimal::new(500, 0)), None);
/// ```
pub fn percent_change(previous: Decimal, current: Decimal) -> Option<Decimal> {
    if previous <= Decimal::ZERO {
        return None;
    }
    (current - previous)
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

fn aggregate_by_period<'a>(records: &[&'a PayrollRecord]) -> BTreeMap<Period, MonthlyPay<'a>> {
    let mut monthly: BTreeMap<Period, MonthlyPay<'a>> = BTreeMap::new();

    for &record in records {
        monthly
            .entry(record.period())
            .and_modify(|pay| {
                pay.gross += record.gross_amount;
                pay.net += record.net_amount;
            })
            .or_insert(MonthlyPay {
                representative: record,
                gross: record.gross_amount,
                net: record.net_amount,
            });
    }

    monthly
}

fn variation_alert(
    prev_period: &Period,
    prev: &MonthlyPay,
    curr_period: &Period,
    curr: &MonthlyPay,
    variation: Decimal,
) -> AuditAlert {
    let payee = curr.representative;
    AuditAlert {
        kind: AlertKind::Variation,
        severity: Severity::Medium,
        title: format!("Net pay variation of {}", format_percent(variation)),
        description: format!(
            "{} ({}): from {} to {} ({} → {})",
            payee.name,
            payee.tax_id,
            format_currency(prev.net),
            format_currency(curr.net),
            prev_period,
            curr_period
        ),
        evidence: vec![prev.evidence(), curr.evidence()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(
        tax_id: &str,
        department: &str,
        year: i32,
        month: u32,
        net: &str,
    ) -> PayrollRecord {
        PayrollRecord {
            tax_id: tax_id.to_string(),
            name: "Jane Doe".to_string(),
            role: "Clerk".to_string(),
            department: department.to_string(),
            municipality: String::new(),
            year,
            month,
            gross_amount: dec(net) * dec("1.25"),
            net_amount: dec(net),
        }
    }

    // ==========================================================================
    // VAR-001: 1000 -> 1300 in consecutive months is a 30% increase
    // ==========================================================================
    #[test]
    fn test_var_001_thirty_percent_increase_flags() {
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Health", 2024, 2, "1300"),
        ];

        let alerts = run_variation_check(&records);

        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.kind, AlertKind::Variation);
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(alert.evidence, records);
        assert_eq!(alert.title, "Net pay variation of 30,0%");
        assert_eq!(
            alert.description,
            "Jane Doe (111): from R$ 1.000,00 to R$ 1.300,00 (1/2024 → 2/2024)"
        );
    }

    // ==========================================================================
    // VAR-002: a missing month breaks the comparison
    // ==========================================================================
    #[test]
    fn test_var_002_month_gap_not_compared() {
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Health", 2024, 3, "5000"),
        ];

        assert!(run_variation_check(&records).is_empty());
    }

    // ==========================================================================
    // VAR-003: zero previous net pay is skipped
    // ==========================================================================
    #[test]
    fn test_var_003_zero_previous_net_skipped() {
        let records = vec![
            record("111", "Health", 2024, 1, "0"),
            record("111", "Health", 2024, 2, "500"),
        ];

        assert!(run_variation_check(&records).is_empty());
    }

    // ==========================================================================
    // VAR-004: decreases are never flagged
    // ==========================================================================
    #[test]
    fn test_var_004_large_decrease_not_flagged() {
        let records = vec![
            record("111", "Health", 2024, 1, "5000"),
            record("111", "Health", 2024, 2, "1000"),
        ];

        assert!(run_variation_check(&records).is_empty());
    }

    // ==========================================================================
    // VAR-005: exactly 20% is not above the threshold
    // ==========================================================================
    #[test]
    fn test_var_005_exactly_threshold_not_flagged() {
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Health", 2024, 2, "1200"),
        ];

        assert!(run_variation_check(&records).is_empty());
    }

    #[test]
    fn test_just_above_threshold_flags() {
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Health", 2024, 2, "1200.01"),
        ];

        assert_eq!(run_variation_check(&records).len(), 1);
    }

    // ==========================================================================
    // VAR-006: net pay is summed across departments within a month
    // ==========================================================================
    #[test]
    fn test_var_006_multi_department_month_aggregated() {
        // January: 600 + 400 = 1000; February: 1300 in one department.
        let records = vec![
            record("111", "Health", 2024, 1, "600"),
            record("111", "Education", 2024, 1, "400"),
            record("111", "Health", 2024, 2, "1300"),
        ];

        let alerts = run_variation_check(&records);

        assert_eq!(alerts.len(), 1);
        let evidence = &alerts[0].evidence;
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence[0].department, "Health");
        assert_eq!(evidence[0].net_amount, dec("1000"));
        assert_eq!(evidence[0].gross_amount, dec("1250"));
        assert_eq!(evidence[1].net_amount, dec("1300"));
        assert!(alerts[0].description.contains("from R$ 1.000,00 to R$ 1.300,00"));
    }

    #[test]
    fn test_aggregation_can_suppress_alert() {
        // January combined 1200, February 1300: only 8.3%.
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Education", 2024, 1, "200"),
            record("111", "Health", 2024, 2, "1300"),
        ];

        assert!(run_variation_check(&records).is_empty());
    }

    // ==========================================================================
    // VAR-007: December to January across a year boundary is consecutive
    // ==========================================================================
    #[test]
    fn test_var_007_year_boundary_is_consecutive() {
        let records = vec![
            record("111", "Health", 2023, 12, "1000"),
            record("111", "Health", 2024, 1, "2000"),
        ];

        let alerts = run_variation_check(&records);

        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].description.ends_with("(12/2023 → 1/2024)"));
    }

    #[test]
    fn test_input_order_does_not_matter_within_payee() {
        let records = vec![
            record("111", "Health", 2024, 3, "2000"),
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Health", 2024, 2, "1000"),
        ];

        let alerts = run_variation_check(&records);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].evidence[0].month, 2);
        assert_eq!(alerts[0].evidence[1].month, 3);
    }

    #[test]
    fn test_each_consecutive_pair_evaluated() {
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Health", 2024, 2, "1500"),
            record("111", "Health", 2024, 3, "2000"),
            record("111", "Health", 2024, 4, "2100"),
        ];

        // 50%, 33.3%, 5%
        let alerts = run_variation_check(&records);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].title, "Net pay variation of 33,3%");
    }

    #[test]
    fn test_payees_are_independent() {
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("222", "Health", 2024, 2, "5000"),
        ];

        assert!(run_variation_check(&records).is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let records = vec![
            record("111", "Health", 2024, 1, "1000"),
            record("111", "Health", 2024, 2, "1100"),
        ];

        assert!(run_variation_check(&records).is_empty());
        assert_eq!(
            run_variation_check_with_threshold(&records, dec("5")).len(),
            1
        );
    }

    #[test]
    fn test_percent_change_guards_non_positive_previous() {
        assert_eq!(percent_change(dec("0"), dec("100")), None);
        assert_eq!(percent_change(dec("-10"), dec("100")), None);
        assert_eq!(percent_change(dec("200"), dec("100")), Some(dec("-50")));
    }
}
