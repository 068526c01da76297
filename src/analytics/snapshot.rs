//! Headline figures for the most recent period.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::evolution::{periods, records_in_period};
use crate::audit::percent_change;
use crate::models::{PayrollRecord, Period};

/// Key indicators of the latest period, compared with the one before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSnapshot {
    /// The latest period present.
    pub period: Period,
    /// The period present before it, if any.
    pub previous_period: Option<Period>,
    /// Sum of gross amounts.
    pub total_gross: Decimal,
    /// Sum of net amounts.
    pub total_net: Decimal,
    /// Amount withheld.
    pub total_deductions: Decimal,
    /// Deductions as a percentage of gross, two decimals.
    pub deduction_pct: Decimal,
    /// Distinct payees.
    pub headcount: usize,
    /// Distinct departments.
    pub department_count: usize,
    /// Gross per payee, two decimals.
    pub average_gross: Decimal,
    /// Gross of the previous period; zero when there is none.
    pub previous_gross: Decimal,
    /// `total_gross - previous_gross`.
    pub cost_impact: Decimal,
    /// Gross variation against the previous period, two decimals.
    pub variation_pct: Decimal,
    /// Payees present now but not in the previous period.
    pub admissions: usize,
    /// Payees present in the previous period but not now.
    pub departures: usize,
}

impl PayrollSnapshot {
    /// Builds the snapshot of the latest period in `records`.
    ///
    /// Returns `None` when `records` is empty. Without a previous period,
    /// admissions and departures are both zero.
    pub fn latest(records: &[PayrollRecord]) -> Option<Self> {
        let present = periods(records);
        let (&period, earlier) = present.split_last()?;
        let previous_period = earlier.last().copied();

        let current = records_in_period(records, period);
        let previous = previous_period
            .map(|p| records_in_period(records, p))
            .unwrap_or_default();

        let total_gross: Decimal = current.iter().map(|r| r.gross_amount).sum();
        let total_net: Decimal = current.iter().map(|r| r.net_amount).sum();
        let total_deductions = total_gross - total_net;
        let previous_gross: Decimal = previous.iter().map(|r| r.gross_amount).sum();

        let current_ids = tax_ids(&current);
        let previous_ids = tax_ids(&previous);
        let departments: HashSet<&str> = current.iter().map(|r| r.department.as_str()).collect();

        let (admissions, departures) = if previous_period.is_some() {
            (
                current_ids.difference(&previous_ids).count(),
                previous_ids.difference(&current_ids).count(),
            )
        } else {
            (0, 0)
        };

        let average_gross = if current_ids.is_empty() {
            Decimal::ZERO
        } else {
            (total_gross / Decimal::from(current_ids.len())).round_dp(2)
        };

        Some(Self {
            period,
            previous_period,
            total_gross,
            total_net,
            total_deductions,
            deduction_pct: share_pct(total_deductions, total_gross),
            headcount: current_ids.len(),
            department_count: departments.len(),
            average_gross,
            previous_gross,
            cost_impact: total_gross - previous_gross,
            variation_pct: percent_change(previous_gross, total_gross)
                .map(|pct| pct.round_dp(2))
                .unwrap_or(Decimal::ZERO),
            admissions,
            departures,
        })
    }
}

fn tax_ids<'a>(records: &[&'a PayrollRecord]) -> HashSet<&'a str> {
    records.iter().map(|r| r.tax_id.as_str()).collect()
}

fn share_pct(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(tax_id: &str, department: &str, month: u32, gross: &str, net: &str) -> PayrollRecord {
        PayrollRecord {
            tax_id: tax_id.to_string(),
            name: format!("Payee {}", tax_id),
            role: String::new(),
            department: department.to_string(),
            municipality: String::new(),
            year: 2024,
            month,
            gross_amount: dec(gross),
            net_amount: dec(net),
        }
    }

    #[test]
    fn test_empty_records_have_no_snapshot() {
        assert!(PayrollSnapshot::latest(&[]).is_none());
    }

    #[test]
    fn test_single_period_snapshot() {
        let records = vec![
            record("1", "Health", 3, "3000", "2400"),
            record("2", "Works", 3, "1000", "800"),
        ];

        let snapshot = PayrollSnapshot::latest(&records).unwrap();

        assert_eq!(snapshot.period, Period::new(2024, 3));
        assert_eq!(snapshot.previous_period, None);
        assert_eq!(snapshot.total_gross, dec("4000"));
        assert_eq!(snapshot.total_deductions, dec("800"));
        assert_eq!(snapshot.deduction_pct, dec("20"));
        assert_eq!(snapshot.headcount, 2);
        assert_eq!(snapshot.department_count, 2);
        assert_eq!(snapshot.average_gross, dec("2000"));
        assert_eq!(snapshot.previous_gross, Decimal::ZERO);
        assert_eq!(snapshot.variation_pct, Decimal::ZERO);
        assert_eq!(snapshot.admissions, 0);
        assert_eq!(snapshot.departures, 0);
    }

    #[test]
    fn test_snapshot_against_previous_present_period() {
        let records = vec![
            record("1", "Health", 1, "2000", "1600"),
            record("2", "Health", 1, "2000", "1600"),
            // February missing; March compares against January.
            record("1", "Health", 3, "2500", "2000"),
            record("3", "Works", 3, "2500", "2000"),
        ];

        let snapshot = PayrollSnapshot::latest(&records).unwrap();

        assert_eq!(snapshot.previous_period, Some(Period::new(2024, 1)));
        assert_eq!(snapshot.previous_gross, dec("4000"));
        assert_eq!(snapshot.cost_impact, dec("1000"));
        assert_eq!(snapshot.variation_pct, dec("25"));
        assert_eq!(snapshot.admissions, 1);
        assert_eq!(snapshot.departures, 1);
    }

    #[test]
    fn test_headcount_counts_distinct_payees() {
        let records = vec![
            record("1", "Health", 1, "1000", "900"),
            record("1", "Works", 1, "500", "450"),
        ];

        let snapshot = PayrollSnapshot::latest(&records).unwrap();
        assert_eq!(snapshot.headcount, 1);
        assert_eq!(snapshot.average_gross, dec("1500"));
    }
}
