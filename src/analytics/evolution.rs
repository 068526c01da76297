//! Per-period cost and headcount evolution.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PayrollRecord, Period};

/// Payroll figures for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// The period.
    pub period: Period,
    /// Short label such as `Mar/2024`.
    pub label: String,
    /// Sum of gross amounts.
    pub gross: Decimal,
    /// Sum of net amounts.
    pub net: Decimal,
    /// Amount withheld (`gross - net`).
    pub deductions: Decimal,
    /// Distinct payees paid in the period.
    pub headcount: usize,
}

/// Distinct periods present in `records`, in chronological order.
pub fn periods(records: &[PayrollRecord]) -> Vec<Period> {
    records
        .iter()
        .map(PayrollRecord::period)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records belonging to one period, in input order.
pub fn records_in_period(records: &[PayrollRecord], period: Period) -> Vec<&PayrollRecord> {
    records.iter().filter(|r| r.period() == period).collect()
}

/// Totals for every period present, in chronological order.
///
/// # Example
///
/// ```
/// use payroll_audit::analytics::cost_evolution;
///
/// assert!(cost_evolution(&[]).is_empty());
/// ```
pub fn cost_evolution(records: &[PayrollRecord]) -> Vec<PeriodTotals> {
    let mut grouped: BTreeMap<Period, (Decimal, Decimal, HashSet<&str>)> = BTreeMap::new();

    for record in records {
        let (gross, net, payees) = grouped
            .entry(record.period())
            .or_insert_with(|| (Decimal::ZERO, Decimal::ZERO, HashSet::new()));
        *gross += record.gross_amount;
        *net += record.net_amount;
        payees.insert(record.tax_id.as_str());
    }

    grouped
        .into_iter()
        .map(|(period, (gross, net, payees))| PeriodTotals {
            period,
            label: period.label(),
            gross,
            net,
            deductions: gross - net,
            headcount: payees.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(tax_id: &str, year: i32, month: u32, gross: &str, net: &str) -> PayrollRecord {
        PayrollRecord {
            tax_id: tax_id.to_string(),
            name: tax_id.to_string(),
            role: String::new(),
            department: "Health".to_string(),
            municipality: String::new(),
            year,
            month,
            gross_amount: dec(gross),
            net_amount: dec(net),
        }
    }

    #[test]
    fn test_periods_sorted_and_distinct() {
        let records = vec![
            record("1", 2024, 2, "1", "1"),
            record("2", 2023, 12, "1", "1"),
            record("3", 2024, 2, "1", "1"),
        ];

        assert_eq!(
            periods(&records),
            vec![Period::new(2023, 12), Period::new(2024, 2)]
        );
    }

    #[test]
    fn test_cost_evolution_sums_and_counts_distinct_payees() {
        let records = vec![
            record("1", 2024, 1, "1000", "800"),
            record("1", 2024, 1, "500", "450"),
            record("2", 2024, 1, "2000", "1500"),
            record("1", 2024, 2, "1000", "800"),
        ];

        let evolution = cost_evolution(&records);

        assert_eq!(evolution.len(), 2);
        let jan = &evolution[0];
        assert_eq!(jan.period, Period::new(2024, 1));
        assert_eq!(jan.label, "Jan/2024");
        assert_eq!(jan.gross, dec("3500"));
        assert_eq!(jan.net, dec("2750"));
        assert_eq!(jan.deductions, dec("750"));
        assert_eq!(jan.headcount, 2);
        assert_eq!(evolution[1].headcount, 1);
    }

    #[test]
    fn test_records_in_period() {
        let records = vec![
            record("1", 2024, 1, "1", "1"),
            record("2", 2024, 2, "1", "1"),
        ];

        let jan = records_in_period(&records, Period::new(2024, 1));
        assert_eq!(jan.len(), 1);
        assert_eq!(jan[0].tax_id, "1");
    }
}
