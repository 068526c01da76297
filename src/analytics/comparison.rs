//! Payee-by-payee comparison of two periods.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evolution::periods;
use crate::audit::percent_change;
use crate::error::{EngineError, EngineResult};
use crate::grouping::group_by_first_seen;
use crate::models::{PayrollRecord, Period};

/// How a payee's gross pay changed between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Paid only in the later period.
    Admission,
    /// Paid only in the earlier period.
    Departure,
    /// Paid more.
    Increase,
    /// Paid less.
    Decrease,
    /// Paid the same.
    Unchanged,
}

/// One payee's gross totals in both periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeeChange {
    /// Tax id.
    pub tax_id: String,
    /// Payee name, from the first record seen.
    pub name: String,
    /// Department, from the first record seen.
    pub department: String,
    /// Gross in the earlier period.
    pub gross_from: Decimal,
    /// Gross in the later period.
    pub gross_to: Decimal,
    /// `gross_to - gross_from`.
    pub variation: Decimal,
    /// Percent variation, two decimals.
    pub variation_pct: Decimal,
    /// Classification of the change.
    pub change: ChangeType,
}

/// The result of comparing two periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    /// The earlier period.
    pub from: Period,
    /// The later period.
    pub to: Period,
    /// Total gross in `from`.
    pub total_from: Decimal,
    /// Total gross in `to`.
    pub total_to: Decimal,
    /// Number of admissions.
    pub admissions: usize,
    /// Number of departures.
    pub departures: usize,
    /// Per-payee rows, largest absolute variation first.
    pub changes: Vec<PayeeChange>,
}

/// Compares per-payee gross pay between `from` and `to`.
///
/// Fails with [`EngineError::PeriodNotFound`] when either period has no
/// records.
pub fn compare_periods(
    records: &[PayrollRecord],
    from: Period,
    to: Period,
) -> EngineResult<PeriodComparison> {
    for period in [from, to] {
        if !records.iter().any(|r| r.period() == period) {
            return Err(EngineError::PeriodNotFound { period });
        }
    }

    let in_scope = records
        .iter()
        .filter(|r| r.period() == from || r.period() == to);

    let mut changes: Vec<PayeeChange> = group_by_first_seen(in_scope, |r| r.tax_id.as_str())
        .into_iter()
        .map(|group| PayeeChange {
            tax_id: group[0].tax_id.clone(),
            name: group[0].name.clone(),
            department: group[0].department.clone(),
            // Comparing a period with itself puts the amount on both sides.
            gross_from: gross_in(&group, from),
            gross_to: gross_in(&group, to),
            variation: Decimal::ZERO,
            variation_pct: Decimal::ZERO,
            change: ChangeType::Unchanged,
        })
        .collect();

    let present_from = payees_in(records, from);
    let present_to = payees_in(records, to);

    for row in &mut changes {
        let in_from = present_from.contains(row.tax_id.as_str());
        let in_to = present_to.contains(row.tax_id.as_str());
        row.variation = row.gross_to - row.gross_from;
        row.variation_pct = variation_pct(row.gross_from, row.gross_to);
        row.change = match (in_from, in_to) {
            (false, _) => ChangeType::Admission,
            (_, false) => ChangeType::Departure,
            _ if row.variation > Decimal::ZERO => ChangeType::Increase,
            _ if row.variation < Decimal::ZERO => ChangeType::Decrease,
            _ => ChangeType::Unchanged,
        };
    }

    changes.sort_by(|a, b| b.variation.abs().cmp(&a.variation.abs()));

    let comparison = PeriodComparison {
        from,
        to,
        total_from: changes.iter().map(|c| c.gross_from).sum(),
        total_to: changes.iter().map(|c| c.gross_to).sum(),
        admissions: count(&changes, ChangeType::Admission),
        departures: count(&changes, ChangeType::Departure),
        changes,
    };

    debug!(
        from = %from,
        to = %to,
        payees = comparison.changes.len(),
        "Periods compared"
    );

    Ok(comparison)
}

/// Compares the last two periods present in `records`.
///
/// Fails with [`EngineError::InsufficientPeriods`] when fewer than two
/// periods are present.
pub fn latest_comparison(records: &[PayrollRecord]) -> EngineResult<PeriodComparison> {
    let present = periods(records);
    match present.as_slice() {
        [.., from, to] => compare_periods(records, *from, *to),
        _ => Err(EngineError::InsufficientPeriods {
            required: 2,
            found: present.len(),
        }),
    }
}

fn payees_in(records: &[PayrollRecord], period: Period) -> HashSet<&str> {
    records
        .iter()
        .filter(|r| r.period() == period)
        .map(|r| r.tax_id.as_str())
        .collect()
}

fn gross_in(group: &[&PayrollRecord], period: Period) -> Decimal {
    group
        .iter()
        .filter(|r| r.period() == period)
        .map(|r| r.gross_amount)
        .sum()
}

fn variation_pct(from: Decimal, to: Decimal) -> Decimal {
    match percent_change(from, to) {
        Some(pct) => pct.round_dp(2),
        None if to > Decimal::ZERO => Decimal::ONE_HUNDRED,
        None => Decimal::ZERO,
    }
}

fn count(changes: &[PayeeChange], change: ChangeType) -> usize {
    changes.iter().filter(|c| c.change == change).count()
}
