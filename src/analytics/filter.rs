//! Record filtering and totals for the detail listing.

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayrollRecord;

/// Criteria for narrowing a record set.
///
/// Unset fields match everything. `search` matches the payee name
/// case-insensitively or any substring of the tax id.
///
/// # Example
///
/// ```
/// use payroll_audit::analytics::RecordFilter;
///
/// let filter = RecordFilter {
///     year: Some(2024),
///     department: Some("Health".to_string()),
///     ..Default::default()
/// };
/// assert!(filter.month.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// Keep only this year.
    pub year: Option<i32>,
    /// Keep only this month.
    pub month: Option<u32>,
    /// Keep only this department.
    pub department: Option<String>,
    /// Free-text search on name or tax id.
    pub search: Option<String>,
}

impl RecordFilter {
    /// Returns true if `record` satisfies every set criterion.
    pub fn matches(&self, record: &PayrollRecord) -> bool {
        if self.year.is_some_and(|year| record.year != year) {
            return false;
        }
        if self.month.is_some_and(|month| record.month != month) {
            return false;
        }
        if let Some(department) = &self.department {
            if &record.department != department {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !record.name.to_lowercase().contains(&needle) && !record.tax_id.contains(search) {
                return false;
            }
        }
        true
    }

    /// Returns the matching records, in input order.
    pub fn apply(&self, records: &[PayrollRecord]) -> Vec<PayrollRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Aggregate figures for a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTotals {
    /// Number of records.
    pub record_count: usize,
    /// Sum of gross amounts.
    pub total_gross: Decimal,
    /// Sum of net amounts.
    pub total_net: Decimal,
    /// Number of distinct tax ids.
    pub payee_count: usize,
    /// Net amount per distinct payee; zero for an empty set.
    pub average_net_per_payee: Decimal,
}

impl RecordTotals {
    /// Computes totals over `records`.
    pub fn from_records(records: &[PayrollRecord]) -> Self {
        let total_gross: Decimal = records.iter().map(|r| r.gross_amount).sum();
        let total_net: Decimal = records.iter().map(|r| r.net_amount).sum();
        let payee_count = distinct_payees(records);
        let average_net_per_payee = if payee_count > 0 {
            total_net / Decimal::from(payee_count)
        } else {
            Decimal::ZERO
        };

        Self {
            record_count: records.len(),
            total_gross,
            total_net,
            payee_count,
            average_net_per_payee,
        }
    }
}

/// Number of distinct tax ids in `records`.
pub fn distinct_payees(records: &[PayrollRecord]) -> usize {
    records
        .iter()
        .map(|r| r.tax_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Distinct years present, ascending.
pub fn available_years(records: &[PayrollRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct departments present, sorted by name.
pub fn available_departments(records: &[PayrollRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.department.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
