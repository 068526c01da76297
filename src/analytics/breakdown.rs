//! Department, role and salary band breakdowns.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SalaryBand;
use crate::grouping::group_by_first_seen;
use crate::models::PayrollRecord;

/// Label used for records without a role.
pub const UNSPECIFIED_ROLE: &str = "Not informed";

/// Payroll cost of one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTotals {
    /// Department name.
    pub department: String,
    /// Sum of gross amounts.
    pub gross: Decimal,
    /// Sum of net amounts.
    pub net: Decimal,
    /// Number of records.
    pub record_count: usize,
}

/// Headcount and cost of one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTotals {
    /// Role title.
    pub role: String,
    /// Number of records.
    pub record_count: usize,
    /// Sum of gross amounts.
    pub gross: Decimal,
}

/// Number of records falling in one salary band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCount {
    /// Band label.
    pub label: String,
    /// Number of records in the band.
    pub count: usize,
}

/// Cost per department, highest gross first.
///
/// Ties keep first-seen order.
pub fn department_breakdown(records: &[PayrollRecord]) -> Vec<DepartmentTotals> {
    let groups = group_by_first_seen(records, |r| r.department.as_str());
    let mut totals: Vec<DepartmentTotals> = groups
        .into_iter()
        .map(|group| DepartmentTotals {
            department: group[0].department.clone(),
            gross: group.iter().map(|r| r.gross_amount).sum(),
            net: group.iter().map(|r| r.net_amount).sum(),
            record_count: group.len(),
        })
        .collect();

    totals.sort_by(|a, b| b.gross.cmp(&a.gross));
    totals
}

/// Most common roles, by record count, at most `limit` of them.
///
/// Records with a blank role are counted under [`UNSPECIFIED_ROLE`].
pub fn role_breakdown(records: &[PayrollRecord], limit: usize) -> Vec<RoleTotals> {
    let mut totals: Vec<RoleTotals> = group_by_first_seen(records, role_key)
        .into_iter()
        .map(|group| RoleTotals {
            role: role_key(group[0]).to_string(),
            record_count: group.len(),
            gross: group.iter().map(|r| r.gross_amount).sum(),
        })
        .collect();

    totals.sort_by(|a, b| b.record_count.cmp(&a.record_count));
    totals.truncate(limit);
    totals
}

fn role_key(record: &PayrollRecord) -> &str {
    match record.role.trim() {
        "" => UNSPECIFIED_ROLE,
        role => role,
    }
}

/// Counts records per salary band.
///
/// Each record lands in the first band whose `max` is at least its gross
/// amount, or in an open-ended band. Records above every bounded band with
/// no open-ended band are not counted.
pub fn salary_distribution(records: &[PayrollRecord], bands: &[SalaryBand]) -> Vec<BandCount> {
    let mut counts = vec![0usize; bands.len()];

    for record in records {
        let band = bands
            .iter()
            .position(|band| band.max.is_none_or(|max| record.gross_amount <= max));
        if let Some(i) = band {
            counts[i] += 1;
        }
    }

    bands
        .iter()
        .zip(counts)
        .map(|(band, count)| BandCount {
            label: band.label.clone(),
            count,
        })
        .collect()
}
