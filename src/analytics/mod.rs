//! Payroll analytics.
//!
//! Aggregations behind the dashboard, detail listing, comparison and report
//! screens. Every function is pure over a slice of payroll records.

mod breakdown;
mod comparison;
mod evolution;
mod filter;
mod report;
mod snapshot;

pub use breakdown::{
    BandCount, DepartmentTotals, RoleTotals, UNSPECIFIED_ROLE, department_breakdown,
    role_breakdown, salary_distribution,
};
pub use comparison::{ChangeType, PayeeChange, PeriodComparison, compare_periods, latest_comparison};
pub use evolution::{PeriodTotals, cost_evolution, periods, records_in_period};
pub use filter::{
    RecordFilter, RecordTotals, available_departments, available_years, distinct_payees,
};
pub use report::PayrollReport;
pub use snapshot::PayrollSnapshot;
