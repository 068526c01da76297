//! Payroll record model.
//!
//! This module defines [`PayrollRecord`], one disbursement line as produced by
//! the upstream spreadsheet normalizer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Period;

/// One disbursement line for one payee, in one department, in one month.
///
/// No field is unique. The natural key for "one person's pay in one
/// department in one month" is `(tax_id, year, month, department)`, and the
/// same `tax_id` may legitimately appear in several departments in a month.
///
/// # Example
///
/// ```
/// use payroll_audit::models::{PayrollRecord, Period};
/// use rust_decimal::Decimal;
///
/// let record = PayrollRecord {
///     tax_id: "12345678901".to_string(),
///     name: "Jane Doe".to_string(),
///     role: "Nurse".to_string(),
///     department: "Education".to_string(),
///     municipality: "Springfield".to_string(),
///     year: 2024,
///     month: 3,
///     gross_amount: Decimal::new(500000, 2),
///     net_amount: Decimal::new(410000, 2),
/// };
///
/// assert_eq!(record.period(), Period::new(2024, 3));
/// assert_eq!(record.withholding(), Decimal::new(90000, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Fiscal identifier of the payee; an opaque grouping key.
    pub tax_id: String,
    /// Payee display name.
    pub name: String,
    /// Job function or title.
    #[serde(default)]
    pub role: String,
    /// Organizational unit that paid this record.
    pub department: String,
    /// Issuing municipality, used for report headings.
    #[serde(default)]
    pub municipality: String,
    /// Pay period year.
    pub year: i32,
    /// Pay period month (1-12).
    pub month: u32,
    /// Gross pay before withholding.
    pub gross_amount: Decimal,
    /// Pay after withholding.
    pub net_amount: Decimal,
}

impl PayrollRecord {
    /// Returns the pay period of this record.
    pub fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }

    /// Returns the amount withheld (`gross - net`).
    pub fn withholding(&self) -> Decimal {
        self.gross_amount - self.net_amount
    }

    /// Checks the fields the audit rules rely on.
    ///
    /// The rules assume well-formed input; callers at a trust boundary run
    /// this first. `index` is the record's position, used in the error.
    pub fn validate(&self, index: usize) -> EngineResult<()> {
        let invalid = |field: &str, message: &str| EngineError::InvalidRecord {
            index,
            field: field.to_string(),
            message: message.to_string(),
        };

        if self.tax_id.trim().is_empty() {
            return Err(invalid("tax_id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }
        if !(1..=12).contains(&self.month) {
            return Err(invalid("month", "must be between 1 and 12"));
        }
        if self.gross_amount < Decimal::ZERO {
            return Err(invalid("gross_amount", "must not be negative"));
        }
        if self.net_amount < Decimal::ZERO {
            return Err(invalid("net_amount", "must not be negative"));
        }

        Ok(())
    }
}

/// Validates every record, failing on the first invalid one.
pub fn validate_records(records: &[PayrollRecord]) -> EngineResult<()> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| record.validate(index))
}
