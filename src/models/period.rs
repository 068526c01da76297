//! Payroll period model.
//!
//! A [`Period`] is one payroll cycle: a calendar month of a given year.

use std::fmt;

use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A `(year, month)` payroll cycle.
///
/// Periods order chronologically, so they can key a `BTreeMap` directly.
///
/// # Example
///
/// ```
/// use payroll_audit::models::Period;
///
/// let jan = Period::new(2024, 1);
/// let feb = Period::new(2024, 2);
///
/// assert!(jan < feb);
/// assert!(feb.is_consecutive_to(&jan));
/// assert_eq!(feb.key(), "2024-02");
/// assert_eq!(feb.to_string(), "2/2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

impl Period {
    /// Creates a period without validating the month.
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Creates a period, rejecting months outside 1-12.
    pub fn try_new(year: i32, month: u32) -> EngineResult<Self> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(EngineError::InvalidPeriod { year, month })
        }
    }

    /// Linearized month index (`year * 12 + month`).
    pub fn month_index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    /// Returns true if this period immediately follows `previous`.
    ///
    /// December to January of the next year counts as consecutive.
    pub fn is_consecutive_to(&self, previous: &Period) -> bool {
        self.month_index() - previous.month_index() == 1
    }

    /// Zero-padded `YYYY-MM` key; lexicographic order equals chronological order.
    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    /// Short human label such as `Mar/2024`.
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name()[..3].to_string())
            .unwrap_or_else(|| self.month.to_string());
        format!("{}/{}", name, self.year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}
