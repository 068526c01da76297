//! Configuration types for the payroll audit engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! default, so a partial file is valid.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::DEFAULT_VARIATION_THRESHOLD;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Tunable thresholds for the audit rules.
///
/// # Example
///
/// ```
/// use payroll_audit::config::AuditRules;
/// use rust_decimal::Decimal;
///
/// let rules = AuditRules::default();
/// assert_eq!(rules.variation_threshold_pct, Decimal::new(20, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditRules {
    /// Net pay increase, in percent, above which the variation check flags.
    pub variation_threshold_pct: Decimal,
}

impl Default for AuditRules {
    fn default() -> Self {
        Self {
            variation_threshold_pct: DEFAULT_VARIATION_THRESHOLD,
        }
    }
}

/// A gross pay band used by the salary distribution report.
///
/// A record falls in the first band whose `max` is at least its gross
/// amount. A band without `max` is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    /// Display label (e.g., "Up to R$ 2.000").
    pub label: String,
    /// Inclusive upper bound, or `None` for the last band.
    #[serde(default)]
    pub max: Option<Decimal>,
}

impl SalaryBand {
    /// Creates a band with an inclusive upper bound.
    pub fn up_to(label: impl Into<String>, max: Decimal) -> Self {
        Self {
            label: label.into(),
            max: Some(max),
        }
    }

    /// Creates an open-ended band.
    pub fn above(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            max: None,
        }
    }
}

/// Settings for the summary report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// How many roles the role ranking keeps.
    pub top_roles: usize,
    /// Gross pay bands, in ascending order.
    pub salary_bands: Vec<SalaryBand>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_roles: 10,
            salary_bands: vec![
                SalaryBand::up_to("Up to R$ 2.000", Decimal::new(2000, 0)),
                SalaryBand::up_to("R$ 2.001 - 5.000", Decimal::new(5000, 0)),
                SalaryBand::up_to("R$ 5.001 - 10.000", Decimal::new(10000, 0)),
                SalaryBand::up_to("R$ 10.001 - 20.000", Decimal::new(20000, 0)),
                SalaryBand::above("Above R$ 20.000"),
            ],
        }
    }
}

/// The complete configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Audit rule thresholds.
    pub rules: AuditRules,
    /// Report settings.
    pub reports: ReportSettings,
}
