//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the audit
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{AuditConfig, AuditRules, ReportSettings, ServerConfig};

/// Loads and provides access to the audit configuration.
///
/// # File Structure
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:8080"
/// rules:
///   variation_threshold_pct: "20"
/// reports:
///   top_roles: 10
///   salary_bands:
///     - label: "Up to R$ 2.000"
///       max: "2000"
///     - label: "Above R$ 2.000"
/// ```
///
/// Any section may be omitted; its defaults apply.
///
/// # Example
///
/// ```no_run
/// use payroll_audit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/audit.yaml").unwrap();
/// println!("Variation threshold: {}%", loader.rules().variation_threshold_pct);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AuditConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file contains invalid YAML or wrongly typed values (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<AuditConfig>(path)?;

        info!(
            path = %path.display(),
            variation_threshold_pct = %config.rules.variation_threshold_pct,
            salary_bands = config.reports.salary_bands.len(),
            "Loaded audit configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the audit rule thresholds.
    pub fn rules(&self) -> &AuditRules {
        &self.config.rules
    }

    /// Returns the report settings.
    pub fn reports(&self) -> &ReportSettings {
        &self.config.reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/audit.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "payroll-audit-{}-{}.yaml",
            name,
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.server().bind_address, "0.0.0.0:8080");
        assert_eq!(loader.rules().variation_threshold_pct, dec("20"));
        assert_eq!(loader.reports().top_roles, 10);
        assert_eq!(loader.reports().salary_bands.len(), 5);
    }

    #[test]
    fn test_salary_bands_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let bands = &loader.reports().salary_bands;

        assert_eq!(bands[0].max, Some(dec("2000")));
        assert_eq!(bands[3].max, Some(dec("20000")));
        assert_eq!(bands[4].max, None);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/audit.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("audit.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let path = write_temp_config("invalid", "rules: [unterminated");

        let result = ConfigLoader::load(&path);
        fs::remove_file(&path).ok();

        match result {
            Err(EngineError::ConfigParseError { path: p, .. }) => {
                assert!(p.contains("payroll-audit-invalid"));
            }
            _ => panic!("Expected ConfigParseError"),
        }
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = write_temp_config(
            "partial",
            "rules:\n  variation_threshold_pct: \"35\"\n",
        );

        let result = ConfigLoader::load(&path);
        fs::remove_file(&path).ok();

        let loader = result.unwrap();
        assert_eq!(loader.rules().variation_threshold_pct, dec("35"));
        assert_eq!(loader.server(), &ServerConfig::default());
        assert_eq!(loader.reports(), &ReportSettings::default());
    }

    #[test]
    fn test_default_loader_matches_default_config() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.config(), &AuditConfig::default());
    }
}
