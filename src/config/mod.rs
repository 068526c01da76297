//! Configuration loading and management for the payroll audit engine.
//!
//! This module loads rule thresholds, report settings and server settings
//! from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_audit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/audit.yaml").unwrap();
//! println!("Listening on {}", config.server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuditConfig, AuditRules, ReportSettings, SalaryBand, ServerConfig};
