//! Core data models for the payroll audit engine.
//!
//! This module contains the payroll records the engine reads and the alerts
//! it produces.

mod alert;
mod period;
mod record;

pub use alert::{AlertKind, AuditAlert, Severity};
pub use period::Period;
pub use record::{PayrollRecord, validate_records};
