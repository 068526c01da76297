//! Payroll audit engine for municipal payrolls
//!
//! This crate scans monthly payroll records for anomaly patterns (payees in
//! several departments, sharp net pay increases, missing withholding,
//! duplicated entries, new payees) and computes the aggregates behind the
//! payroll dashboard and reports. The [`api`] module serves both over HTTP.

#![warn(missing_docs)]

pub mod analytics;
pub mod api;
pub mod audit;
pub mod config;
pub mod error;
mod grouping;
pub mod models;
