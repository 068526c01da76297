//! Error types for the payroll audit engine.
//!
//! The audit rules themselves never fail; these errors cover configuration
//! loading, record validation at the service boundary, and period lookups
//! for comparisons.

use thiserror::Error;

use crate::models::Period;

/// The main error type for the payroll audit engine.
///
/// # Example
///
/// ```
/// use payroll_audit::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/audit.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/audit.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll record failed validation.
    #[error("Invalid record #{index} field '{field}': {message}")]
    InvalidRecord {
        /// Position of the record in the submitted set.
        index: usize,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A requested period does not name a real month.
    #[error("Invalid period {month}/{year}: month must be between 1 and 12")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// No records exist for the requested period.
    #[error("No payroll records found for period {period}")]
    PeriodNotFound {
        /// The period that has no records.
        period: Period,
    },

    /// An operation needed more distinct periods than the record set holds.
    #[error("At least {required} periods are required, found {found}")]
    InsufficientPeriods {
        /// Number of periods the operation needs.
        required: usize,
        /// Number of periods present.
        found: usize,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/audit.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/audit.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_record_displays_index_field_and_message() {
        let error = EngineError::InvalidRecord {
            index: 3,
            field: "month".to_string(),
            message: "must be between 1 and 12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid record #3 field 'month': must be between 1 and 12"
        );
    }

    #[test]
    fn test_invalid_period_displays_month_and_year() {
        let error = EngineError::InvalidPeriod {
            year: 2024,
            month: 13,
        };
        assert_eq!(
            error.to_string(),
            "Invalid period 13/2024: month must be between 1 and 12"
        );
    }

    #[test]
    fn test_period_not_found_displays_period() {
        let error = EngineError::PeriodNotFound {
            period: Period::new(2024, 3),
        };
        assert_eq!(
            error.to_string(),
            "No payroll records found for period 3/2024"
        );
    }

    #[test]
    fn test_insufficient_periods_displays_counts() {
        let error = EngineError::InsufficientPeriods {
            required: 2,
            found: 1,
        };
        assert_eq!(
            error.to_string(),
            "At least 2 periods are required, found 1"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
