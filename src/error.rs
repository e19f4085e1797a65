//! Error types for the availability engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure an availability computation can report.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the availability engine.
///
/// Every engine operation returns this error type. Computations are
/// all-or-nothing: an error is never accompanied by a partial result.
///
/// # Example
///
/// ```
/// use salon_availability::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request or record failed boundary validation.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The referenced employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        employee_id: Uuid,
    },

    /// The employee exists but no weekly schedule applies on the date.
    #[error("No schedule found for employee {employee_id} on {date}")]
    NoScheduleForDate {
        /// The employee.
        employee_id: Uuid,
        /// The requested date.
        date: NaiveDate,
    },

    /// A data fetch from the backing store failed.
    #[error("Collaborator failure in '{operation}': {message}")]
    CollaboratorFailure {
        /// The store operation that failed.
        operation: &'static str,
        /// The store's error message.
        message: String,
    },

    /// Neither the zone name nor the fallback offset could be used.
    #[error("Invalid timezone '{name}': {message}")]
    InvalidTimezone {
        /// The configured zone name.
        name: String,
        /// Why it could not be resolved.
        message: String,
    },

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
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for failures caused by the caller (4xx-equivalent).
    ///
    /// None of the engine's errors are retried, but callers use this to
    /// tell bad requests apart from internal failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. }
                | EngineError::EmployeeNotFound { .. }
                | EngineError::NoScheduleForDate { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
