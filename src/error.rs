//! Error types for the Entitlement Balance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that abort a balance computation. Degraded sub-query
//! outcomes are not errors; they surface as
//! [`ComputationWarning`](crate::models::ComputationWarning) values on the
//! computed result instead.

use thiserror::Error;

/// The main error type for the Entitlement Balance Engine.
///
/// Only employee resolution and policy-file problems are fatal. Ledger
/// sub-query failures degrade the computation instead of raising this type.
///
/// # Example
///
/// ```
/// use entitlement_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_001");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee row exists for the requested identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee identifier that could not be resolved.
        employee_id: String,
    },

    /// The employee lookup itself failed against the datastore.
    #[error("Employee lookup failed for '{employee_id}': {message}")]
    EmployeeLookup {
        /// The employee identifier being resolved.
        employee_id: String,
        /// A description of the datastore failure.
        message: String,
    },

    /// Entitlement policy file was not found at the specified path.
    #[error("Policy file not found: {path}")]
    PolicyNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Entitlement policy file could not be parsed.
    #[error("Failed to parse policy file '{path}': {message}")]
    PolicyParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
