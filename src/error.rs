//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition that can occur while configuring the engine,
//! computing payroll, or handling a sales session.

use thiserror::Error;
use uuid::Uuid;

/// Failure to obtain an employee's absence count from attendance data.
///
/// Absence lookups feed directly into the bonus adjustment, so a failed
/// lookup is reported to the caller instead of being treated as zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The attendance source could not be read.
    #[error("Attendance source unavailable: {reason}")]
    Unavailable {
        /// Why the source could not be read.
        reason: String,
    },

    /// The requested month is outside 1-12.
    #[error("Invalid attendance period {year}-{month}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
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

    /// Configuration parsed but its values are inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// A payroll submission did not name an employee.
    #[error("No employee selected")]
    NoEmployeeSelected,

    /// The referenced employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unknown employee identifier.
        employee_id: String,
    },

    /// The employee record has no base salary to pay from.
    #[error("Employee '{employee_id}' has no base salary")]
    MissingSalary {
        /// The employee without a salary.
        employee_id: String,
    },

    /// An employee record was invalid for the requested operation.
    #[error("Invalid employee '{employee_id}': {message}")]
    InvalidEmployee {
        /// The employee concerned.
        employee_id: String,
        /// A description of the problem.
        message: String,
    },

    /// An input field failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The payroll record does not exist.
    #[error("Payroll record not found: {payroll_id}")]
    PayrollNotFound {
        /// The unknown record identifier.
        payroll_id: Uuid,
    },

    /// The payroll record has been paid and can no longer change.
    #[error("Payroll record {payroll_id} is already paid")]
    PayrollAlreadyPaid {
        /// The paid record.
        payroll_id: Uuid,
    },

    /// A payroll record already exists for the employee and period.
    #[error("Payroll for employee '{employee_id}' in {year}-{month:02} already exists")]
    DuplicatePayroll {
        /// The employee concerned.
        employee_id: String,
        /// The payroll year.
        year: i32,
        /// The payroll month.
        month: u32,
    },

    /// The absence count could not be fetched.
    #[error("Absence lookup failed: {0}")]
    AbsenceLookup(#[from] FetchError),

    /// The product does not exist in the catalog.
    #[error("Product not found: {product_id}")]
    ProductNotFound {
        /// The unknown product identifier.
        product_id: String,
    },

    /// The cart session does not exist.
    #[error("Cart session not found: {session_id}")]
    CartNotFound {
        /// The unknown session.
        session_id: Uuid,
    },

    /// Checkout was attempted on a cart without lines.
    #[error("Cart {session_id} is empty")]
    EmptyCart {
        /// The empty session.
        session_id: Uuid,
    },

    /// A shared store lock was poisoned by a panicking writer.
    #[error("Store unavailable: {store}")]
    StoreUnavailable {
        /// The store that could not be locked.
        store: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
