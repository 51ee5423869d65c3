//! Response types for the payroll and sales API.
//!
//! This module defines the error response structures, the mapping from
//! [`EngineError`] to HTTP status codes, and the few response bodies that are
//! not plain models.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, FetchError};
use crate::sales::{Cart, CartLine, CartTotals};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    fn new(status: StatusCode, code: &str, error: &EngineError) -> Self {
        Self {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    error.to_string(),
                ),
            },
            EngineError::NoEmployeeSelected => {
                Self::new(StatusCode::BAD_REQUEST, "NO_EMPLOYEE_SELECTED", &error)
            }
            EngineError::EmployeeNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND", &error)
            }
            EngineError::MissingSalary { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "MISSING_SALARY", &error)
            }
            EngineError::InvalidEmployee { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_EMPLOYEE", &error)
            }
            EngineError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    error.to_string(),
                    format!("Field '{}' {}", field, message),
                ),
            },
            EngineError::PayrollNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "PAYROLL_NOT_FOUND", &error)
            }
            EngineError::PayrollAlreadyPaid { .. } => {
                Self::new(StatusCode::CONFLICT, "PAYROLL_ALREADY_PAID", &error)
            }
            EngineError::DuplicatePayroll { .. } => {
                Self::new(StatusCode::CONFLICT, "DUPLICATE_PAYROLL", &error)
            }
            EngineError::AbsenceLookup(FetchError::InvalidPeriod { .. }) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_PERIOD", &error)
            }
            EngineError::AbsenceLookup(source) => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "ABSENCE_LOOKUP_FAILED",
                    "Absence count could not be determined; payroll was not calculated",
                    source.to_string(),
                ),
            },
            EngineError::ProductNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND", &error)
            }
            EngineError::CartNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "CART_NOT_FOUND", &error)
            }
            EngineError::EmptyCart { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "EMPTY_CART", &error)
            }
            EngineError::StoreUnavailable { .. } => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE", &error)
            }
        }
    }
}

/// Response body for `GET /attendance/:employee_id/absences`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceTotalResponse {
    /// Unpaid absence days in the month.
    pub total: u32,
}

/// A cart together with its totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    /// The owning session.
    pub session_id: Uuid,
    /// Lines in the cart.
    pub lines: Vec<CartLine>,
    /// Totals rounded to cents.
    pub totals: CartTotals,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    /// When the cart last changed.
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let totals = cart.totals();
        Self {
            session_id: cart.session_id,
            lines: cart.lines,
            totals,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_code(error: EngineError) -> (StatusCode, String) {
        let response: ApiErrorResponse = error.into();
        (response.status, response.error.code)
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        assert_eq!(
            status_and_code(EngineError::NoEmployeeSelected),
            (StatusCode::BAD_REQUEST, "NO_EMPLOYEE_SELECTED".to_string())
        );
        assert_eq!(
            status_and_code(EngineError::MissingSalary {
                employee_id: "emp_001".to_string()
            }),
            (StatusCode::BAD_REQUEST, "MISSING_SALARY".to_string())
        );
        assert_eq!(
            status_and_code(EngineError::validation("month", "must be between 1 and 12")),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR".to_string())
        );
        assert_eq!(
            status_and_code(EngineError::EmptyCart {
                session_id: Uuid::nil()
            }),
            (StatusCode::BAD_REQUEST, "EMPTY_CART".to_string())
        );
    }

    #[test]
    fn test_lifecycle_conflicts() {
        assert_eq!(
            status_and_code(EngineError::PayrollAlreadyPaid {
                payroll_id: Uuid::nil()
            }),
            (StatusCode::CONFLICT, "PAYROLL_ALREADY_PAID".to_string())
        );
        assert_eq!(
            status_and_code(EngineError::DuplicatePayroll {
                employee_id: "emp_001".to_string(),
                year: 2025,
                month: 3
            }),
            (StatusCode::CONFLICT, "DUPLICATE_PAYROLL".to_string())
        );
    }

    #[test]
    fn test_not_found_errors() {
        assert_eq!(
            status_and_code(EngineError::EmployeeNotFound {
                employee_id: "x".to_string()
            })
            .0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_and_code(EngineError::CartNotFound {
                session_id: Uuid::nil()
            })
            .0,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_absence_lookup_failure_is_unavailable() {
        let response: ApiErrorResponse = EngineError::from(FetchError::Unavailable {
            reason: "attendance service timed out".to_string(),
        })
        .into();
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.error.code, "ABSENCE_LOOKUP_FAILED");
        assert!(
            response
                .error
                .details
                .unwrap()
                .contains("attendance service timed out")
        );
    }

    #[test]
    fn test_invalid_period_is_bad_request() {
        let (status, code) = status_and_code(EngineError::from(FetchError::InvalidPeriod {
            year: 2025,
            month: 13,
        }));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_PERIOD");
    }

    #[test]
    fn test_config_errors_are_internal() {
        let (status, code) = status_and_code(EngineError::InvalidConfig {
            message: "bad".to_string(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "CONFIG_ERROR");
    }
}
