//! Unified error types for all layers of the accounts backend.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;
use tracing::{error, warn};

/// Status class reported for input that failed validation.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Status class reported for store, cache, and internal failures.
pub const STATUS_INTERNAL: u16 = 500;

/// Unified error type for the accounts backend.
///
/// Input errors never touch the store; every other variant describes a
/// failure of an external collaborator or an unexpected store result.
#[derive(Error, Debug)]
pub enum AccountsError {
    // ============ Input Errors ============
    /// Field-level validation failure.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable summary of every failing field.
        message: String,
        /// Per-field causes.
        details: Vec<FieldError>,
    },

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Cached or stored payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    /// Returns the status class for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => STATUS_BAD_REQUEST,
            Self::Database(_)
            | Self::Cache(_)
            | Self::Serialization(_)
            | Self::Configuration(_)
            | Self::Internal(_) => STATUS_INTERNAL,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a validation error without field details.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the field-level causes of a validation error.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { details, .. } => details,
            _ => &[],
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AccountsError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // MySQL unique violation
            if db_err.code().as_deref() == Some("23000") || db_err.message().contains("Duplicate entry") {
                return Self::Database(format!("Unique constraint violated: {}", db_err.message()));
            }
        }
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AccountsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Normalized failure returned by every handler operation.
///
/// Carries the name of the operation that failed, the caller-facing status
/// class (400 for validation, 500 for everything else) and the cause.
#[derive(Error, Debug)]
#[error("{operation} failed with status {status}: {cause}")]
pub struct HandlerError {
    operation: &'static str,
    status: u16,
    #[source]
    cause: AccountsError,
}

impl HandlerError {
    /// Builds a handler error and records it in the log.
    pub fn new(operation: &'static str, status: u16, cause: impl Into<AccountsError>) -> Self {
        let cause = cause.into();
        if status >= STATUS_INTERNAL {
            error!(operation, status, cause = %cause, "handler operation failed");
        } else {
            warn!(operation, status, cause = %cause, "handler operation rejected input");
        }
        Self {
            operation,
            status,
            cause,
        }
    }

    /// Builds a 400-class error.
    pub fn bad_request(operation: &'static str, cause: impl Into<AccountsError>) -> Self {
        Self::new(operation, STATUS_BAD_REQUEST, cause)
    }

    /// Builds a 500-class error.
    pub fn internal(operation: &'static str, cause: impl Into<AccountsError>) -> Self {
        Self::new(operation, STATUS_INTERNAL, cause)
    }

    /// Name of the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Caller-facing status class.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Underlying cause.
    #[must_use]
    pub const fn cause(&self) -> &AccountsError {
        &self.cause
    }

    /// Consumes the error and returns the underlying cause.
    #[must_use]
    pub fn into_cause(self) -> AccountsError {
        self.cause
    }
}

/// Serializable error shape for whatever surface sits above the handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Operation that failed
    pub operation: String,
    /// Status class
    pub status: u16,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `HandlerError`.
    #[must_use]
    pub fn from_error(error: &HandlerError) -> Self {
        let details = error.cause().field_errors();
        Self {
            operation: error.operation().to_string(),
            status: error.status(),
            code: error.cause().error_code().to_string(),
            message: error.cause().to_string(),
            details: (!details.is_empty()).then(|| details.to_vec()),
        }
    }
}

impl From<&HandlerError> for ErrorResponse {
    fn from(error: &HandlerError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_field_error() -> FieldError {
        FieldError {
            field: "email".to_string(),
            message: "Invalid email address".to_string(),
            code: "email".to_string(),
        }
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AccountsError::validation("invalid email").status_code(), 400);
        assert_eq!(AccountsError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(AccountsError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(AccountsError::Serialization("bad json".to_string()).status_code(), 500);
        assert_eq!(AccountsError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AccountsError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(AccountsError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(AccountsError::Cache("c".to_string()).error_code(), "CACHE_ERROR");
        assert_eq!(AccountsError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_field_errors_only_on_validation() {
        let err = AccountsError::Validation {
            message: "email: Invalid email address".to_string(),
            details: vec![email_field_error()],
        };
        assert_eq!(err.field_errors().len(), 1);
        assert!(AccountsError::internal("x").field_errors().is_empty());
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = AccountsError::from(json_err);
        assert!(matches!(err, AccountsError::Serialization(_)));
    }

    #[test]
    fn test_handler_error_carries_operation_status_and_cause() {
        let err = HandlerError::new("getUserById", 500, AccountsError::Database("gone".to_string()));
        assert_eq!(err.operation(), "getUserById");
        assert_eq!(err.status(), 500);
        assert!(matches!(err.cause(), AccountsError::Database(_)));
        assert!(err.to_string().contains("getUserById"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_handler_error_shorthands() {
        assert_eq!(HandlerError::bad_request("deleteUser", AccountsError::validation("id")).status(), 400);
        assert_eq!(HandlerError::internal("deleteUser", AccountsError::internal("x")).status(), 500);
    }

    #[test]
    fn test_handler_error_source_is_cause() {
        use std::error::Error as _;
        let err = HandlerError::internal("createUser", AccountsError::internal("user fetch failed"));
        let source = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains("user fetch failed"));
    }

    #[test]
    fn test_error_response_from_validation_error() {
        let cause = AccountsError::Validation {
            message: "email: Invalid email address".to_string(),
            details: vec![email_field_error()],
        };
        let err = HandlerError::bad_request("getUserByEmail", cause);
        let response = ErrorResponse::from(&err);
        assert_eq!(response.operation, "getUserByEmail");
        assert_eq!(response.status, 400);
        assert_eq!(response.code, "VALIDATION_ERROR");
        assert_eq!(response.details, Some(vec![email_field_error()]));
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let err = HandlerError::internal("getAllUsers", AccountsError::Database("timeout".to_string()));
        let response = ErrorResponse::from_error(&err);
        assert!(response.details.is_none());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }
}
