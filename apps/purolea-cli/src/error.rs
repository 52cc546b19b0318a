//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Purolea Quote                          │
//! │                                                                         │
//! │  purolea save --product ... --client-email bad                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command Function                                                │   │
//! │  │  Result<String, CliError>                                        │   │
//! │  │         │                                                        │   │
//! │  │  Store error? ──── DbError::ForeignKeyViolation ─────┐           │   │
//! │  │         │                                            │           │   │
//! │  │  Rule violated? ── CoreError::Validation ───────► CliError ────► │   │
//! │  │         │                                                        │   │
//! │  │  Success ──────────────────────────────────────────────────────► │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  stderr: [VALIDATION_ERROR] Client email has invalid format: ...        │
//! │  exit status: ErrorCode::exit_status()                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use purolea_core::{CoreError, ValidationError};
use purolea_db::DbError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Error returned from commands.
///
/// ## Display
/// ```text
/// [NOT_FOUND] Product not found: 5b0c...
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{}] {}", .code.as_str(), .message)]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced record does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A quote needs a product and none was given
    NoProduct,

    /// Store operation failed
    DatabaseError,

    /// Environment configuration is invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NoProduct => "NO_PRODUCT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this code.
    ///
    /// Usage errors (bad input, missing records) exit with 2, everything
    /// else with 1.
    pub fn exit_status(&self) -> i32 {
        match self {
            ErrorCode::NotFound
            | ErrorCode::ValidationError
            | ErrorCode::NoProduct
            | ErrorCode::ConfigError => 2,
            ErrorCode::DatabaseError | ErrorCode::Internal => 1,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Conversions
// =============================================================================

impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CliError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => CliError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!(%message, "Foreign key violation");
                CliError::validation("Unknown product reference")
            }
            DbError::Validation(e) => CliError::validation(e.to_string()),
            DbError::ConnectionFailed(e) => {
                tracing::error!(error = %e, "Database connection failed");
                CliError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!(error = %e, "Migration failed");
                CliError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %e, "Database query failed");
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                CliError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!(error = %e, "Internal database error");
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoProductSelected => {
                CliError::new(ErrorCode::NoProduct, CoreError::NoProductSelected.to_string())
            }
            CoreError::ProductNotFound(id) => CliError::not_found("Product", &id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("JSON encoding failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let err = CliError::not_found("Product", "abc");
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: abc");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = CoreError::NoProductSelected.into();
        assert_eq!(err.code, ErrorCode::NoProduct);
        assert_eq!(err.to_string(), "[NO_PRODUCT] Please select a product first");

        let err: CliError = CoreError::Validation(ValidationError::Required {
            field: "Client name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Client name is required");
    }

    #[test]
    fn test_db_error_mapping() {
        let err: CliError = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: CliError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(ErrorCode::ValidationError.exit_status(), 2);
        assert_eq!(ErrorCode::DatabaseError.exit_status(), 1);
    }

    #[test]
    fn test_serializes_code() {
        let json = serde_json::to_string(&CliError::validation("bad")).unwrap();
        assert_eq!(json, r#"{"code":"VALIDATION_ERROR","message":"bad"}"#);
    }
}
