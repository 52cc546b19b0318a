//! # Error Types
//!
//! Domain-specific error types for purolea-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  purolea-core errors (this file)                                       │
//! │  ├── CoreError        - Quote confirmation failures                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  purolea-db errors (separate crate)                                    │
//! │  └── DbError          - Catalog Store failures                         │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails: missing numbers become zero and missing tiers
//! resolve to a zero fee. Errors only appear when a draft is confirmed into
//! a quote or when catalog records are written.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Quote-level business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A quote was confirmed without a product.
    ///
    /// ## When This Occurs
    /// - Draft never had a product selected
    /// - External product name was blank
    #[error("Please select a product first")]
    NoProductSelected,

    /// The selected product id is not in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::NoProductSelected.to_string(),
            "Please select a product first"
        );
        assert_eq!(
            CoreError::ProductNotFound("abc".to_string()).to_string(),
            "Product not found: abc"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "client name".to_string(),
        };
        assert_eq!(err.to_string(), "client name is required");

        let err = ValidationError::InvalidFormat {
            field: "client email".to_string(),
            reason: "must look like name@example.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "client email has invalid format: must look like name@example.com"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "client email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
