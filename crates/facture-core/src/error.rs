//! # Error Types
//!
//! Domain-specific error types for facture-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  facture-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  NOTE: a line that fails its validate() check is NOT an error.         │
//! │  Failed validation is reported through LineItem::errors() and the      │
//! │  `false` return of Document::validate_line - the row simply stays      │
//! │  editable. CoreError is reserved for misuse of the API itself          │
//! │  (unknown line id, writing to a locked row, out-of-range input).       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (line id, field, bounds)
//! 3. Errors are enum variants, never String

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent misuse of the engine API, not user input problems.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line with this id exists in the document.
    ///
    /// ## When This Occurs
    /// - The UI kept a stale row id after a removal
    /// - A saved draft references a line that was discarded
    #[error("Line not found: {line_id}")]
    LineNotFound { line_id: Uuid },

    /// The line is validated (locked) and must be unlocked before editing.
    ///
    /// ## User Workflow
    /// ```text
    /// Row is Validated (locked, read-only)
    ///      │
    ///      ▼
    /// set_quantity(...) ──► LineLocked
    ///      │
    ///      ▼
    /// UI prompts: click the row to unlock it first
    /// ```
    #[error("Line {line_id} is validated; unlock it before editing")]
    LineLocked { line_id: Uuid },

    /// The document already holds the maximum number of lines.
    #[error("Document cannot have more than {max} lines")]
    DocumentFull { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a supplied value doesn't meet requirements.
/// Used for early validation before the value reaches a line or document.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let id = Uuid::nil();
        let err = CoreError::LineLocked { line_id: id };
        assert_eq!(
            err.to_string(),
            format!("Line {} is validated; unlock it before editing", id)
        );

        let err = CoreError::DocumentFull { max: 100 };
        assert_eq!(err.to_string(), "Document cannot have more than 100 lines");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "designation".to_string(),
        };
        assert_eq!(err.to_string(), "designation is required");

        let err = ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 10000,
        };
        assert_eq!(err.to_string(), "discount must be between 0 and 10000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
