//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog and lookup failures                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-view errors (separate crate)                               │
//! │  ├── ViewError        - Config, catalog loading, source failures       │
//! │  └── SourceError      - What the blog collaborator reports             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ViewError → rendering layer       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering and paging never produce errors: malformed criteria yield an
//! empty result and out-of-range jumps are clamped. Errors here come from
//! building catalogs and pagers out of untrusted input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No item with the given key exists in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Catalog payload could not be parsed.
    ///
    /// ## When This Occurs
    /// - Catalog JSON is malformed
    /// - A record is missing a required field (code, price, category)
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

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

    /// Invalid format (e.g., a slug with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
