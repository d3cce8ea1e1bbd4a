//! # View Errors
//!
//! Error types for the async view layer.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        View Error Categories                            │
//! │                                                                         │
//! │  CONFIGURATION                     CATALOG                             │
//! │  ─────────────                     ───────                             │
//! │  • InvalidConfig                   • Catalog (wraps CoreError)          │
//! │  • ConfigLoadFailed                                                    │
//! │  • ConfigSaveFailed                SOURCE                              │
//! │                                    ──────                              │
//! │  RUNTIME                           • Source (wraps SourceError)         │
//! │  ───────                             - Transport (retryable)            │
//! │  • NoRuntime                         - NotFound                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Detail fetches never surface a `SourceError` to callers; the loader
//! falls back to the summary instead. Listing fetches do, through
//! [`ViewError::Source`].

use storefront_core::CoreError;
use thiserror::Error;

/// Result type alias for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

// =============================================================================
// Source Error
// =============================================================================

/// Failure reported by a [`PostSource`](crate::source::PostSource).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The collaborator could not be reached or returned garbage.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The collaborator has no record under this key.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SourceError {
    /// Returns true if asking again might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Transport(_))
    }
}

// =============================================================================
// View Error
// =============================================================================

/// Errors that can occur in the view layer.
#[derive(Debug, Error)]
pub enum ViewError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load configuration file.
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save configuration file.
    #[error("Failed to save configuration: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Data Errors
    // =========================================================================
    /// Catalog could not be built (parse or validation failure).
    #[error("Catalog error: {0}")]
    Catalog(#[from] CoreError),

    /// Listing fetch failed.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// Auto-advance was enabled outside a tokio runtime.
    #[error("No tokio runtime available for the carousel timer")]
    NoRuntime,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ViewError {
    fn from(err: std::io::Error) -> Self {
        ViewError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ViewError {
    fn from(err: toml::de::Error) -> Self {
        ViewError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ViewError {
    fn from(err: toml::ser::Error) -> Self {
        ViewError::ConfigSaveFailed(err.to_string())
    }
}

impl ViewError {
    /// Returns true if this error is recoverable by retrying (the "Try
    /// again" button on a failed listing).
    pub fn is_retryable(&self) -> bool {
        match self {
            ViewError::Source(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ViewError::InvalidConfig(_)
                | ViewError::ConfigLoadFailed(_)
                | ViewError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ViewError::Source(SourceError::Transport("503".into())).is_retryable());
        assert!(!ViewError::Source(SourceError::NotFound("x".into())).is_retryable());
        assert!(!ViewError::InvalidConfig("bad".into()).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(ViewError::ConfigLoadFailed("missing".into()).is_config_error());
        assert!(!ViewError::NoRuntime.is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = ViewError::from(SourceError::NotFound("launch-notes".into()));
        assert_eq!(err.to_string(), "Source error: Not found: launch-notes");
    }
}
