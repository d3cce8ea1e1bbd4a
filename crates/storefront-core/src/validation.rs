//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load                                                 │
//! │  ├── Keys unique, prices non-negative                                  │
//! │  └── Rejects the whole catalog on the first bad record                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: View configuration                                           │
//! │  ├── Window sizes and timer intervals must be positive                 │
//! │  └── Currency decimals bounded so price formatting cannot overflow     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Runtime input (search box)                                   │
//! │  └── Never fails the view: callers degrade instead of erroring         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_currency_decimals, validate_window_size};
//!
//! assert!(validate_currency_decimals(2).is_ok());
//! assert!(validate_window_size(4).is_ok());
//! assert!(validate_window_size(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_SEARCH_QUERY_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Most minor-unit digits a currency may declare; `10^18` still fits in a `u64`.
pub const MAX_CURRENCY_DECIMALS: u8 = 18;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters after trimming
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a pager window size. Zero-width windows would never show
/// anything and make slide-window arithmetic meaningless.
pub fn validate_window_size(window_size: usize) -> ValidationResult<()> {
    if window_size == 0 {
        return Err(ValidationError::MustBePositive {
            field: "window_size".to_string(),
        });
    }

    Ok(())
}

/// Validates a timer interval in milliseconds.
pub fn validate_interval_ms(field: &str, interval_ms: u64) -> ValidationResult<()> {
    if interval_ms == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates the number of minor-unit digits of a display currency.
pub fn validate_currency_decimals(decimals: u8) -> ValidationResult<()> {
    if decimals > MAX_CURRENCY_DECIMALS {
        return Err(ValidationError::OutOfRange {
            field: "decimals".to_string(),
            min: 0,
            max: MAX_CURRENCY_DECIMALS as i64,
        });
    }

    Ok(())
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
