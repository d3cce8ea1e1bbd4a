//! # storefront-core: Pure List-State Logic for the Storefront
//!
//! This crate holds the list logic every storefront section shares: the
//! filter pipeline behind the store page and blog, the pager arithmetic
//! behind the banner and product carousels, and the catalog types they
//! operate on. Everything here is a pure function over plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Rendering layer (external)                      │   │
//! │  │   Banner ──► Top Products ──► New Arrivals ──► Store ──► Blog   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ view events / snapshots                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-view (tokio)                         │   │
//! │  │     Carousel timer, DetailLoader, ListView sessions             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │  filter  │ │  pager   │ │ money / rating   │  │   │
//! │  │   │ Product  │ │ Criteria │ │  Pager   │ │ Money, stars     │  │   │
//! │  │   │ BlogPost │ │ SortOrder│ │WindowMode│ │                  │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item trait and the catalog records (Product, BlogPost)
//! - [`catalog`] - Validated, key-indexed item collections
//! - [`filter`] - Filter pipeline, sort orders, category facets
//! - [`pager`] - Window arithmetic for carousels and grids
//! - [`money`] - Integer money with display formatting
//! - [`rating`] - Star rendering for fractional ratings
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::filter::{filter, FilterCriteria, PriceRange};
//! use storefront_core::money::Money;
//! use storefront_core::types::{Availability, Product};
//!
//! let products = vec![
//!     Product::new(1, "MLM-001", Money::from_minor(2500), "software"),
//!     Product::new(2, "MLM-002", Money::from_minor(3800), "platform"),
//!     Product::new(3, "MLM-003", Money::from_minor(1500), "system")
//!         .with_availability(Availability::OutOfStock),
//! ];
//!
//! let mut criteria = FilterCriteria::default();
//! criteria.set_price_range(PriceRange::new(Money::zero(), Money::from_minor(3000)));
//! criteria.set_hide_out_of_stock(true);
//!
//! let visible = filter(&products, &criteria);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].code, "MLM-001");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod pager;
pub mod rating;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{CategoryFilter, FilterCriteria, PriceRange, SortOrder};
pub use money::{Currency, Money};
pub use pager::{Pager, WindowMode};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products visible at once in the product grid carousels.
pub const DEFAULT_GRID_WINDOW: usize = 4;

/// Number of stars used to render a product rating.
pub const MAX_STARS: usize = 5;

/// Maximum length of a search query typed into a list filter.
///
/// ## Business Reason
/// Longer inputs are almost always pasted text, not a search.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
