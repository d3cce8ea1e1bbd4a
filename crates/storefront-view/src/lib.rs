//! # storefront-view: Async View State for the Storefront
//!
//! This crate drives the storefront sections over time: carousels that
//! advance on a timer, a detail pane that fetches full records without
//! letting stale responses win, and list pages that mount a catalog and
//! keep the visitor's filters.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        View Layer Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 Rendering layer (external)                       │  │
//! │  │   reads snapshots, calls setters, receives ViewEvents            │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │   Carousel     │  │  DetailLoader  │  │  ListView              │    │
//! │  │                │  │                │  │                        │    │
//! │  │ Pager behind   │  │ Generation     │  │ Catalog + criteria +   │    │
//! │  │ Arc<Mutex>,    │  │ counter, cache,│  │ sort + window          │    │
//! │  │ tokio interval │  │ summary        │  │                        │    │
//! │  │ task           │  │ fallback       │  │                        │    │
//! │  └────────────────┘  └───────┬────────┘  └───────────┬────────────┘    │
//! │                              │                       │                  │
//! │                              ▼                       ▼                  │
//! │                     ┌──────────────────────────────────────┐           │
//! │                     │  PostSource (blog service, static)   │           │
//! │                     └──────────────────────────────────────┘           │
//! │                                                                         │
//! │  EVENTS (to the rendering layer):                                      │
//! │  • SlideChanged - a carousel advanced on its own                       │
//! │  • DetailLoading / DetailReady - detail pane transitions               │
//! │  • ScrollToTop - a detail record was opened                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`carousel`] - Carousel with auto-advance timer
//! - [`loader`] - Last-request-wins detail loader
//! - [`view`] - List page sessions
//! - [`source`] - Data source trait and in-memory source
//! - [`events`] - Event emitter trait and implementations
//! - [`config`] - View configuration (TOML + environment)
//! - [`error`] - View error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_core::types::BlogPost;
//! use storefront_view::{DetailLoader, ListView, StaticSource, ViewConfig};
//!
//! # async fn example() -> storefront_view::ViewResult<()> {
//! let config = ViewConfig::load_or_default(None);
//! let source = Arc::new(StaticSource::new(vec![
//!     BlogPost::summary(1, "getting-started", "Getting Started"),
//! ]));
//!
//! let mut blog: ListView<BlogPost> = ListView::new(Default::default(), config.store.page_size)?;
//! blog.mount(source.as_ref()).await?;
//!
//! let loader: DetailLoader<BlogPost> = DetailLoader::new(source.clone(), &config.detail);
//! if let Some(post) = blog.find("getting-started").cloned() {
//!     loader.select(post).await;
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod source;
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use carousel::Carousel;
pub use config::{CarouselSettings, DetailSettings, StoreSettings, ViewConfig};
pub use error::{SourceError, ViewError, ViewResult};
pub use events::{ChannelEmitter, NoOpEmitter, ViewEvent, ViewEventEmitter};
pub use loader::{Detail, DetailLoader, DetailOrigin, DetailState, Selection};
pub use source::{PostSource, StaticSource};
pub use view::{ListView, LoadState};
