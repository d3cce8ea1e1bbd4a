//! # Post Sources
//!
//! The data collaborator a view fetches from. The blog service is the
//! production implementation (outside this workspace); [`StaticSource`]
//! serves bundled catalogs and tests.
//!
//! ```text
//! ListView::mount ──► fetch_posts()            ──► Vec<T>   (summaries)
//! DetailLoader    ──► fetch_post_by_slug(slug) ──► Option<T> (full record)
//! ```

use async_trait::async_trait;
use std::collections::HashMap;

use storefront_core::catalog::Catalog;
use storefront_core::types::Item;

use crate::error::SourceError;

/// Async source of listing items and full records.
#[async_trait]
pub trait PostSource<T>: Send + Sync {
    /// Fetches the listing (summaries are enough).
    async fn fetch_posts(&self) -> Result<Vec<T>, SourceError>;

    /// Fetches the full record for `slug`. `Ok(None)` means unknown slug.
    async fn fetch_post_by_slug(&self, slug: &str) -> Result<Option<T>, SourceError>;
}

// =============================================================================
// StaticSource
// =============================================================================

/// In-memory source over a fixed listing.
///
/// Full records default to the listing entries themselves; blog-style
/// sources can register richer records with [`StaticSource::with_detail`].
#[derive(Debug, Clone)]
pub struct StaticSource<T> {
    listing: Vec<T>,
    details: HashMap<String, T>,
}

impl<T: Item + Clone> StaticSource<T> {
    pub fn new(listing: Vec<T>) -> Self {
        StaticSource {
            listing,
            details: HashMap::new(),
        }
    }

    pub fn from_catalog(catalog: Catalog<T>) -> Self {
        Self::new(catalog.into_items())
    }

    /// Registers the full record returned for its key.
    pub fn with_detail(mut self, record: T) -> Self {
        self.details.insert(record.key().into_owned(), record);
        self
    }

    pub fn len(&self) -> usize {
        self.listing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }
}

impl<T: Item + Clone> Default for StaticSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T> PostSource<T> for StaticSource<T>
where
    T: Item + Clone + Send + Sync,
{
    async fn fetch_posts(&self) -> Result<Vec<T>, SourceError> {
        Ok(self.listing.clone())
    }

    async fn fetch_post_by_slug(&self, slug: &str) -> Result<Option<T>, SourceError> {
        if let Some(record) = self.details.get(slug) {
            return Ok(Some(record.clone()));
        }
        Ok(self.listing.iter().find(|item| item.key() == slug).cloned())
    }
}
