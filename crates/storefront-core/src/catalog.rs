//! # Catalog
//!
//! A validated source collection: the items a view mounts with.
//!
//! ## Load Rules
//! - Keys are unique: [`Catalog::new`] rejects duplicates,
//!   [`Catalog::keep_first`] drops later occurrences and reports them
//! - Prices are non-negative
//! - Source order is kept; it is the "featured" order
//!
//! ## Example
//! ```rust
//! use storefront_core::catalog::Catalog;
//! use storefront_core::types::Product;
//!
//! let json = r#"[
//!     {"id": 1, "code": "MLM-001", "price": 2500, "category": "software"},
//!     {"id": 2, "code": "MLM-002", "price": 3800, "category": "platform"}
//! ]"#;
//!
//! let catalog: Catalog<Product> = Catalog::from_json(json).unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.get("2").unwrap().code, "MLM-002");
//! ```

use std::collections::HashSet;

use serde::de::DeserializeOwned;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Item;
use crate::validation::validate_price;

/// Immutable, validated item collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<T> {
    items: Vec<T>,
}

impl<T: Item> Catalog<T> {
    /// Validates `items` and wraps them.
    pub fn new(items: Vec<T>) -> CoreResult<Self> {
        let mut keys = HashSet::with_capacity(items.len());

        for item in &items {
            let key = item.key();
            if key.is_empty() {
                return Err(ValidationError::Required {
                    field: "key".to_string(),
                }
                .into());
            }
            if !keys.insert(key.to_string()) {
                return Err(ValidationError::Duplicate {
                    field: "key".to_string(),
                    value: key.into_owned(),
                }
                .into());
            }
            if let Some(price) = item.price() {
                validate_price(price)?;
            }
        }

        Ok(Catalog { items })
    }

    /// Like [`Catalog::new`], but a repeated key keeps its first occurrence.
    ///
    /// Returns the catalog and the keys of the dropped items, in source order.
    pub fn keep_first(items: Vec<T>) -> CoreResult<(Self, Vec<String>)> {
        let mut keys = HashSet::with_capacity(items.len());
        let mut dropped = Vec::new();

        let kept: Vec<T> = items
            .into_iter()
            .filter(|item| {
                let key = item.key().into_owned();
                if keys.contains(&key) {
                    dropped.push(key);
                    false
                } else {
                    keys.insert(key);
                    true
                }
            })
            .collect();

        Ok((Self::new(kept)?, dropped))
    }

    /// Parses a JSON array of items and validates it.
    pub fn from_json(json: &str) -> CoreResult<Self>
    where
        T: DeserializeOwned,
    {
        let items: Vec<T> =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidCatalog(e.to_string()))?;
        Self::new(items)
    }

    /// Looks an item up by key.
    pub fn get(&self, key: &str) -> CoreResult<&T> {
        self.items
            .iter()
            .find(|item| item.key() == key)
            .ok_or_else(|| CoreError::ItemNotFound(key.to_string()))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Catalog { items: Vec::new() }
    }
}
