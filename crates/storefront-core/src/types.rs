//! # Domain Types
//!
//! The records the storefront lists, and the [`Item`] trait the filter
//! pipeline and pagers consume them through.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │                       ┌─────────────────┐                              │
//! │                       │   trait Item    │                              │
//! │                       │  ─────────────  │                              │
//! │                       │  key()          │                              │
//! │                       │  category()     │                              │
//! │                       │  price()        │                              │
//! │                       │  availability() │                              │
//! │                       │  search_fields()│                              │
//! │                       └────────┬────────┘                              │
//! │                 ┌──────────────┴──────────────┐                        │
//! │        ┌────────┴────────┐           ┌────────┴────────┐               │
//! │        │    Product      │           │    BlogPost     │               │
//! │        │  ─────────────  │           │  ─────────────  │               │
//! │        │  id (number)    │           │  slug (key)     │               │
//! │        │  code           │           │  title          │               │
//! │        │  price (Money)  │           │  excerpt        │               │
//! │        │  availability   │           │  content?       │               │
//! │        └─────────────────┘           └─────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are immutable once loaded into a source collection. Views hold them
//! behind shared references and never edit them in place.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Trait
// =============================================================================

/// A catalog or listing entry that can be filtered, sorted and paged.
pub trait Item {
    /// Stable identifier. Product ids, blog slugs.
    fn key(&self) -> Cow<'_, str>;

    /// Category used by the category predicate. `None` never matches a
    /// specific category.
    fn category(&self) -> Option<&str>;

    /// Price used by the price predicate and price sorts. Items without a
    /// price are not constrained by price ranges.
    fn price(&self) -> Option<Money> {
        None
    }

    fn availability(&self) -> Availability {
        Availability::InStock
    }

    /// Text fields searched case-insensitively by the search predicate.
    fn search_fields(&self) -> Vec<&str>;

    /// Name used for alphabetical sorting.
    fn display_name(&self) -> &str;
}

// =============================================================================
// Availability
// =============================================================================

/// Stock availability of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    #[default]
    InStock,
    OutOfStock,
}

impl Availability {
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        matches!(self, Availability::InStock)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product shown in the store page and the product carousels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Numeric product id.
    pub id: u32,

    /// Product code, e.g. "MLM-001".
    pub code: String,

    /// Marketing name (carousels show this; the store grid shows the code).
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub brand: String,

    /// Current selling price.
    pub price: Money,

    /// Price before discount, shown struck through.
    #[serde(default)]
    pub original_price: Option<Money>,

    #[serde(default)]
    pub description: String,

    /// Image path relative to the site root.
    #[serde(default)]
    pub image: String,

    pub category: String,

    #[serde(default)]
    pub availability: Availability,

    /// Average review score out of five.
    #[serde(default)]
    pub rating: Option<f32>,

    /// Number of reviews behind `rating`.
    #[serde(default)]
    pub reviews: Option<u32>,
}

impl Product {
    /// Creates an in-stock product with the required fields.
    pub fn new(id: u32, code: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Product {
            id,
            code: code.into(),
            name: None,
            brand: String::new(),
            price,
            original_price: None,
            description: String::new(),
            image: String::new(),
            category: category.into(),
            availability: Availability::InStock,
            rating: None,
            reviews: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    pub fn with_rating(mut self, rating: f32, reviews: u32) -> Self {
        self.rating = Some(rating);
        self.reviews = Some(reviews);
        self
    }

    /// Percentage saved against the original price, if any.
    pub fn discount_percent(&self) -> Option<u32> {
        self.original_price
            .and_then(|original| self.price.discount_percent(original))
    }
}

impl Item for Product {
    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(self.id.to_string())
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn price(&self) -> Option<Money> {
        Some(self.price)
    }

    fn availability(&self) -> Availability {
        self.availability
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.code.as_str(), self.description.as_str()];
        if let Some(name) = &self.name {
            fields.push(name);
        }
        fields
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.code)
    }
}

// =============================================================================
// Blog Post
// =============================================================================

/// A blog post as returned by the blog service.
///
/// List endpoints return summaries (no `content`); the by-slug endpoint
/// returns the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BlogPost {
    pub id: i64,

    /// URL slug, the key used to fetch the full post.
    pub slug: String,

    pub title: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    /// Full body. Absent in list summaries.
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub featured_image: Option<String>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub published_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// Creates a list summary with no body.
    pub fn summary(id: i64, slug: impl Into<String>, title: impl Into<String>) -> Self {
        BlogPost {
            id,
            slug: slug.into(),
            title: title.into(),
            excerpt: None,
            content: None,
            category_name: None,
            author: None,
            featured_image: None,
            published_at: None,
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_name = Some(category.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether the full body has been loaded.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

impl Item for BlogPost {
    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.slug)
    }

    fn category(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(excerpt) = &self.excerpt {
            fields.push(excerpt);
        }
        fields
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_wire_format() {
        let json = serde_json::to_string(&Availability::OutOfStock).unwrap();
        assert_eq!(json, "\"out-of-stock\"");

        let parsed: Availability = serde_json::from_str("\"in-stock\"").unwrap();
        assert_eq!(parsed, Availability::InStock);
    }

    #[test]
    fn test_product_from_store_json() {
        let json = r#"{
            "id": 8,
            "code": "MLM-008",
            "brand": "LifeEasy",
            "price": 1800,
            "description": "Performance Tracker - Real-time Monitoring",
            "image": "/product2.jpeg",
            "category": "tracker",
            "availability": "out-of-stock"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::from_minor(1800));
        assert_eq!(product.availability, Availability::OutOfStock);
        assert_eq!(product.key(), "8");
        assert_eq!(product.display_name(), "MLM-008");
    }

    #[test]
    fn test_product_search_fields_include_name() {
        let product = Product::new(1, "BMS-001", Money::from_minor(2500), "business")
            .with_name("Business Management Suite")
            .with_description("All-in-one");
        assert_eq!(
            product.search_fields(),
            vec!["BMS-001", "All-in-one", "Business Management Suite"]
        );
        assert_eq!(product.display_name(), "Business Management Suite");
    }

    #[test]
    fn test_product_discount() {
        let product = Product::new(1, "BMS-001", Money::from_minor(2500), "business")
            .with_original_price(Money::from_minor(3500));
        assert_eq!(product.discount_percent(), Some(29));

        let plain = Product::new(2, "X", Money::from_minor(100), "tool");
        assert_eq!(plain.discount_percent(), None);
    }

    #[test]
    fn test_blog_post_summary_has_no_content() {
        let post = BlogPost::summary(1, "mlm-basics", "MLM Basics").with_excerpt("Start here");
        assert!(!post.has_content());
        assert_eq!(post.key(), "mlm-basics");
        assert_eq!(post.price(), None);
        assert_eq!(post.search_fields(), vec!["MLM Basics", "Start here"]);

        let full = post.with_content("<p>Body</p>");
        assert!(full.has_content());
    }

    #[test]
    fn test_blog_post_from_api_json() {
        let json = r#"{
            "id": 42,
            "slug": "binary-plans",
            "title": "Binary Plans Explained",
            "category_name": "Guides",
            "published_at": "2024-03-01T10:00:00Z"
        }"#;

        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.category(), Some("Guides"));
        assert!(post.published_at.is_some());
        assert!(post.excerpt.is_none());
    }
}
