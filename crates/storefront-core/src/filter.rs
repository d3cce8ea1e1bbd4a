//! # Filter Pipeline
//!
//! Narrows a source collection down to the items a list view shows.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Filter Pipeline                                  │
//! │                                                                         │
//! │  source items ──► stock ──► search ──► category ──► price ──► result   │
//! │                                                                         │
//! │  stock     hide_out_of_stock=true drops "out-of-stock" items            │
//! │  search    case-insensitive substring over Item::search_fields()        │
//! │  category  exact match; CategoryFilter::All matches everything          │
//! │  price     min ≤ price ≤ max, inclusive; priceless items pass           │
//! │                                                                         │
//! │  Predicates AND together. Every criteria change re-runs the whole       │
//! │  pipeline: lists are small, so there is no incremental diffing.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Pure: the source slice is never mutated.
//! - Order-preserving: survivors keep their source order.
//! - Idempotent: filtering a filtered list with the same criteria is a no-op.
//! - Never fails: an inverted price range yields an empty result.
//!
//! ## Example
//! ```rust
//! use storefront_core::filter::{filter, CategoryFilter, FilterCriteria};
//! use storefront_core::types::BlogPost;
//!
//! let posts = vec![
//!     BlogPost::summary(1, "binary-plans", "Binary Plans").with_category("Guides"),
//!     BlogPost::summary(2, "team-news", "Team News").with_category("News"),
//! ];
//!
//! let mut criteria = FilterCriteria::default();
//! criteria.set_category(CategoryFilter::parse("Guides"));
//!
//! let shown = filter(&posts, &criteria);
//! assert_eq!(shown.len(), 1);
//! assert_eq!(shown[0].slug, "binary-plans");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Availability, Item};

// =============================================================================
// Category Filter
// =============================================================================

/// Category predicate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Matches every item.
    #[default]
    All,

    /// Matches items whose category equals this name exactly.
    Only(String),
}

impl CategoryFilter {
    /// Parses a category selector as the list pages send it.
    ///
    /// The store page uses `"all"` as its sentinel while the blog uses the
    /// empty string; both mean [`CategoryFilter::All`].
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "all" => CategoryFilter::All,
            other => CategoryFilter::Only(other.to_string()),
        }
    }

    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub const fn new(min: Money, max: Money) -> Self {
        PriceRange { min, max }
    }

    /// A range that admits every non-negative price.
    pub const fn unbounded() -> Self {
        PriceRange {
            min: Money::zero(),
            max: Money::max_value(),
        }
    }

    /// `min > max`. Such a range matches nothing.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::unbounded()
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The complete set of list filters.
///
/// Fields are private; each setter replaces exactly one field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    search_term: String,
    category: CategoryFilter,
    price_range: PriceRange,
    hide_out_of_stock: bool,
}

impl FilterCriteria {
    /// Default criteria with a specific price range. The store page starts
    /// with `[0, 10000]`.
    pub fn with_price_range(price_range: PriceRange) -> Self {
        FilterCriteria {
            price_range,
            ..Default::default()
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    pub fn hide_out_of_stock(&self) -> bool {
        self.hide_out_of_stock
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.price_range = range;
    }

    pub fn set_hide_out_of_stock(&mut self, hide: bool) {
        self.hide_out_of_stock = hide;
    }

    /// Whether a single item passes every predicate.
    ///
    /// Prefer [`filter`] for whole collections; it lowercases the search
    /// term once instead of per item.
    pub fn matches<T: Item>(&self, item: &T) -> bool {
        Matcher::new(self).matches(item)
    }
}

/// Criteria with the search needle prepared once per pipeline run.
struct Matcher<'c> {
    criteria: &'c FilterCriteria,
    needle: String,
}

impl<'c> Matcher<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Matcher {
            criteria,
            needle: criteria.search_term.to_lowercase(),
        }
    }

    fn matches<T: Item>(&self, item: &T) -> bool {
        let c = self.criteria;

        if c.price_range.is_inverted() {
            return false;
        }

        if c.hide_out_of_stock && item.availability() == Availability::OutOfStock {
            return false;
        }

        if !self.needle.is_empty()
            && !item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
        {
            return false;
        }

        if !c.category.matches(item.category()) {
            return false;
        }

        match item.price() {
            Some(price) => c.price_range.contains(price),
            None => true,
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Applies `criteria` to `items`, returning the survivors in source order.
pub fn filter<'a, T: Item>(items: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    if criteria.price_range.is_inverted() {
        return Vec::new();
    }

    let matcher = Matcher::new(criteria);
    items.iter().filter(|item| matcher.matches(*item)).collect()
}

/// Owned variant of [`filter`].
pub fn filter_cloned<T: Item + Clone>(items: &[T], criteria: &FilterCriteria) -> Vec<T> {
    filter(items, criteria).into_iter().cloned().collect()
}

/// Distinct categories in first-seen order, for category dropdowns.
pub fn categories<T: Item>(items: &[T]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for category in items.iter().filter_map(Item::category) {
        if !category.is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }

    seen
}

// =============================================================================
// Sort Order
// =============================================================================

/// Result ordering offered by the store page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Source order.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    NameAToZ,
}

impl SortOrder {
    /// Sorts in place. The sort is stable, so ties keep source order;
    /// items without a price sort after priced ones.
    pub fn apply<T: Item>(&self, items: &mut [&T]) {
        match self {
            SortOrder::Featured => {}
            SortOrder::PriceLowToHigh => items.sort_by(|a, b| cmp_price(a.price(), b.price())),
            SortOrder::PriceHighToLow => {
                items.sort_by(|a, b| cmp_price_desc(a.price(), b.price()))
            }
            SortOrder::NameAToZ => items.sort_by(|a, b| {
                a.display_name()
                    .to_lowercase()
                    .cmp(&b.display_name().to_lowercase())
            }),
        }
    }
}

fn cmp_price(a: Option<Money>, b: Option<Money>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_price_desc(a: Option<Money>, b: Option<Money>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        _ => cmp_price(a, b),
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Featured => write!(f, "featured"),
            SortOrder::PriceLowToHigh => write!(f, "price-low"),
            SortOrder::PriceHighToLow => write!(f, "price-high"),
            SortOrder::NameAToZ => write!(f, "name"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "featured" => Ok(SortOrder::Featured),
            "price-low" | "price-low-to-high" => Ok(SortOrder::PriceLowToHigh),
            "price-high" | "price-high-to-low" => Ok(SortOrder::PriceHighToLow),
            "name" | "name-a-to-z" => Ok(SortOrder::NameAToZ),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: vec![
                    "featured".to_string(),
                    "price-low".to_string(),
                    "price-high".to_string(),
                    "name".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlogPost, Product};

    /// The store page catalog, trimmed to the fields the filters read.
    fn store_catalog() -> Vec<Product> {
        vec![
            Product::new(1, "MLM-001", Money::from_minor(2500), "software")
                .with_description("MLM Software Solution - Complete Network Marketing Platform"),
            Product::new(2, "MLM-002", Money::from_minor(3800), "platform")
                .with_description("Network Marketing Platform - Advanced Business Management"),
            Product::new(3, "MLM-003", Money::from_minor(1500), "system")
                .with_description("Commission Tracking System - Automated Payment Processing"),
            Product::new(4, "MLM-004", Money::from_minor(2200), "tool")
                .with_description("Downline Management Tool - Team Performance Analytics"),
            Product::new(7, "MLM-007", Money::from_minor(3200), "platform")
                .with_description("Automation Platform - Streamlined Operations"),
            Product::new(8, "MLM-008", Money::from_minor(1800), "tracker")
                .with_description("Performance Tracker - Real-time Monitoring")
                .with_availability(Availability::OutOfStock),
        ]
    }

    fn ids(items: &[&Product]) -> Vec<u32> {
        items.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_criteria_matches_everything() {
        let catalog = store_catalog();
        let result = filter(&catalog, &FilterCriteria::default());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 7, 8]);
    }

    #[test]
    fn test_price_range_inclusive_and_order_preserving() {
        let catalog = vec![
            Product::new(1, "A", Money::from_minor(2500), "x"),
            Product::new(2, "B", Money::from_minor(3800), "x"),
            Product::new(3, "C", Money::from_minor(1500), "x"),
        ];
        let criteria =
            FilterCriteria::with_price_range(PriceRange::new(Money::zero(), Money::from_minor(3000)));

        let result = filter(&catalog, &criteria);
        let prices: Vec<i64> = result.iter().map(|p| p.price.minor()).collect();
        assert_eq!(prices, vec![2500, 1500]);

        // Both bounds are inclusive
        let exact =
            FilterCriteria::with_price_range(PriceRange::new(Money::from_minor(1500), Money::from_minor(2500)));
        assert_eq!(ids(&filter(&catalog, &exact)), vec![1, 3]);
    }

    #[test]
    fn test_inverted_price_range_is_empty() {
        let catalog = store_catalog();
        let criteria =
            FilterCriteria::with_price_range(PriceRange::new(Money::from_minor(5000), Money::from_minor(100)));
        assert!(filter(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_hide_out_of_stock() {
        let catalog = store_catalog();
        let mut criteria = FilterCriteria::default();
        criteria.set_hide_out_of_stock(true);

        let result = filter(&catalog, &criteria);
        assert!(result.iter().all(|p| p.availability == Availability::InStock));
        assert_eq!(
            result.len(),
            catalog.iter().filter(|p| p.availability.is_in_stock()).count()
        );
        assert!(!ids(&result).contains(&8));

        criteria.set_hide_out_of_stock(false);
        assert!(ids(&filter(&catalog, &criteria)).contains(&8));
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let catalog = store_catalog();
        let mut criteria = FilterCriteria::default();

        criteria.set_search_term("mlm-00");
        assert_eq!(filter(&catalog, &criteria).len(), 6);

        criteria.set_search_term("PLATFORM");
        assert_eq!(ids(&filter(&catalog, &criteria)), vec![1, 2, 7]);

        criteria.set_search_term("");
        assert_eq!(filter(&catalog, &criteria).len(), 6);

        criteria.set_search_term("no such thing");
        assert!(filter(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_search_term_is_matched_verbatim() {
        let catalog = store_catalog();
        let mut criteria = FilterCriteria::default();

        criteria.set_search_term("   ");
        assert!(filter(&catalog, &criteria).is_empty());

        criteria.set_search_term("mlm-001 ");
        assert!(filter(&catalog, &criteria).is_empty());

        criteria.set_search_term("tracking system");
        assert_eq!(ids(&filter(&catalog, &criteria)), vec![3]);
    }

    #[test]
    fn test_category_sentinels() {
        let catalog = store_catalog();
        let mut criteria = FilterCriteria::default();

        criteria.set_category(CategoryFilter::parse("platform"));
        assert_eq!(ids(&filter(&catalog, &criteria)), vec![2, 7]);

        criteria.set_category(CategoryFilter::parse("all"));
        assert_eq!(filter(&catalog, &criteria).len(), 6);

        criteria.set_category(CategoryFilter::parse(""));
        assert_eq!(filter(&catalog, &criteria).len(), 6);

        // Exact match only
        criteria.set_category(CategoryFilter::parse("Platform"));
        assert!(filter(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let catalog = store_catalog();
        let mut criteria = FilterCriteria::default();
        criteria.set_category(CategoryFilter::parse("platform"));
        criteria.set_price_range(PriceRange::new(Money::zero(), Money::from_minor(3500)));
        criteria.set_search_term("automation");

        assert_eq!(ids(&filter(&catalog, &criteria)), vec![7]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = store_catalog();
        let mut criteria = FilterCriteria::default();
        let combos: Vec<Box<dyn Fn(&mut FilterCriteria)>> = vec![
            Box::new(|_: &mut FilterCriteria| {}),
            Box::new(|c: &mut FilterCriteria| c.set_hide_out_of_stock(true)),
            Box::new(|c: &mut FilterCriteria| c.set_search_term("management")),
            Box::new(|c: &mut FilterCriteria| c.set_category(CategoryFilter::parse("tracker"))),
            Box::new(|c: &mut FilterCriteria| {
                c.set_price_range(PriceRange::new(Money::from_minor(2000), Money::from_minor(4000)))
            }),
            Box::new(|c: &mut FilterCriteria| {
                c.set_price_range(PriceRange::new(Money::from_minor(9), Money::from_minor(1)))
            }),
        ];

        for apply in combos {
            apply(&mut criteria);
            let once = filter_cloned(&catalog, &criteria);
            let twice = filter_cloned(&once, &criteria);
            assert_eq!(once, twice, "criteria: {:?}", criteria);
        }
    }

    #[test]
    fn test_source_is_untouched() {
        let catalog = store_catalog();
        let before = catalog.clone();
        let mut criteria = FilterCriteria::default();
        criteria.set_hide_out_of_stock(true);
        let _ = filter(&catalog, &criteria);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_blog_posts_ignore_price_range() {
        let posts = vec![
            BlogPost::summary(1, "binary-plans", "Binary Plans").with_excerpt("Compensation basics"),
            BlogPost::summary(2, "team-news", "Team News"),
        ];
        let mut criteria =
            FilterCriteria::with_price_range(PriceRange::new(Money::zero(), Money::from_minor(10)));
        assert_eq!(filter(&posts, &criteria).len(), 2);

        criteria.set_search_term("compensation");
        let result = filter(&posts, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].slug, "binary-plans");
    }

    #[test]
    fn test_uncategorised_post_only_matches_all() {
        let posts = vec![BlogPost::summary(1, "untagged", "Untagged")];
        let mut criteria = FilterCriteria::default();
        criteria.set_category(CategoryFilter::parse("News"));
        assert!(filter(&posts, &criteria).is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let posts = vec![
            BlogPost::summary(1, "a", "A").with_category("News"),
            BlogPost::summary(2, "b", "B"),
            BlogPost::summary(3, "c", "C").with_category("Guides"),
            BlogPost::summary(4, "d", "D").with_category("News"),
        ];
        assert_eq!(categories(&posts), vec!["News", "Guides"]);
    }

    #[test]
    fn test_sort_orders() {
        let catalog = store_catalog();
        let mut items: Vec<&Product> = catalog.iter().collect();

        SortOrder::PriceLowToHigh.apply(&mut items);
        assert_eq!(ids(&items), vec![3, 8, 4, 1, 7, 2]);

        SortOrder::PriceHighToLow.apply(&mut items);
        assert_eq!(ids(&items), vec![2, 7, 1, 4, 8, 3]);

        SortOrder::NameAToZ.apply(&mut items);
        assert_eq!(ids(&items), vec![1, 2, 3, 4, 7, 8]);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("price-low".parse::<SortOrder>().unwrap(), SortOrder::PriceLowToHigh);
        assert_eq!("NAME".parse::<SortOrder>().unwrap(), SortOrder::NameAToZ);
        assert_eq!(SortOrder::PriceHighToLow.to_string(), "price-high");
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
