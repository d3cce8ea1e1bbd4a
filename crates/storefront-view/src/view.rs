//! # List View
//!
//! One mounted list page (the store grid or the blog index): the catalog it
//! loaded, the filters the visitor has set, the sort order, and the window
//! of results on screen.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       List View Session                                 │
//! │                                                                         │
//! │  Visitor Action          ListView Call            State Change          │
//! │  ──────────────          ─────────────            ────────────          │
//! │                                                                         │
//! │  Open page ─────────────► mount(source) ────────► Loading → Ready      │
//! │                                                   (or Failed)           │
//! │  Type in search ────────► set_search_term() ────► criteria, window → 0 │
//! │                                                                         │
//! │  Pick category ─────────► set_category() ───────► criteria, window → 0 │
//! │                                                                         │
//! │  Change sort ───────────► set_sort() ───────────► order, window → 0    │
//! │                                                                         │
//! │  Arrows ────────────────► next_page() ──────────► window offset        │
//! │                                                                         │
//! │  Leave page ────────────► reset() ──────────────► defaults restored    │
//! │                                                                         │
//! │  Click "Try again" ─────► refresh(source) ──────► reload, keep filters │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results are always derived: `results()` re-runs filter then sort over
//! the mounted catalog, so the view never holds a stale filtered copy.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use storefront_core::catalog::Catalog;
use storefront_core::filter::{self, CategoryFilter, FilterCriteria, PriceRange, SortOrder};
use storefront_core::pager::{Pager, WindowMode};
use storefront_core::types::Item;
use storefront_core::validation::validate_search_query;
use storefront_core::CoreError;

use crate::config::StoreSettings;
use crate::error::{ViewError, ViewResult};
use crate::source::PostSource;

/// Whether the page has data to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    /// Listing fetch failed; the page shows this message and a retry button.
    Failed(String),
}

/// A mounted list page.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    catalog: Catalog<T>,
    default_criteria: FilterCriteria,
    criteria: FilterCriteria,
    sort: SortOrder,
    pager: Pager,
    load_state: LoadState,
    /// When the mounted catalog was last loaded from a source.
    loaded_at: Option<DateTime<Utc>>,
}

impl<T: Item + Clone> ListView<T> {
    /// Unmounted view: no items yet, state `Loading`.
    ///
    /// `page_size` is the number of cards shown at once.
    pub fn new(default_criteria: FilterCriteria, page_size: usize) -> ViewResult<Self> {
        Ok(ListView {
            catalog: Catalog::default(),
            criteria: default_criteria.clone(),
            default_criteria,
            sort: SortOrder::default(),
            pager: Pager::new(WindowMode::SlideWindow, page_size, 0)?,
            load_state: LoadState::Loading,
            loaded_at: None,
        })
    }

    /// Unmounted store page using the configured defaults.
    pub fn for_store(settings: &StoreSettings) -> ViewResult<Self> {
        Self::new(settings.default_criteria(), settings.page_size)
    }

    /// View over an already loaded listing, state `Ready`.
    pub fn from_items(items: Vec<T>, default_criteria: FilterCriteria, page_size: usize) -> ViewResult<Self> {
        let mut view = Self::new(default_criteria, page_size)?;
        view.install(Catalog::new(items)?);
        Ok(view)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads the listing and starts from the default filters.
    ///
    /// Returns the number of items loaded. On failure the view moves to
    /// `Failed` and keeps whatever it showed before.
    pub async fn mount<S>(&mut self, source: &S) -> ViewResult<usize>
    where
        S: PostSource<T> + ?Sized,
    {
        self.criteria = self.default_criteria.clone();
        self.sort = SortOrder::default();
        self.load(source).await
    }

    /// Reloads the listing, keeping the visitor's filters and sort.
    pub async fn refresh<S>(&mut self, source: &S) -> ViewResult<usize>
    where
        S: PostSource<T> + ?Sized,
    {
        self.load(source).await
    }

    async fn load<S>(&mut self, source: &S) -> ViewResult<usize>
    where
        S: PostSource<T> + ?Sized,
    {
        self.load_state = LoadState::Loading;

        let catalog = match source.fetch_posts().await {
            Ok(items) => Catalog::keep_first(items)
                .map(|(catalog, dropped)| {
                    for key in &dropped {
                        warn!(key = %key, "Duplicate key in listing, keeping first occurrence");
                    }
                    catalog
                })
                .map_err(ViewError::from),
            Err(e) => Err(ViewError::from(e)),
        };

        match catalog {
            Ok(catalog) => {
                let count = catalog.len();
                self.install(catalog);
                self.loaded_at = Some(Utc::now());
                info!(count, "List view loaded");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "List view failed to load");
                self.load_state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn install(&mut self, catalog: Catalog<T>) {
        self.catalog = catalog;
        self.load_state = LoadState::Ready;
        self.rewind();
    }

    // =========================================================================
    // Criteria
    // =========================================================================

    /// Sets the search box text. Leading/trailing whitespace is ignored.
    pub fn set_search_term(&mut self, term: &str) -> ViewResult<()> {
        let term = validate_search_query(term).map_err(CoreError::from)?;
        debug!(term = %term, "Search term changed");
        self.criteria.set_search_term(term);
        self.rewind();
        Ok(())
    }

    /// Sets the category dropdown. `""` and `"all"` select every category.
    pub fn set_category(&mut self, category: &str) {
        self.criteria.set_category(CategoryFilter::parse(category));
        self.rewind();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.criteria.set_price_range(range);
        self.rewind();
    }

    pub fn set_hide_out_of_stock(&mut self, hide: bool) {
        self.criteria.set_hide_out_of_stock(hide);
        self.rewind();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.rewind();
    }

    /// Leaves the page: filters, sort and window back to their defaults.
    pub fn reset(&mut self) {
        self.criteria = self.default_criteria.clone();
        self.sort = SortOrder::default();
        self.rewind();
    }

    /// Resizes the window for the current results and returns to the start.
    fn rewind(&mut self) {
        let count = self.result_count();
        self.pager.set_total(count);
        self.pager.reset();
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Every item passing the filters, in the selected order.
    pub fn results(&self) -> Vec<&T> {
        let mut results = filter::filter(self.catalog.items(), &self.criteria);
        self.sort.apply(&mut results);
        results
    }

    pub fn result_count(&self) -> usize {
        filter::filter(self.catalog.items(), &self.criteria).len()
    }

    /// The results currently on screen.
    pub fn page(&self) -> Vec<&T> {
        let results = self.results();
        self.pager.visible(&results).into_iter().copied().collect()
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn go_to_page(&mut self, index: usize) -> bool {
        self.pager.go_to(index)
    }

    /// Distinct categories of the mounted catalog, for the dropdown.
    pub fn categories(&self) -> Vec<String> {
        filter::categories(self.catalog.items())
    }

    /// Looks up a mounted item by key, ignoring filters.
    pub fn find(&self, key: &str) -> Option<&T> {
        self.catalog.get(key).ok()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn items(&self) -> &[T] {
        self.catalog.items()
    }

    /// `None` until a source load succeeds (`from_items` views stay `None`).
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}
