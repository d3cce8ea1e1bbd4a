//! # Detail Loader
//!
//! Opens the detail view for a listing entry: fetches the full record by
//! slug and falls back to the summary the listing already had.
//!
//! ## Selection Flow
//! ```text
//! select(summary)
//!    │  generation += 1
//!    ▼
//! cache hit? ──yes──────────────────────────────┐
//!    │ no                                       │
//!    ▼                                          │
//! state = Loading { key }                       │
//!    │                                          │
//!    ▼                                          │
//! fetch_post_by_slug(key)                       │
//!    ├─ Ok(Some(full)) ──► Fetched (cached)     │
//!    ├─ Ok(None)       ──► Fallback(summary)    │
//!    └─ Err(_)         ──► Fallback(summary)    │
//!    │                                          │
//!    ▼                                          ▼
//! generation still ours? ── no ──► Selection::Superseded
//!    │ yes
//!    ▼
//! state = Ready(detail), emit DetailReady + ScrollToTop
//! ```
//!
//! The newest `select` always wins, whatever order the fetches resolve in.
//! Fetch failures are logged and never reach the caller.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use storefront_core::types::Item;

use crate::config::DetailSettings;
use crate::events::{NoOpEmitter, ViewEventEmitter};
use crate::source::PostSource;

// =============================================================================
// Detail Types
// =============================================================================

/// Where a detail record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailOrigin {
    /// Full record from the source.
    Fetched,
    /// Full record from an earlier fetch.
    Cached,
    /// The listing summary, shown because the fetch failed or found nothing.
    Fallback,
}

/// A record ready for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail<T> {
    pub record: T,
    pub origin: DetailOrigin,
}

/// What the detail pane shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    /// Back on the listing.
    Idle,
    /// Waiting for `key`.
    Loading { key: String },
    /// Showing a record.
    Ready(Detail<T>),
}

impl<T> DetailState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading { .. })
    }
}

/// Outcome of one `select` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    /// This request's record is now displayed.
    Applied(Detail<T>),
    /// A newer request (or `clear`) arrived first; nothing was displayed.
    Superseded,
}

// =============================================================================
// Detail Loader
// =============================================================================

/// Last-request-wins detail fetcher.
///
/// Share it behind an `Arc` when selections come from several tasks.
pub struct DetailLoader<T> {
    source: Arc<dyn PostSource<T>>,
    generation: AtomicU64,
    state: RwLock<DetailState<T>>,
    cache: Option<RwLock<HashMap<String, T>>>,
    emitter: Arc<dyn ViewEventEmitter>,
}

impl<T> DetailLoader<T>
where
    T: Item + Clone + Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn PostSource<T>>, settings: &DetailSettings) -> Self {
        Self::with_emitter(source, settings, Arc::new(NoOpEmitter))
    }

    pub fn with_emitter(
        source: Arc<dyn PostSource<T>>,
        settings: &DetailSettings,
        emitter: Arc<dyn ViewEventEmitter>,
    ) -> Self {
        DetailLoader {
            source,
            generation: AtomicU64::new(0),
            state: RwLock::new(DetailState::Idle),
            cache: settings.cache_enabled.then(|| RwLock::new(HashMap::new())),
            emitter,
        }
    }

    /// Current detail state.
    pub async fn state(&self) -> DetailState<T> {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading()
    }

    /// Opens the detail view for `summary`.
    pub async fn select(&self, summary: T) -> Selection<T> {
        let key = summary.key().into_owned();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(record) = self.cached(&key).await {
            debug!(key = %key, generation, "Detail served from cache");
            let detail = Detail {
                record,
                origin: DetailOrigin::Cached,
            };
            return self.resolve(generation, &key, detail).await;
        }

        if !self.begin_loading(generation, &key).await {
            return Selection::Superseded;
        }

        let detail = self.fetch_or_fallback(&key, summary).await;
        self.resolve(generation, &key, detail).await
    }

    /// Back to the listing. In-flight selections resolve as superseded.
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = DetailState::Idle;
        debug!("Detail cleared");
    }

    /// Number of cached full records.
    pub async fn cached_len(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.read().await.len(),
            None => 0,
        }
    }

    /// Drops every cached record (e.g. after a listing refresh).
    pub async fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().await.clear();
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn cached(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        cache.read().await.get(key).cloned()
    }

    async fn begin_loading(&self, generation: u64, key: &str) -> bool {
        let mut state = self.state.write().await;
        if !self.is_current(generation) {
            return false;
        }

        *state = DetailState::Loading {
            key: key.to_string(),
        };
        self.emitter.emit_detail_loading(key);
        true
    }

    async fn fetch_or_fallback(&self, key: &str, summary: T) -> Detail<T> {
        let fallback = Detail {
            record: summary,
            origin: DetailOrigin::Fallback,
        };

        if key.trim().is_empty() {
            warn!("Empty slug, showing summary");
            return fallback;
        }

        match self.source.fetch_post_by_slug(key).await {
            Ok(Some(record)) => {
                if let Some(cache) = &self.cache {
                    cache.write().await.insert(key.to_string(), record.clone());
                }
                Detail {
                    record,
                    origin: DetailOrigin::Fetched,
                }
            }
            Ok(None) => {
                warn!(key = %key, "Post not found, showing summary");
                fallback
            }
            Err(e) => {
                warn!(
                    key = %key,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Failed to fetch post, showing summary"
                );
                fallback
            }
        }
    }

    async fn resolve(&self, generation: u64, key: &str, detail: Detail<T>) -> Selection<T> {
        let mut state = self.state.write().await;
        if !self.is_current(generation) {
            debug!(key = %key, generation, "Discarding stale detail");
            return Selection::Superseded;
        }

        *state = DetailState::Ready(detail.clone());
        self.emitter.emit_detail_ready(key, detail.origin);
        self.emitter.emit_scroll_to_top();

        Selection::Applied(detail)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::events::{ChannelEmitter, ViewEvent};
    use crate::source::StaticSource;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use storefront_core::types::BlogPost;

    type Scripted = (Duration, Result<Option<BlogPost>, SourceError>);

    /// Source with a per-slug delay and result.
    #[derive(Default)]
    struct ScriptedSource {
        script: HashMap<String, Scripted>,
        fetches: AtomicUsize,
    }

    impl ScriptedSource {
        fn respond(mut self, slug: &str, delay_ms: u64, result: Result<Option<BlogPost>, SourceError>) -> Self {
            self.script
                .insert(slug.to_string(), (Duration::from_millis(delay_ms), result));
            self
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostSource<BlogPost> for ScriptedSource {
        async fn fetch_posts(&self) -> Result<Vec<BlogPost>, SourceError> {
            Ok(Vec::new())
        }

        async fn fetch_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, SourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            match self.script.get(slug) {
                Some((delay, result)) => {
                    tokio::time::sleep(*delay).await;
                    result.clone()
                }
                None => Ok(None),
            }
        }
    }

    fn summary(id: i64, slug: &str) -> BlogPost {
        BlogPost::summary(id, slug, slug).with_excerpt("summary only")
    }

    fn full(id: i64, slug: &str) -> BlogPost {
        summary(id, slug).with_content("<p>full article</p>")
    }

    fn new_loader(source: Arc<ScriptedSource>) -> DetailLoader<BlogPost> {
        DetailLoader::new(source, &DetailSettings::default())
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let source = Arc::new(ScriptedSource::default().respond("a", 0, Ok(Some(full(1, "a")))));
        let (emitter, mut rx) = ChannelEmitter::new();
        let loader: DetailLoader<BlogPost> =
            DetailLoader::with_emitter(source, &DetailSettings::default(), Arc::new(emitter));

        let selection = loader.select(summary(1, "a")).await;
        let Selection::Applied(detail) = selection else {
            panic!("expected applied selection");
        };
        assert_eq!(detail.origin, DetailOrigin::Fetched);
        assert!(detail.record.has_content());
        assert!(matches!(loader.state().await, DetailState::Ready(_)));

        assert_eq!(rx.try_recv().unwrap(), ViewEvent::DetailLoading { key: "a".into() });
        assert_eq!(
            rx.try_recv().unwrap(),
            ViewEvent::DetailReady {
                key: "a".into(),
                origin: DetailOrigin::Fetched
            }
        );
        assert_eq!(rx.try_recv().unwrap(), ViewEvent::ScrollToTop);
    }

    #[tokio::test]
    async fn test_transport_error_falls_back_to_summary() {
        let source = Arc::new(ScriptedSource::default().respond(
            "a",
            0,
            Err(SourceError::Transport("connection reset".into())),
        ));
        let (emitter, mut rx) = ChannelEmitter::new();
        let loader: DetailLoader<BlogPost> =
            DetailLoader::with_emitter(source, &DetailSettings::default(), Arc::new(emitter));

        let selection = loader.select(summary(1, "a")).await;
        assert_eq!(
            selection,
            Selection::Applied(Detail {
                record: summary(1, "a"),
                origin: DetailOrigin::Fallback,
            })
        );

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(events.last(), Some(&ViewEvent::ScrollToTop));
    }

    #[tokio::test]
    async fn test_not_found_falls_back_and_is_not_cached() {
        let source = Arc::new(ScriptedSource::default());
        let loader = new_loader(source.clone());

        for _ in 0..2 {
            let selection = loader.select(summary(1, "missing")).await;
            assert!(matches!(
                selection,
                Selection::Applied(Detail {
                    origin: DetailOrigin::Fallback,
                    ..
                })
            ));
        }

        assert_eq!(source.fetches(), 2);
        assert_eq!(loader.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_any_non_empty_slug_is_fetched() {
        let source = Arc::new(StaticSource::new(Vec::new()).with_detail(full(1, "my_post")));
        let loader: DetailLoader<BlogPost> = DetailLoader::new(source, &DetailSettings::default());

        let Selection::Applied(detail) = loader.select(summary(1, "my_post")).await else {
            panic!("expected applied selection");
        };
        assert_eq!(detail.origin, DetailOrigin::Fetched);
        assert!(detail.record.has_content());
    }

    #[tokio::test]
    async fn test_mixed_case_slug_reaches_source() {
        let source = Arc::new(ScriptedSource::default().respond("Post-1", 0, Ok(Some(full(1, "Post-1")))));
        let loader = new_loader(source.clone());

        let selection = loader.select(summary(1, "Post-1")).await;
        assert!(matches!(
            selection,
            Selection::Applied(Detail {
                origin: DetailOrigin::Fetched,
                ..
            })
        ));
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn test_empty_slug_skips_fetch() {
        let source = Arc::new(ScriptedSource::default());
        let loader = new_loader(source.clone());

        let selection = loader.select(summary(1, "")).await;
        assert!(matches!(
            selection,
            Selection::Applied(Detail {
                origin: DetailOrigin::Fallback,
                ..
            })
        ));
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_selection_wins_when_earlier_resolves_last() {
        let source = Arc::new(
            ScriptedSource::default()
                .respond("a", 100, Ok(Some(full(1, "a"))))
                .respond("b", 10, Ok(Some(full(2, "b")))),
        );
        let loader = new_loader(source);

        let (first, second) = tokio::join!(loader.select(summary(1, "a")), async {
            tokio::task::yield_now().await;
            loader.select(summary(2, "b")).await
        });

        assert_eq!(first, Selection::Superseded);
        assert!(matches!(second, Selection::Applied(_)));
        match loader.state().await {
            DetailState::Ready(detail) => assert_eq!(detail.record.slug, "b"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_selection_wins_when_earlier_resolves_first() {
        let source = Arc::new(
            ScriptedSource::default()
                .respond("a", 10, Ok(Some(full(1, "a"))))
                .respond("b", 100, Ok(Some(full(2, "b")))),
        );
        let loader = new_loader(source);

        let (first, second) = tokio::join!(loader.select(summary(1, "a")), async {
            tokio::task::yield_now().await;
            loader.select(summary(2, "b")).await
        });

        assert_eq!(first, Selection::Superseded);
        assert!(matches!(second, Selection::Applied(_)));
        match loader.state().await {
            DetailState::Ready(detail) => assert_eq!(detail.record.slug, "b"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_state_while_pending() {
        let source = Arc::new(ScriptedSource::default().respond("a", 50, Ok(Some(full(1, "a")))));
        let loader = new_loader(source);

        let (selection, was_loading) = tokio::join!(loader.select(summary(1, "a")), async {
            tokio::task::yield_now().await;
            loader.is_loading().await
        });

        assert!(was_loading);
        assert!(matches!(selection, Selection::Applied(_)));
        assert!(!loader.is_loading().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_supersedes_in_flight() {
        let source = Arc::new(ScriptedSource::default().respond("a", 50, Ok(Some(full(1, "a")))));
        let loader = new_loader(source);

        let (selection, ()) = tokio::join!(loader.select(summary(1, "a")), async {
            tokio::task::yield_now().await;
            loader.clear().await
        });

        assert_eq!(selection, Selection::Superseded);
        assert_eq!(loader.state().await, DetailState::Idle);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_fetch() {
        let source = Arc::new(ScriptedSource::default().respond("a", 0, Ok(Some(full(1, "a")))));
        let loader = new_loader(source.clone());

        loader.select(summary(1, "a")).await;
        loader.clear().await;
        let selection = loader.select(summary(1, "a")).await;

        let Selection::Applied(detail) = selection else {
            panic!("expected applied selection");
        };
        assert_eq!(detail.origin, DetailOrigin::Cached);
        assert!(detail.record.has_content());
        assert_eq!(source.fetches(), 1);

        loader.invalidate_cache().await;
        assert_eq!(loader.cached_len().await, 0);
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let source = Arc::new(ScriptedSource::default().respond("a", 0, Ok(Some(full(1, "a")))));
        let settings = DetailSettings {
            cache_enabled: false,
        };
        let loader: DetailLoader<BlogPost> = DetailLoader::new(source.clone(), &settings);

        loader.select(summary(1, "a")).await;
        loader.select(summary(1, "a")).await;
        assert_eq!(source.fetches(), 2);
    }
}
