//! # Carousel
//!
//! A [`Pager`] over a fixed listing, plus the auto-advance timer the hero
//! banner uses.
//!
//! ## Timer Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Auto-Advance Timer                                 │
//! │                                                                         │
//! │  set_auto_advance(true)                                                │
//! │     │  epoch += 1 (under lock)                                          │
//! │     ▼                                                                   │
//! │  spawn ──► loop { select! {                                            │
//! │               tick      ──► lock ─► epoch current && enabled?          │
//! │                                       yes ─► pager.next(), emit         │
//! │                                       no  ─► exit                       │
//! │               shutdown  ──► exit                                        │
//! │             } }                                                         │
//! │                                                                         │
//! │  set_auto_advance(false) / Drop                                        │
//! │     │  epoch += 1 (under lock), send shutdown, abort task              │
//! │     ▼                                                                   │
//! │  no tick can advance the pager after this returns                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Manual navigation shares the same lock as the timer, so a tick and a
//! click never interleave inside one transition. `go_to` does not restart
//! the timer's cadence.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use storefront_core::pager::Pager;

use crate::config::CarouselSettings;
use crate::error::{ViewError, ViewResult};
use crate::events::{NoOpEmitter, ViewEventEmitter};

// =============================================================================
// Shared State
// =============================================================================

#[derive(Debug)]
struct CarouselState {
    pager: Pager,
    /// Bumped whenever a timer starts or stops; a tick from an older epoch
    /// exits without touching the pager.
    timer_epoch: u64,
}

fn lock(state: &Mutex<CarouselState>) -> MutexGuard<'_, CarouselState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a running auto-advance task.
struct TimerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

// =============================================================================
// Carousel
// =============================================================================

/// Windowed view over a listing with optional auto-advance.
pub struct Carousel<T> {
    name: String,
    items: Vec<T>,
    state: Arc<Mutex<CarouselState>>,
    interval: Duration,
    emitter: Arc<dyn ViewEventEmitter>,
    timer: Option<TimerHandle>,
}

impl<T> Carousel<T> {
    /// Creates a carousel with a no-op emitter.
    pub fn new(name: impl Into<String>, items: Vec<T>, settings: &CarouselSettings) -> ViewResult<Self> {
        Self::with_emitter(name, items, settings, Arc::new(NoOpEmitter))
    }

    /// Creates a carousel that reports timer-driven moves to `emitter`.
    ///
    /// If `settings.auto_advance` is set the timer starts immediately, which
    /// requires a tokio runtime.
    pub fn with_emitter(
        name: impl Into<String>,
        items: Vec<T>,
        settings: &CarouselSettings,
        emitter: Arc<dyn ViewEventEmitter>,
    ) -> ViewResult<Self> {
        let pager = Pager::new(settings.mode, settings.window_size, items.len())?;

        let mut carousel = Carousel {
            name: name.into(),
            items,
            state: Arc::new(Mutex::new(CarouselState {
                pager,
                timer_epoch: 0,
            })),
            interval: settings.interval(),
            emitter,
            timer: None,
        };

        if settings.auto_advance {
            carousel.set_auto_advance(true)?;
        }

        Ok(carousel)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Moves forward one position. Returns false if nothing changed.
    pub fn next(&self) -> bool {
        lock(&self.state).pager.next()
    }

    /// Moves back one position. Returns false if nothing changed.
    pub fn prev(&self) -> bool {
        lock(&self.state).pager.prev()
    }

    /// Jumps to a position (dot navigation), clamped to the valid range.
    pub fn go_to(&self, index: usize) -> bool {
        lock(&self.state).pager.go_to(index)
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> usize {
        lock(&self.state).pager.offset()
    }

    /// Copy of the pager as it is right now.
    pub fn pager(&self) -> Pager {
        lock(&self.state).pager.clone()
    }

    /// Items in the current window, in display order.
    pub fn visible(&self) -> Vec<&T> {
        lock(&self.state).pager.visible(&self.items)
    }

    /// "2 / 6" style label.
    pub fn position_label(&self) -> String {
        lock(&self.state).pager.position_label()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.timer.is_some()
    }

    /// Swaps the listing. The offset is clamped to the new positions.
    pub fn replace_items(&mut self, items: Vec<T>) {
        lock(&self.state).pager.set_total(items.len());
        self.items = items;
    }

    // =========================================================================
    // Auto-Advance
    // =========================================================================

    /// Starts or stops the auto-advance timer.
    ///
    /// Starting requires a tokio runtime; starting an already running timer
    /// is a no-op. Once this returns with `false`, no further tick advances
    /// the pager.
    pub fn set_auto_advance(&mut self, enabled: bool) -> ViewResult<()> {
        if enabled {
            self.start_timer()
        } else {
            self.stop_timer();
            Ok(())
        }
    }

    /// Play/pause button. Returns the new auto-advance state.
    pub fn toggle_auto_advance(&mut self) -> ViewResult<bool> {
        let enabled = !self.is_auto_advancing();
        self.set_auto_advance(enabled)?;
        Ok(enabled)
    }

    fn start_timer(&mut self) -> ViewResult<()> {
        if self.timer.is_some() {
            return Ok(());
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ViewError::NoRuntime)?;

        let epoch = {
            let mut state = lock(&self.state);
            state.pager.set_auto_advance(true);
            state.timer_epoch += 1;
            state.timer_epoch
        };

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let task = runtime.spawn(run_timer(
            self.name.clone(),
            self.state.clone(),
            self.emitter.clone(),
            epoch,
            self.interval,
            shutdown_rx,
        ));

        info!(
            carousel = %self.name,
            interval_ms = self.interval.as_millis() as u64,
            "Auto-advance started"
        );

        self.timer = Some(TimerHandle { shutdown_tx, task });
        Ok(())
    }

    fn stop_timer(&mut self) {
        {
            let mut state = lock(&self.state);
            state.pager.set_auto_advance(false);
            state.timer_epoch += 1;
        }

        if let Some(timer) = self.timer.take() {
            let _ = timer.shutdown_tx.try_send(());
            timer.task.abort();
            info!(carousel = %self.name, "Auto-advance stopped");
        }
    }
}

impl<T> Drop for Carousel<T> {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

// =============================================================================
// Timer Task
// =============================================================================

async fn run_timer(
    name: String,
    state: Arc<Mutex<CarouselState>>,
    emitter: Arc<dyn ViewEventEmitter>,
    epoch: u64,
    period: Duration,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if !advance_on_tick(&name, &state, emitter.as_ref(), epoch) {
                    break;
                }
            }
            _ = shutdown_rx.recv() => {
                break;
            }
        }
    }

    debug!(carousel = %name, epoch, "Auto-advance task exited");
}

/// One timer tick. Returns false when the timer has been superseded.
fn advance_on_tick(
    name: &str,
    state: &Mutex<CarouselState>,
    emitter: &dyn ViewEventEmitter,
    epoch: u64,
) -> bool {
    let mut state = lock(state);

    if state.timer_epoch != epoch || !state.pager.auto_advance() {
        return false;
    }

    if state.pager.next() {
        debug!(carousel = %name, offset = state.pager.offset(), "Auto-advanced");
        emitter.emit_slide_changed(name, state.pager.offset());
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChannelEmitter, ViewEvent};
    use tokio::time::sleep;

    fn slides(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    fn manual_banner() -> CarouselSettings {
        CarouselSettings {
            auto_advance: false,
            ..CarouselSettings::banner()
        }
    }

    #[test]
    fn test_grid_navigation_nine_items() {
        let carousel = Carousel::new("top-products", slides(9), &CarouselSettings::grid()).unwrap();

        let mut seen = vec![carousel.offset()];
        for _ in 0..6 {
            carousel.next();
            seen.push(carousel.offset());
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 0]);

        carousel.prev();
        assert_eq!(carousel.offset(), 5);
        assert_eq!(carousel.visible(), vec![&5, &6, &7, &8]);
        assert_eq!(carousel.position_label(), "6 / 6");
    }

    #[test]
    fn test_auto_advance_needs_runtime() {
        let result = Carousel::new("banner", slides(3), &CarouselSettings::banner());
        assert!(matches!(result, Err(ViewError::NoRuntime)));
    }

    #[test]
    fn test_zero_window_rejected() {
        let settings = CarouselSettings {
            window_size: 0,
            ..CarouselSettings::grid()
        };
        assert!(Carousel::new("grid", slides(3), &settings).is_err());
    }

    #[test]
    fn test_replace_items_clamps_offset() {
        let mut carousel = Carousel::new("grid", slides(9), &CarouselSettings::grid()).unwrap();
        carousel.go_to(5);

        carousel.replace_items(slides(6));
        assert_eq!(carousel.offset(), 2);
        assert_eq!(carousel.visible(), vec![&2, &3, &4, &5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advance_wraps() {
        let (emitter, mut rx) = ChannelEmitter::new();
        let carousel =
            Carousel::with_emitter("banner", slides(3), &CarouselSettings::banner(), Arc::new(emitter))
                .unwrap();
        assert!(carousel.is_auto_advancing());

        sleep(Duration::from_millis(4990)).await;
        assert_eq!(carousel.offset(), 0);

        sleep(Duration::from_millis(20)).await;
        assert_eq!(carousel.offset(), 1);
        assert_eq!(
            rx.recv().await.unwrap(),
            ViewEvent::SlideChanged {
                carousel: "banner".into(),
                offset: 1
            }
        );

        sleep(Duration::from_secs(10)).await;
        assert_eq!(carousel.offset(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disable_stops_ticks() {
        let (emitter, mut rx) = ChannelEmitter::new();
        let mut carousel =
            Carousel::with_emitter("banner", slides(3), &CarouselSettings::banner(), Arc::new(emitter))
                .unwrap();

        sleep(Duration::from_millis(5010)).await;
        assert_eq!(carousel.offset(), 1);
        assert!(rx.recv().await.is_some());

        carousel.set_auto_advance(false).unwrap();
        assert!(!carousel.pager().auto_advance());

        sleep(Duration::from_secs(30)).await;
        assert_eq!(carousel.offset(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_to_keeps_cadence() {
        let mut carousel = Carousel::new("banner", slides(5), &manual_banner()).unwrap();
        carousel.set_auto_advance(true).unwrap();

        sleep(Duration::from_millis(3000)).await;
        carousel.go_to(2);

        sleep(Duration::from_millis(2010)).await;
        assert_eq!(carousel.offset(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_play_pause() {
        let mut carousel = Carousel::new("banner", slides(4), &manual_banner()).unwrap();

        assert!(carousel.toggle_auto_advance().unwrap());
        sleep(Duration::from_millis(5010)).await;
        assert_eq!(carousel.offset(), 1);

        assert!(!carousel.toggle_auto_advance().unwrap());
        sleep(Duration::from_secs(20)).await;
        assert_eq!(carousel.offset(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_timer() {
        let (emitter, mut rx) = ChannelEmitter::new();
        let carousel =
            Carousel::with_emitter("banner", slides(3), &CarouselSettings::banner(), Arc::new(emitter))
                .unwrap();
        drop(carousel);

        sleep(Duration::from_secs(30)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_banner_ticks_are_noops() {
        let carousel = Carousel::new("banner", Vec::<usize>::new(), &CarouselSettings::banner()).unwrap();

        sleep(Duration::from_secs(12)).await;
        assert_eq!(carousel.offset(), 0);
        assert!(carousel.visible().is_empty());
        assert_eq!(carousel.position_label(), "0 / 0");
    }
}
