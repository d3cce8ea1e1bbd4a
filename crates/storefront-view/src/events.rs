//! # View Events
//!
//! Notifications the view layer pushes to the rendering layer.
//!
//! ```text
//! ┌──────────────┐  emit_slide_changed     ┌──────────────────────┐
//! │ Carousel     │ ──────────────────────► │                      │
//! │ (timer task) │                         │  ViewEventEmitter    │
//! └──────────────┘                         │  (rendering layer)   │
//! ┌──────────────┐  emit_detail_loading    │                      │
//! │ DetailLoader │ ──────────────────────► │  re-render, scroll   │
//! │              │  emit_detail_ready      │  to top              │
//! │              │  emit_scroll_to_top     │                      │
//! └──────────────┘                         └──────────────────────┘
//! ```
//!
//! Emitters are called while view state is locked, so implementations must
//! not block.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::loader::DetailOrigin;

// =============================================================================
// Event Emitter Trait
// =============================================================================

/// Trait for emitting view events (implemented by the rendering layer).
pub trait ViewEventEmitter: Send + Sync {
    /// A carousel moved to a new offset on its own (auto-advance).
    fn emit_slide_changed(&self, carousel: &str, offset: usize);

    /// A detail fetch started for `key`.
    fn emit_detail_loading(&self, key: &str);

    /// A detail view is ready to render.
    fn emit_detail_ready(&self, key: &str, origin: DetailOrigin);

    /// The page should scroll back to the top.
    fn emit_scroll_to_top(&self);
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl ViewEventEmitter for NoOpEmitter {
    fn emit_slide_changed(&self, _carousel: &str, _offset: usize) {}
    fn emit_detail_loading(&self, _key: &str) {}
    fn emit_detail_ready(&self, _key: &str, _origin: DetailOrigin) {}
    fn emit_scroll_to_top(&self) {}
}

// =============================================================================
// Channel Emitter
// =============================================================================

/// Owned form of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    SlideChanged { carousel: String, offset: usize },
    DetailLoading { key: String },
    DetailReady { key: String, origin: DetailOrigin },
    ScrollToTop,
}

/// Emitter that forwards every event into an unbounded channel.
///
/// Sends never block; events emitted after the receiver is dropped are
/// discarded.
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<ViewEvent>,
}

impl ChannelEmitter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ViewEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelEmitter { tx }, rx)
    }

    fn send(&self, event: ViewEvent) {
        let _ = self.tx.send(event);
    }
}

impl ViewEventEmitter for ChannelEmitter {
    fn emit_slide_changed(&self, carousel: &str, offset: usize) {
        self.send(ViewEvent::SlideChanged {
            carousel: carousel.to_string(),
            offset,
        });
    }

    fn emit_detail_loading(&self, key: &str) {
        self.send(ViewEvent::DetailLoading {
            key: key.to_string(),
        });
    }

    fn emit_detail_ready(&self, key: &str, origin: DetailOrigin) {
        self.send(ViewEvent::DetailReady {
            key: key.to_string(),
            origin,
        });
    }

    fn emit_scroll_to_top(&self) {
        self.send(ViewEvent::ScrollToTop);
    }
}
