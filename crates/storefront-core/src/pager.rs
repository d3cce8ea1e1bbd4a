//! # Pager
//!
//! Window arithmetic shared by the banner carousel and the product grids.
//!
//! ## Window Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Window Modes                                    │
//! │                                                                         │
//! │  WRAP (banner)                       SLIDE WINDOW (product grids)       │
//! │  ─────────────                       ────────────────────────────       │
//! │  positions = total (1 if it fits)    positions = max(1, total-window+1) │
//! │  window    = 1 slide                 window    = 4 cards                │
//! │                                                                         │
//! │  [0] 1  2  3   next → 1              [0  1  2  3] 4  5  6  7  8         │
//! │   0 [1] 2  3   next → 2               0 [1  2  3  4] 5  6  7  8         │
//! │   0  1  2 [3]  next → 0 (wraps)       ...                               │
//! │                                       0  1  2  3  4 [5  6  7  8]        │
//! │                                      next → back to offset 0            │
//! │                                                                         │
//! │  next: (offset + 1) mod positions                                       │
//! │  prev: (offset - 1 + positions) mod positions                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `offset < positions()` at all times, and `offset == 0` whenever the
//! collection fits in one window. `positions()` is never zero, so the modular
//! arithmetic never divides by zero even for an empty collection.
//!
//! ## Example
//! ```rust
//! use storefront_core::pager::{Pager, WindowMode};
//!
//! let mut grid = Pager::new(WindowMode::SlideWindow, 4, 9).unwrap();
//! assert_eq!(grid.positions(), 6);
//!
//! grid.next();
//! assert_eq!(grid.offset(), 1);
//! assert_eq!(grid.visible_indices(), vec![1, 2, 3, 4]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreResult, ValidationError};
use crate::validation::validate_window_size;

// =============================================================================
// Window Mode
// =============================================================================

/// How a pager moves past the end of its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Every item is a start position; the window wraps around the end.
    #[default]
    Wrap,

    /// Only offsets that show a full window are start positions.
    SlideWindow,
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowMode::Wrap => write!(f, "wrap"),
            WindowMode::SlideWindow => write!(f, "slide_window"),
        }
    }
}

impl FromStr for WindowMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wrap" | "banner" => Ok(WindowMode::Wrap),
            "slide_window" | "slide-window" | "grid" => Ok(WindowMode::SlideWindow),
            _ => Err(ValidationError::NotAllowed {
                field: "mode".to_string(),
                allowed: vec!["wrap".to_string(), "slide_window".to_string()],
            }),
        }
    }
}

// =============================================================================
// Pager
// =============================================================================

/// Offset into an ordered collection plus the window shown at that offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    mode: WindowMode,
    offset: usize,
    window_size: usize,
    total: usize,
    auto_advance: bool,
}

impl Pager {
    /// Creates a pager at offset 0.
    ///
    /// Fails only for a zero window size.
    pub fn new(mode: WindowMode, window_size: usize, total: usize) -> CoreResult<Self> {
        validate_window_size(window_size)?;

        Ok(Pager {
            mode,
            offset: 0,
            window_size,
            total,
            auto_advance: false,
        })
    }

    /// Single-slide wrapping pager, as used by the hero banner.
    pub fn banner(total: usize) -> Self {
        Pager {
            mode: WindowMode::Wrap,
            offset: 0,
            window_size: 1,
            total,
            auto_advance: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct offsets the pager can take. Never zero.
    pub fn positions(&self) -> usize {
        match self.mode {
            WindowMode::Wrap if self.total <= self.window_size => 1,
            WindowMode::Wrap => self.total,
            WindowMode::SlideWindow => self.total.saturating_sub(self.window_size) + 1,
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Advances one position, wrapping to 0 after the last.
    ///
    /// Returns whether the offset changed. No-op on an empty collection.
    pub fn next(&mut self) -> bool {
        if self.total == 0 {
            return false;
        }

        let before = self.offset;
        self.offset = (self.offset + 1) % self.positions();
        self.offset != before
    }

    /// Steps back one position, wrapping to the last after 0.
    pub fn prev(&mut self) -> bool {
        if self.total == 0 {
            return false;
        }

        let before = self.offset;
        let positions = self.positions();
        self.offset = (self.offset + positions - 1) % positions;
        self.offset != before
    }

    /// Jumps to `index`, clamped into `[0, positions)`.
    ///
    /// Returns false when the clamped index equals the current offset.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.total == 0 {
            return false;
        }

        let target = index.min(self.positions() - 1);
        if target == self.offset {
            return false;
        }

        self.offset = target;
        true
    }

    /// Replaces the collection length, clamping the offset back into range.
    ///
    /// Called whenever a filter change shrinks or grows the list.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.offset = self.offset.min(self.positions() - 1);
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
    }

    /// Back to offset 0, keeping mode, window size and total.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    // =========================================================================
    // Window
    // =========================================================================

    /// Indices of the items visible at the current offset.
    ///
    /// Always `min(window_size, total)` indices long. Slide-window pagers
    /// return a contiguous run; wrap pagers continue from index 0 past the
    /// end of the collection.
    pub fn visible_indices(&self) -> Vec<usize> {
        let len = self.window_size.min(self.total);

        match self.mode {
            WindowMode::Wrap => (0..len).map(|i| (self.offset + i) % self.total).collect(),
            WindowMode::SlideWindow => (self.offset..self.offset + len).collect(),
        }
    }

    /// The visible slice of `items`.
    ///
    /// `items` should be the collection this pager was sized for; indices
    /// beyond its length are skipped rather than panicking.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.visible_indices()
            .into_iter()
            .filter_map(|i| items.get(i))
            .collect()
    }

    /// "current / positions", one-based, as shown under the banner.
    pub fn position_label(&self) -> String {
        if self.total == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.offset + 1, self.positions())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
