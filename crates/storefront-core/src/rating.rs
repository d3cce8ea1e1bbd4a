//! # Star Ratings
//!
//! Turns a fractional review score (e.g. 4.8) into the row of stars the
//! product cards render.
//!
//! Ratings round to the nearest half star:
//!
//! ```text
//! 4.8 → ★★★★★    4.7 → ★★★★½    4.2 → ★★★★☆    0.2 → ☆☆☆☆☆
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MAX_STARS;

/// Fill state of one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Star row for `rating` out of `max_stars`.
///
/// Ratings outside `[0, max_stars]` are clamped; NaN renders all empty.
pub fn stars(rating: f32, max_stars: usize) -> Vec<StarFill> {
    let rating = if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, max_stars as f32)
    };

    let halves = (rating * 2.0).round() as usize;
    let full = halves / 2;
    let half = halves % 2;

    (0..max_stars)
        .map(|i| {
            if i < full {
                StarFill::Full
            } else if i == full && half == 1 {
                StarFill::Half
            } else {
                StarFill::Empty
            }
        })
        .collect()
}

/// Five-star row, as shown on product cards.
pub fn five_stars(rating: f32) -> Vec<StarFill> {
    stars(rating, MAX_STARS)
}
