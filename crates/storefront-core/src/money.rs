//! # Money Module
//!
//! Provides the `Money` type for catalog prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICE FILTERS COMPARE EXACT VALUES                                     │
//! │                                                                         │
//! │  The store page filters on an inclusive price range:                    │
//! │    min ≤ price ≤ max                                                    │
//! │                                                                         │
//! │  With floats, a price of 3000 parsed from "3000.0000001" misses the    │
//! │  upper bound of 3000. With integer minor units it never does.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storefront lists prices in whole rupees, so the default [`Currency`]
//! has zero decimal places and `Money::from_minor(2500)` renders as
//! `₹ 2,500`.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::{Currency, Money};
//!
//! let price = Money::from_minor(2500);
//! let original = Money::from_minor(3500);
//!
//! assert_eq!(price.to_string(), "₹ 2,500");
//! assert_eq!(price.discount_percent(original), Some(29));
//!
//! let usd = Currency::new("$", 2);
//! assert_eq!(Money::from_minor(123456).format(&usd), "$ 1,234.56");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit the catalog uses.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences (original - price) stay representable
/// - **Single field tuple struct**: serializes as a bare number, so catalog
///   JSON reads `"price": 2500`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Largest representable amount. Used as the open upper bound of
    /// price ranges.
    #[inline]
    pub const fn max_value() -> Self {
        Money(i64::MAX)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Percentage saved relative to `original`, rounded half to even.
    ///
    /// Returns `None` when there is no saving to show: the original price is
    /// not positive, or it is not higher than this price.
    ///
    /// ## Bankers Rounding
    /// ```text
    /// 2500 vs 3500 → 28.57% → 29
    /// 3800 vs 5200 → 26.92% → 27
    /// 1500 vs 2000 → 25.00% → 25
    /// 1750 vs 2000 → 12.50% → 12   (half rounds to even)
    /// ```
    pub fn discount_percent(&self, original: Money) -> Option<u32> {
        if original.0 <= 0 || self.0 >= original.0 {
            return None;
        }

        // i128 keeps (saving * 100) from overflowing on large amounts
        let numerator = (original.0 as i128 - self.0 as i128) * 100;
        let denominator = original.0 as i128;

        let mut quotient = numerator / denominator;
        let twice_remainder = (numerator % denominator) * 2;

        if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
            quotient += 1;
        }

        Some(quotient as u32)
    }

    /// Formats the amount with the currency's symbol and digit grouping.
    pub fn format(&self, currency: &Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        // past 10^19 every u64 amount is all fraction
        let (major, minor) = match 10u64.checked_pow(currency.decimals as u32) {
            Some(scale) => (abs / scale, abs % scale),
            None => (0, abs),
        };
        let major = group_thousands(major);

        if currency.decimals == 0 {
            format!("{}{} {}", sign, currency.symbol, major)
        } else {
            format!(
                "{}{} {}.{:0width$}",
                sign,
                currency.symbol,
                major,
                minor,
                width = currency.decimals as usize
            )
        }
    }
}

/// Inserts `,` between groups of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Currency
// =============================================================================

/// Display settings for a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Symbol shown before the amount (e.g., "₹").
    pub symbol: String,

    /// Number of minor-unit digits (0 for whole rupees, 2 for cents).
    pub decimals: u8,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Currency {
            symbol: symbol.into(),
            decimals,
        }
    }
}

impl Default for Currency {
    /// Indian rupees in whole units, as the storefront prices its catalog.
    fn default() -> Self {
        Currency::new("₹", 0)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default storefront currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&Currency::default()))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
