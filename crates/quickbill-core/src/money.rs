//! # Money Module
//!
//! Provides the `Money` type used for every bill calculation.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Stored records carry plain JSON numbers:                               │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: compute in minor units (paisa), store as numbers         │
//! │    Money::from_amount(0.1) + Money::from_amount(0.2) = 30 paisa         │
//! │    .amount() = 0.3                                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records keep `f64` fields so they round-trip whatever the store holds.
//! `Money` is the arithmetic layer between those fields.
//!
//! ## Usage
//! ```rust
//! use quickbill_core::money::Money;
//!
//! let rate = Money::from_amount(12.5);
//! let line = rate.times(3.0);
//! assert_eq!(line.minor(), 3750);
//! assert_eq!(line.to_string(), "37.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (1/100 of the currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: a corrected bill can go negative during editing
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Half away from zero**: `from_amount` and `times` round the way a
///   counter clerk would (2.345 → 2.35)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable value. Arithmetic saturates here.
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable value.
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from a stored amount, rounded to two decimals.
    ///
    /// Non-finite amounts become zero. Amounts beyond the i64 range clamp
    /// to [`Money::MAX`] or [`Money::MIN`].
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the value as a number suitable for a stored record.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a (possibly fractional) quantity.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// let per_kg = Money::from_amount(80.0);
    /// assert_eq!(per_kg.times(1.5).minor(), 12000);
    /// ```
    pub fn times(&self, quantity: f64) -> Self {
        if !quantity.is_finite() {
            return Money::zero();
        }
        Money((self.0 as f64 * quantity).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two decimals, no currency symbol. The receipt adds the currency label.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
