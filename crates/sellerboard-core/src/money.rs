//! # Money Module
//!
//! Rounding of report amounts, and the `Money` type used to display them.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ACCUMULATION (f64, unrounded)          PROJECTION (f64, 2 decimals)    │
//! │                                                                         │
//! │  revenue += total_amount      ──┐                                       │
//! │  profit  += item_profit       ──┼──► round2 ──► report row              │
//! │  bonus    = strategy(...)     ──┘                 │                     │
//! │                                                   ▼                     │
//! │                                   format_amount ──► "$1234.56"          │
//! │                                                                         │
//! │  Rounding is done ONCE, at the very end, never while summing.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Half Away From Zero, On The Decimal Literal
//! `10.005_f64` is stored as `10.00499999...`. Rounding the binary value would
//! give `10.00`; a reader of the dataset expects `10.01`. `round2` rounds
//! the shortest decimal form of the float (the same digits `Display` prints),
//! so the result matches what a person would compute by hand.
//!
//! ```rust
//! use sellerboard_core::money::{format_amount, round2, Money};
//!
//! assert_eq!(round2(10.005), 10.01);
//! assert_eq!(round2(1e17), 1e17);
//!
//! let profit = Money::try_from_amount(10.005).unwrap();
//! assert_eq!(profit.cents(), 1001);
//! assert_eq!(profit.to_string(), "$10.01");
//! assert_eq!(format_amount(-5.5), "-$5.50");
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Rounding
// =============================================================================

/// Shortest decimal form of `amount`, rounded to cents.
///
/// `None` for non-finite values and for magnitudes a `Decimal` cannot hold.
fn round_to_cents(amount: f64) -> Option<Decimal> {
    if !amount.is_finite() {
        return None;
    }
    Decimal::from_str(&amount.to_string())
        .ok()
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Rounds a float to two decimal places, half away from zero.
///
/// Never clamps: amounts beyond the `Decimal` range are already whole
/// numbers and are rounded on the binary value. Non-finite values are
/// returned unchanged.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match round_to_cents(value) {
        Some(rounded) => rounded.to_string().parse().unwrap_or(value),
        None => (value * 100.0).round() / 100.0,
    }
}

/// Formats an amount as `$1234.56` / `-$5.50`, at any magnitude.
pub fn format_amount(value: f64) -> String {
    match Money::try_from_amount(value) {
        Some(money) => money.to_string(),
        None => {
            let rounded = round2(value);
            let sign = if rounded < 0.0 { "-" } else { "" };
            format!("{sign}${:.2}", rounded.abs())
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit can be negative when goods sell below cost
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a float amount to cents, half away from zero.
    ///
    /// `None` when the amount is non-finite or its cents do not fit `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use sellerboard_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_amount(4.5).map(|m| m.cents()), Some(450));
    /// assert_eq!(Money::try_from_amount(-0.125).map(|m| m.cents()), Some(-13));
    /// assert_eq!(Money::try_from_amount(1e17), None);
    /// ```
    pub fn try_from_amount(amount: f64) -> Option<Self> {
        round_to_cents(amount)?
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a float with at most two decimal digits.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Display
// =============================================================================

/// Renders `$1234.56`, or `-$5.50` for losses.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
