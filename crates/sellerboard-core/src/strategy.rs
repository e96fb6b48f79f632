//! # Calculation Strategies
//!
//! The two pluggable policies of an analysis.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RevenueStrategy                      BonusStrategy                     │
//! │  ───────────────                      ─────────────                     │
//! │  (line item, product) → revenue       (rank, total, stats) → bonus      │
//! │                                                                         │
//! │  Default: SimpleRevenue               Default: ProfitRankBonus          │
//! │  price × (1 − discount%) × qty        rate by rank × profit             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both traits are implemented for plain closures/functions with the matching
//! signature, so callers can pass either a configured struct or a function:
//!
//! ```rust
//! use sellerboard_core::strategy::{BonusStrategy, SellerStats};
//!
//! let flat = |_rank: usize, _total: usize, stats: &SellerStats| stats.profit * 0.01;
//! let stats = SellerStats { seller_id: "s1".into(), name: "A B".into(), revenue: 0.0, profit: 200.0, sales_count: 1 };
//! assert_eq!(flat.bonus(0, 1, &stats), 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::types::{LineItem, Product};

// =============================================================================
// Seller Stats View
// =============================================================================

/// Unrounded per-seller totals, as seen by a [`BonusStrategy`].
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
    pub seller_id: String,
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub sales_count: u64,
}

// =============================================================================
// Strategy Traits
// =============================================================================

/// Computes the revenue attributable to one line item.
pub trait RevenueStrategy {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64;
}

/// Computes a seller's bonus from their 0-based profit rank.
pub trait BonusStrategy {
    fn bonus(&self, rank: usize, total_sellers: usize, seller: &SellerStats) -> f64;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&LineItem, &Product) -> f64,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        self(item, product)
    }
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerStats) -> f64,
{
    fn bonus(&self, rank: usize, total_sellers: usize, seller: &SellerStats) -> f64 {
        self(rank, total_sellers, seller)
    }
}

// =============================================================================
// Simple Revenue
// =============================================================================

/// Discounted sale price times quantity. Ignores the product record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleRevenue;

impl RevenueStrategy for SimpleRevenue {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        calculate_simple_revenue(item, product)
    }
}

/// `sale_price × (1 − discount / 100) × quantity`.
///
/// ## Example
/// ```rust
/// use sellerboard_core::strategy::calculate_simple_revenue;
/// use sellerboard_core::types::{LineItem, Product};
///
/// let product = Product { sku: "A1".into(), purchase_price: 10.0, name: None, category: None, sale_price: None };
/// let item = LineItem { sku: "A1".into(), sale_price: 20.0, discount: 50.0, quantity: 1 };
/// assert_eq!(calculate_simple_revenue(&item, &product), 10.0);
/// ```
pub fn calculate_simple_revenue(item: &LineItem, _product: &Product) -> f64 {
    let discount_amount = item.sale_price * (item.discount / 100.0);
    let final_price = item.sale_price - discount_amount;
    final_price * item.quantity as f64
}

// =============================================================================
// Profit Rank Bonus
// =============================================================================

/// Bonus rates per rank band.
///
/// ## Rank Bands (first match wins)
/// ```text
/// rank == 0              → top_rate      (0.15)
/// rank == 1 || rank == 2 → podium_rate   (0.10)
/// rank == total − 1      → last_rate     (0.00)
/// otherwise              → default_rate  (0.05)
/// ```
/// With three sellers or fewer the podium band shadows the last band, so
/// the last seller of a two- or three-seller board still gets `podium_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusRates {
    #[serde(default = "default_top_rate")]
    pub top_rate: f64,
    #[serde(default = "default_podium_rate")]
    pub podium_rate: f64,
    #[serde(default = "default_last_rate")]
    pub last_rate: f64,
    #[serde(default = "default_rate")]
    pub default_rate: f64,
}

fn default_top_rate() -> f64 {
    0.15
}
fn default_podium_rate() -> f64 {
    0.10
}
fn default_last_rate() -> f64 {
    0.0
}
fn default_rate() -> f64 {
    0.05
}

impl Default for BonusRates {
    fn default() -> Self {
        BonusRates {
            top_rate: default_top_rate(),
            podium_rate: default_podium_rate(),
            last_rate: default_last_rate(),
            default_rate: default_rate(),
        }
    }
}

impl BonusRates {
    /// Returns the rate for a 0-based rank out of `total_sellers`.
    pub fn rate_for(&self, rank: usize, total_sellers: usize) -> f64 {
        if rank == 0 {
            self.top_rate
        } else if rank == 1 || rank == 2 {
            self.podium_rate
        } else if rank + 1 == total_sellers {
            self.last_rate
        } else {
            self.default_rate
        }
    }

    /// Checks every rate is a finite fraction in `0..=1`.
    pub fn validate(&self) -> CoreResult<()> {
        validate_rate("bonus.top_rate", self.top_rate)?;
        validate_rate("bonus.podium_rate", self.podium_rate)?;
        validate_rate("bonus.last_rate", self.last_rate)?;
        validate_rate("bonus.default_rate", self.default_rate)?;
        Ok(())
    }
}

fn validate_rate(field: &str, rate: f64) -> Result<(), ValidationError> {
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}

/// Profit times the rate of the seller's rank band.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProfitRankBonus {
    rates: BonusRates,
}

impl ProfitRankBonus {
    /// Creates the strategy after validating the rates.
    pub fn new(rates: BonusRates) -> CoreResult<Self> {
        rates.validate()?;
        Ok(ProfitRankBonus { rates })
    }

    pub fn rates(&self) -> &BonusRates {
        &self.rates
    }
}

impl BonusStrategy for ProfitRankBonus {
    fn bonus(&self, rank: usize, total_sellers: usize, seller: &SellerStats) -> f64 {
        seller.profit * self.rates.rate_for(rank, total_sellers)
    }
}

/// The default bonus rule as a free function.
pub fn calculate_bonus_by_profit(rank: usize, total_sellers: usize, seller: &SellerStats) -> f64 {
    seller.profit * BonusRates::default().rate_for(rank, total_sellers)
}

// =============================================================================
// Unit Tests
// =============================================================================
