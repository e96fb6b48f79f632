//! # sellerboard-core: Pure Sales Analytics
//!
//! This crate is the **heart** of Sellerboard. It turns sellers, products and
//! purchase records into a ranked per-seller report, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Sellerboard Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                sellerboard-report (CLI)                         │   │
//! │  │    load dataset ──► read config ──► analyze ──► render         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ sellerboard-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │ strategy  │  │ aggregator │  │ validation│ │   │
//! │  │   │  Seller   │  │  Revenue  │  │  analyze_  │  │   shape   │ │   │
//! │  │   │  Product  │  │  Bonus    │  │ sales_data │  │  checks   │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input records and report rows
//! - [`strategy`] - Revenue and bonus strategies
//! - [`aggregator`] - The per-seller fold, ranking and projection
//! - [`money`] - Cent rounding for report amounts
//! - [`validation`] - Dataset shape and precondition checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sellerboard_core::{analyze_with_defaults, SalesData};
//!
//! let data = SalesData::default();
//!
//! // No purchase records: nothing to analyze
//! assert!(analyze_with_defaults(&data).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod error;
pub mod money;
pub mod strategy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregator::{analyze_sales_data, analyze_with_defaults, AnalysisOptions};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use strategy::{BonusRates, BonusStrategy, ProfitRankBonus, RevenueStrategy, SellerStats, SimpleRevenue};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of best-selling SKUs kept per seller.
pub const TOP_PRODUCTS_LIMIT: usize = 10;
