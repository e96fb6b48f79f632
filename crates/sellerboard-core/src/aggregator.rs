//! # Sales Aggregator
//!
//! Folds purchase records into one ranked, rounded report row per seller.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      analyze_sales_data                                 │
//! │                                                                         │
//! │  1. Validate      data + both strategies present, records non-empty    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. Index         seller id → SellerStat (zeroed, seller input order)  │
//! │                   sku → Product                                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  3. Fold          per record:  sales_count += 1                        │
//! │                                revenue     += total_amount             │
//! │                   per item:    profit      += revenue(item) − cost     │
//! │                                sold[sku]   += quantity                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  4. Rank          stable sort by profit, descending                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  5. Finalize      bonus(rank, total, stats), top N skus, round to 2dp  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Accumulation is sequential and in record order so the float sums are
//! reproducible bit for bit. Rounding happens only in step 5.
//!
//! ## Example
//! ```rust
//! use sellerboard_core::aggregator::{analyze_sales_data, AnalysisOptions};
//! use sellerboard_core::strategy::{ProfitRankBonus, SimpleRevenue};
//! use sellerboard_core::validation::sales_data_from_value;
//!
//! let data = sales_data_from_value(serde_json::json!({
//!     "sellers": [{"id": "s1", "first_name": "Ivan", "last_name": "Ivanov"}],
//!     "products": [{"sku": "A1", "purchase_price": 10}],
//!     "purchase_records": [{
//!         "seller_id": "s1", "total_amount": 60,
//!         "items": [{"sku": "A1", "sale_price": 20, "discount": 0, "quantity": 3}]
//!     }]
//! }))?;
//!
//! let bonus = ProfitRankBonus::default();
//! let options = AnalysisOptions::new(&SimpleRevenue, &bonus);
//! let report = analyze_sales_data(&data, &options)?;
//!
//! assert_eq!(report[0].profit, 30.0);
//! assert_eq!(report[0].bonus, 4.5);
//! # Ok::<(), sellerboard_core::CoreError>(())
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::round2;
use crate::strategy::{BonusStrategy, ProfitRankBonus, RevenueStrategy, SellerStats, SimpleRevenue};
use crate::types::{Product, SalesData, SellerReport, TopProduct};
use crate::validation::{validate_sales_data, validate_top_products_limit};
use crate::TOP_PRODUCTS_LIMIT;

// =============================================================================
// Analysis Options
// =============================================================================

/// Strategies and limits for one analysis run.
///
/// Strategies are optional so that a caller assembling options from several
/// sources gets a [`CoreError::MissingStrategy`] instead of a silent default.
#[derive(Clone, Copy)]
pub struct AnalysisOptions<'a> {
    pub calculate_revenue: Option<&'a dyn RevenueStrategy>,
    pub calculate_bonus: Option<&'a dyn BonusStrategy>,
    /// Maximum entries in each seller's `top_products`.
    pub top_products_limit: usize,
}

impl<'a> AnalysisOptions<'a> {
    /// Options with both strategies and the default top products limit.
    pub fn new(revenue: &'a dyn RevenueStrategy, bonus: &'a dyn BonusStrategy) -> Self {
        AnalysisOptions {
            calculate_revenue: Some(revenue),
            calculate_bonus: Some(bonus),
            top_products_limit: TOP_PRODUCTS_LIMIT,
        }
    }

    pub fn with_revenue(mut self, revenue: &'a dyn RevenueStrategy) -> Self {
        self.calculate_revenue = Some(revenue);
        self
    }

    pub fn with_bonus(mut self, bonus: &'a dyn BonusStrategy) -> Self {
        self.calculate_bonus = Some(bonus);
        self
    }

    pub fn with_top_products_limit(mut self, limit: usize) -> Self {
        self.top_products_limit = limit;
        self
    }
}

impl Default for AnalysisOptions<'_> {
    /// No strategies; the default top products limit.
    fn default() -> Self {
        AnalysisOptions {
            calculate_revenue: None,
            calculate_bonus: None,
            top_products_limit: TOP_PRODUCTS_LIMIT,
        }
    }
}

impl std::fmt::Debug for AnalysisOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisOptions")
            .field("calculate_revenue", &self.calculate_revenue.is_some())
            .field("calculate_bonus", &self.calculate_bonus.is_some())
            .field("top_products_limit", &self.top_products_limit)
            .finish()
    }
}

// =============================================================================
// Seller Accumulator
// =============================================================================

/// Running totals for one seller during the fold.
#[derive(Debug)]
struct SellerStat {
    seller_id: String,
    name: String,
    revenue: f64,
    profit: f64,
    sales_count: u64,
    /// sku → cumulative quantity, in first-sold order.
    products_sold: IndexMap<String, i64>,
}

impl SellerStat {
    fn new(seller_id: &str, name: String) -> Self {
        SellerStat {
            seller_id: seller_id.to_string(),
            name,
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            products_sold: IndexMap::new(),
        }
    }

    fn stats(&self) -> SellerStats {
        SellerStats {
            seller_id: self.seller_id.clone(),
            name: self.name.clone(),
            revenue: self.revenue,
            profit: self.profit,
            sales_count: self.sales_count,
        }
    }

    /// Best sellers by quantity, ties kept in first-sold order.
    fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let mut top: Vec<TopProduct> = self
            .products_sold
            .iter()
            .map(|(sku, quantity)| TopProduct {
                sku: sku.clone(),
                quantity: *quantity,
            })
            .collect();
        top.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        top.truncate(limit);
        top
    }

    fn finalize(self, rank: usize, total: usize, bonus: &dyn BonusStrategy, limit: usize) -> SellerReport {
        let bonus = bonus.bonus(rank, total, &self.stats());
        let top_products = self.top_products(limit);

        SellerReport {
            seller_id: self.seller_id,
            name: self.name,
            revenue: round2(self.revenue),
            profit: round2(self.profit),
            sales_count: self.sales_count,
            top_products,
            bonus: round2(bonus),
        }
    }
}

// =============================================================================
// Analysis
// =============================================================================

/// Builds the ranked per-seller report.
///
/// ## Errors
/// - [`CoreError::InvalidInput`] when there are no purchase records
/// - [`CoreError::MissingStrategy`] when either strategy is absent
/// - [`CoreError::Validation`] when `top_products_limit` is zero or a
///   seller's cumulative quantity of one SKU overflows `i64`
/// - [`CoreError::UnknownSeller`] / [`CoreError::UnknownProduct`] when a
///   record references an id missing from the dataset
///
/// No partial result is ever returned.
pub fn analyze_sales_data(data: &SalesData, options: &AnalysisOptions<'_>) -> CoreResult<Vec<SellerReport>> {
    validate_sales_data(data).map_err(|e| CoreError::invalid_input(e.to_string()))?;

    let (revenue_strategy, bonus_strategy) = match (options.calculate_revenue, options.calculate_bonus) {
        (Some(revenue), Some(bonus)) => (revenue, bonus),
        (revenue, bonus) => {
            let missing: Vec<&str> = [
                revenue.is_none().then_some("calculate_revenue"),
                bonus.is_none().then_some("calculate_bonus"),
            ]
            .into_iter()
            .flatten()
            .collect();
            return Err(CoreError::MissingStrategy {
                missing: missing.join(", "),
            });
        }
    };

    validate_top_products_limit(options.top_products_limit)?;

    debug!(
        sellers = data.sellers.len(),
        products = data.products.len(),
        records = data.purchase_records.len(),
        "Analyzing sales data"
    );

    // A repeated seller id keeps its first position and its latest name.
    let mut stats: IndexMap<&str, SellerStat> = IndexMap::with_capacity(data.sellers.len());
    for seller in &data.sellers {
        stats.insert(seller.id.as_str(), SellerStat::new(&seller.id, seller.full_name()));
    }

    let products: HashMap<&str, &Product> = data
        .products
        .iter()
        .map(|product| (product.sku.as_str(), product))
        .collect();

    for record in &data.purchase_records {
        let stat = stats
            .get_mut(record.seller_id.as_str())
            .ok_or_else(|| CoreError::UnknownSeller {
                seller_id: record.seller_id.clone(),
            })?;

        stat.sales_count += 1;
        stat.revenue += record.total_amount;

        for item in &record.items {
            let product = products
                .get(item.sku.as_str())
                .copied()
                .ok_or_else(|| CoreError::UnknownProduct { sku: item.sku.clone() })?;

            let item_cost = product.purchase_price * item.quantity as f64;
            let item_revenue = revenue_strategy.revenue(item, product);
            stat.profit += item_revenue - item_cost;

            let sold = stat.products_sold.entry(item.sku.clone()).or_insert(0);
            *sold = sold.checked_add(item.quantity).ok_or_else(|| ValidationError::Overflow {
                field: format!("quantity of {} sold by {}", item.sku, record.seller_id),
            })?;
        }

        trace!(seller_id = %record.seller_id, items = record.items.len(), "Folded purchase record");
    }

    let mut ranked: Vec<SellerStat> = stats.into_values().collect();
    ranked.sort_by(|a, b| b.profit.partial_cmp(&a.profit).unwrap_or(Ordering::Equal));

    let total = ranked.len();
    let limit = options.top_products_limit;
    let report: Vec<SellerReport> = ranked
        .into_iter()
        .enumerate()
        .map(|(rank, stat)| stat.finalize(rank, total, bonus_strategy, limit))
        .collect();

    debug!(sellers = report.len(), "Sales analysis complete");
    Ok(report)
}

/// Runs the analysis with [`SimpleRevenue`] and the default [`ProfitRankBonus`].
pub fn analyze_with_defaults(data: &SalesData) -> CoreResult<Vec<SellerReport>> {
    let bonus = ProfitRankBonus::default();
    analyze_sales_data(data, &AnalysisOptions::new(&SimpleRevenue, &bonus))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::calculate_bonus_by_profit;
    use crate::types::{LineItem, PurchaseRecord, Seller};

    fn seller(id: &str, first: &str, last: &str) -> Seller {
        Seller {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            start_date: None,
            position: None,
        }
    }

    fn product(sku: &str, purchase_price: f64) -> Product {
        Product {
            sku: sku.to_string(),
            purchase_price,
            name: None,
            category: None,
            sale_price: None,
        }
    }

    fn line(sku: &str, sale_price: f64, discount: f64, quantity: i64) -> LineItem {
        LineItem {
            sku: sku.to_string(),
            sale_price,
            discount,
            quantity,
        }
    }

    fn record(seller_id: &str, total_amount: f64, items: Vec<LineItem>) -> PurchaseRecord {
        PurchaseRecord {
            seller_id: seller_id.to_string(),
            total_amount,
            items,
            receipt_id: None,
            date: None,
            customer_id: None,
            total_discount: None,
        }
    }

    /// Two sellers, one product; seller 1 sells at full price, seller 2 at half.
    fn two_seller_data() -> SalesData {
        SalesData {
            sellers: vec![seller("seller_1", "Ivan", "Ivanov"), seller("seller_2", "Petr", "Petrov")],
            products: vec![product("A1", 10.0)],
            purchase_records: vec![
                record("seller_1", 60.0, vec![line("A1", 20.0, 0.0, 3)]),
                record("seller_2", 10.0, vec![line("A1", 20.0, 50.0, 1)]),
            ],
        }
    }

    #[test]
    fn test_two_seller_scenario() {
        let report = analyze_with_defaults(&two_seller_data()).unwrap();

        assert_eq!(report.len(), 2);

        assert_eq!(report[0].seller_id, "seller_1");
        assert_eq!(report[0].name, "Ivan Ivanov");
        assert_eq!(report[0].revenue, 60.0);
        assert_eq!(report[0].profit, 30.0);
        assert_eq!(report[0].sales_count, 1);
        assert_eq!(report[0].bonus, 4.5);
        assert_eq!(
            report[0].top_products,
            vec![TopProduct {
                sku: "A1".to_string(),
                quantity: 3
            }]
        );

        assert_eq!(report[1].seller_id, "seller_2");
        assert_eq!(report[1].profit, 0.0);
        assert_eq!(report[1].bonus, 0.0);
    }

    #[test]
    fn test_plain_functions_as_strategies() {
        let options = AnalysisOptions::new(&crate::strategy::calculate_simple_revenue, &calculate_bonus_by_profit);
        let report = analyze_sales_data(&two_seller_data(), &options).unwrap();
        assert_eq!(report[0].bonus, 4.5);
    }

    #[test]
    fn test_empty_purchase_records_is_invalid_input() {
        let mut data = two_seller_data();
        data.purchase_records.clear();
        let err = analyze_with_defaults(&data).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_missing_bonus_strategy() {
        let options = AnalysisOptions::default().with_revenue(&SimpleRevenue);
        let err = analyze_sales_data(&two_seller_data(), &options).unwrap_err();
        match err {
            CoreError::MissingStrategy { missing } => assert_eq!(missing, "calculate_bonus"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_both_strategies() {
        let err = analyze_sales_data(&two_seller_data(), &AnalysisOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required calculation functions: calculate_revenue, calculate_bonus"
        );
    }

    #[test]
    fn test_input_validated_before_strategies() {
        let err = analyze_sales_data(&SalesData::default(), &AnalysisOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_top_products_limit_rejected() {
        let bonus = ProfitRankBonus::default();
        let options = AnalysisOptions::new(&SimpleRevenue, &bonus).with_top_products_limit(0);
        let err = analyze_sales_data(&two_seller_data(), &options).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_unknown_seller() {
        let mut data = two_seller_data();
        data.purchase_records.push(record("seller_9", 5.0, vec![]));
        let err = analyze_with_defaults(&data).unwrap_err();
        assert!(matches!(err, CoreError::UnknownSeller { ref seller_id } if seller_id == "seller_9"));
    }

    #[test]
    fn test_unknown_product() {
        let mut data = two_seller_data();
        data.purchase_records[1].items.push(line("ZZ", 1.0, 0.0, 1));
        let err = analyze_with_defaults(&data).unwrap_err();
        assert!(matches!(err, CoreError::UnknownProduct { ref sku } if sku == "ZZ"));
    }

    #[test]
    fn test_seller_without_sales_reported_with_zeros() {
        let mut data = two_seller_data();
        data.sellers.push(seller("seller_3", "Anna", "Smirnova"));
        let report = analyze_with_defaults(&data).unwrap();

        let idle = report.iter().find(|r| r.seller_id == "seller_3").unwrap();
        assert_eq!(idle.sales_count, 0);
        assert_eq!(idle.revenue, 0.0);
        assert!(idle.top_products.is_empty());
    }

    #[test]
    fn test_revenue_is_receipt_level() {
        // total_amount disagrees with the items on purpose
        let mut data = two_seller_data();
        data.purchase_records[0].total_amount = 55.5;
        let report = analyze_with_defaults(&data).unwrap();
        assert_eq!(report[0].revenue, 55.5);
        assert_eq!(report[0].profit, 30.0);
    }

    #[test]
    fn test_equal_profit_keeps_seller_order() {
        let data = SalesData {
            sellers: vec![
                seller("b", "B", "B"),
                seller("a", "A", "A"),
                seller("c", "C", "C"),
            ],
            products: vec![product("P", 1.0)],
            purchase_records: vec![
                record("a", 2.0, vec![line("P", 2.0, 0.0, 1)]),
                record("b", 2.0, vec![line("P", 2.0, 0.0, 1)]),
                record("c", 9.0, vec![line("P", 9.0, 0.0, 1)]),
            ],
        };
        let report = analyze_with_defaults(&data).unwrap();
        let order: Vec<&str> = report.iter().map(|r| r.seller_id.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_top_products_sorted_truncated_and_stable() {
        let skus: Vec<String> = (0..12).map(|i| format!("SKU_{i:02}")).collect();
        let products = skus.iter().map(|sku| product(sku, 1.0)).collect();
        // SKU_00..SKU_11 sold once each, then SKU_05 and SKU_07 twice more
        let mut items: Vec<LineItem> = skus.iter().map(|sku| line(sku, 2.0, 0.0, 1)).collect();
        items.push(line("SKU_07", 2.0, 0.0, 2));
        items.push(line("SKU_05", 2.0, 0.0, 2));

        let data = SalesData {
            sellers: vec![seller("s", "S", "S")],
            products,
            purchase_records: vec![record("s", 28.0, items)],
        };
        let report = analyze_with_defaults(&data).unwrap();
        let top = &report[0].top_products;

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].sku, "SKU_05");
        assert_eq!(top[0].quantity, 3);
        assert_eq!(top[1].sku, "SKU_07");
        let rest: Vec<&str> = top[2..].iter().map(|t| t.sku.as_str()).collect();
        assert_eq!(
            rest,
            vec!["SKU_00", "SKU_01", "SKU_02", "SKU_03", "SKU_04", "SKU_06", "SKU_08", "SKU_09"]
        );
    }

    #[test]
    fn test_custom_top_products_limit() {
        let bonus = ProfitRankBonus::default();
        let options = AnalysisOptions::new(&SimpleRevenue, &bonus).with_top_products_limit(1);
        let mut data = two_seller_data();
        data.products.push(product("B2", 1.0));
        data.purchase_records[0].items.push(line("B2", 5.0, 0.0, 7));
        let report = analyze_sales_data(&data, &options).unwrap();
        assert_eq!(report[0].top_products.len(), 1);
        assert_eq!(report[0].top_products[0].sku, "B2");
    }

    #[test]
    fn test_profit_rounding_half_away_from_zero() {
        let revenue = |_item: &LineItem, _product: &Product| 10.005;
        let data = SalesData {
            sellers: vec![seller("s", "S", "S")],
            products: vec![product("P", 0.0)],
            purchase_records: vec![record("s", 1.0, vec![line("P", 1.0, 0.0, 1)])],
        };
        let options = AnalysisOptions::new(&revenue, &calculate_bonus_by_profit);
        let report = analyze_sales_data(&data, &options).unwrap();
        assert_eq!(report[0].profit, 10.01);
    }

    #[test]
    fn test_bonus_sees_unrounded_profit() {
        let seen = std::cell::Cell::new(0.0);
        let probe = |_rank: usize, _total: usize, stats: &SellerStats| {
            seen.set(stats.profit);
            0.0
        };
        let revenue = |_item: &LineItem, _product: &Product| 1.0 / 3.0;
        let data = SalesData {
            sellers: vec![seller("s", "S", "S")],
            products: vec![product("P", 0.0)],
            purchase_records: vec![record("s", 1.0, vec![line("P", 1.0, 0.0, 1)])],
        };
        analyze_sales_data(&data, &AnalysisOptions::new(&revenue, &probe)).unwrap();
        assert_eq!(seen.get(), 1.0 / 3.0);
    }

    #[test]
    fn test_quantity_overflow_is_validation_error() {
        let mut data = two_seller_data();
        data.purchase_records[0].items = vec![line("A1", 0.0, 0.0, i64::MAX), line("A1", 0.0, 0.0, i64::MAX)];
        let err = analyze_with_defaults(&data).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Overflow { .. })));
    }

    #[test]
    fn test_large_amounts_are_not_clamped() {
        let data = SalesData {
            sellers: vec![seller("s", "S", "S")],
            products: vec![product("P", 0.0)],
            purchase_records: vec![record("s", 1e17, vec![line("P", 1e18, 0.0, 1)])],
        };
        let report = analyze_with_defaults(&data).unwrap();
        assert_eq!(report[0].revenue, 1e17);
        assert_eq!(report[0].profit, 1e18);
        assert_eq!(report[0].bonus, round2(1e18 * 0.15));
    }

    #[test]
    fn test_options_builder_sets_both_strategies() {
        let bonus = ProfitRankBonus::default();
        let options = AnalysisOptions::default().with_revenue(&SimpleRevenue).with_bonus(&bonus);
        let report = analyze_sales_data(&two_seller_data(), &options).unwrap();
        assert_eq!(report[0].bonus, 4.5);
    }

    #[test]
    fn test_duplicate_seller_id_keeps_first_position() {
        let mut data = two_seller_data();
        data.sellers.push(seller("seller_1", "Ivan", "Renamed"));
        let report = analyze_with_defaults(&data).unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "Ivan Renamed");
    }
}
