//! # Domain Types
//!
//! Input records and report rows used throughout Sellerboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (immutable)                                                      │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │     Seller      │   │     Product     │   │   PurchaseRecord    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │◄──┼─────────────────┼───│  seller_id          │   │
//! │  │  first_name     │   │  sku            │◄──│  items[].sku        │   │
//! │  │  last_name      │   │  purchase_price │   │  total_amount       │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  OUTPUT (produced once)                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ SellerReport: seller_id, name, revenue, profit, sales_count,    │   │
//! │  │               top_products[{sku, quantity}], bonus              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Descriptive fields the analysis never reads (`position`, `category`,
//! `receipt_id`, ...) are optional so partially described datasets still load.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Seller
// =============================================================================

/// A seller whose performance is being measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Seller {
    /// Business identifier referenced by purchase records.
    pub id: String,
    pub first_name: String,
    pub last_name: String,

    /// Date the seller started (free-form, e.g. `2023-01-15`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub start_date: Option<String>,

    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub position: Option<String>,
}

impl Seller {
    /// Display name used in reports: `"{first_name} {last_name}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item with a known cost basis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Cost of one unit (what the shop paid for it).
    pub purchase_price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<String>,

    /// Catalog (list) price. Line items carry their own `sale_price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sale_price: Option<f64>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product line inside a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub sku: String,
    /// Price per unit before discount.
    pub sale_price: f64,
    /// Discount percentage, 0-100.
    pub discount: f64,
    /// Units sold.
    pub quantity: i64,
}

// =============================================================================
// Purchase Record
// =============================================================================

/// One completed receipt by one seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseRecord {
    pub seller_id: String,

    /// Receipt-level amount; summed into the seller's revenue.
    pub total_amount: f64,

    pub items: Vec<LineItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub receipt_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub customer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub total_discount: Option<f64>,
}

// =============================================================================
// Sales Data
// =============================================================================

/// The three input collections of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesData {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

// =============================================================================
// Report Rows
// =============================================================================

/// One entry of a seller's best-sellers list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopProduct {
    pub sku: String,
    /// Cumulative quantity sold by this seller.
    pub quantity: i64,
}

/// Final, rounded analytics for one seller.
///
/// Field order matches the serialized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SellerReport {
    pub seller_id: String,
    pub name: String,
    /// Sum of `total_amount` over the seller's receipts, 2 decimals.
    pub revenue: f64,
    /// Sum of item revenue minus item cost, 2 decimals.
    pub profit: f64,
    /// Number of receipts.
    pub sales_count: u64,
    pub top_products: Vec<TopProduct>,
    /// Rank-dependent bonus, 2 decimals.
    pub bonus: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let seller = Seller {
            id: "seller_1".to_string(),
            first_name: "Alexey".to_string(),
            last_name: "Petrov".to_string(),
            start_date: None,
            position: None,
        };
        assert_eq!(seller.full_name(), "Alexey Petrov");
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let json = r#"{"sku": "SKU_001", "purchase_price": 12.5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.sku, "SKU_001");
        assert_eq!(product.name, None);
        assert_eq!(product.sale_price, None);
    }

    #[test]
    fn test_purchase_record_deserializes_full_receipt() {
        let json = r#"{
            "receipt_id": "receipt_1",
            "date": "2023-12-04",
            "seller_id": "seller_5",
            "customer_id": "customer_73",
            "items": [
                {"discount": 0, "name": "Yogurt", "quantity": 10, "sale_price": 34.64, "sku": "SKU_044"}
            ],
            "total_amount": 346.4,
            "total_discount": 0
        }"#;
        let record: PurchaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.seller_id, "seller_5");
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].quantity, 10);
        assert_eq!(record.receipt_id.as_deref(), Some("receipt_1"));
    }

    #[test]
    fn test_ts_bindings_mark_optional_fields() {
        let decl = Seller::decl();
        assert!(decl.contains("start_date?: string"), "{decl}");
        assert!(decl.contains("first_name: string"), "{decl}");
        assert!(PurchaseRecord::decl().contains("total_discount?: number"));
    }

    #[test]
    fn test_report_serializes_in_field_order() {
        let report = SellerReport {
            seller_id: "seller_1".to_string(),
            name: "Alexey Petrov".to_string(),
            revenue: 60.0,
            profit: 30.0,
            sales_count: 1,
            top_products: vec![TopProduct {
                sku: "A1".to_string(),
                quantity: 3,
            }],
            bonus: 4.5,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"seller_id":"seller_1","name":"Alexey Petrov","revenue":60.0,"profit":30.0,"sales_count":1,"top_products":[{"sku":"A1","quantity":3}],"bonus":4.5}"#
        );
    }
}
