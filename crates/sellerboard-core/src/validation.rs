//! # Validation Module
//!
//! Input validation for an analysis run.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Raw document (serde_json::Value)                             │
//! │  ├── Document present (not null)                                       │
//! │  └── sellers / products / purchase_records are arrays                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Typed records (serde deserialization)                        │
//! │  └── Field types (ids are strings, prices are numbers, ...)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Analysis preconditions (THIS MODULE + aggregator)            │
//! │  ├── purchase_records is not empty                                     │
//! │  └── Both calculation strategies supplied                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cross references (seller ids, skus) are resolved during the fold itself;
//! see [`CoreError::UnknownSeller`] and [`CoreError::UnknownProduct`].
//!
//! ## Usage
//! ```rust
//! use sellerboard_core::validation::sales_data_from_value;
//!
//! let doc = serde_json::json!({ "sellers": [], "products": [], "purchase_records": "nope" });
//! assert!(sales_data_from_value(doc).is_err());
//! ```

use serde_json::Value;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::SalesData;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Names of the collections every dataset must carry, in document order.
pub const REQUIRED_COLLECTIONS: [&str; 3] = ["sellers", "products", "purchase_records"];

// =============================================================================
// Raw Document Validators
// =============================================================================

/// Checks the untyped document has the shape of a dataset.
///
/// ## Rules
/// - The document must be present (not `null`)
/// - `sellers`, `products` and `purchase_records` must be arrays
/// - `purchase_records` must not be empty
pub fn validate_dataset_shape(document: &Value) -> ValidationResult<()> {
    if document.is_null() {
        return Err(ValidationError::Required {
            field: "data".to_string(),
        });
    }

    for field in REQUIRED_COLLECTIONS {
        match document.get(field) {
            Some(Value::Array(_)) => {}
            Some(Value::Null) | None => {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                })
            }
            Some(_) => {
                return Err(ValidationError::NotASequence {
                    field: field.to_string(),
                })
            }
        }
    }

    let records_empty = document
        .get("purchase_records")
        .and_then(Value::as_array)
        .map_or(true, Vec::is_empty);
    if records_empty {
        return Err(ValidationError::Empty {
            field: "purchase_records".to_string(),
        });
    }

    Ok(())
}

/// Validates a raw document and deserializes it into [`SalesData`].
///
/// Every failure is reported as [`CoreError::InvalidInput`].
pub fn sales_data_from_value(document: Value) -> CoreResult<SalesData> {
    validate_dataset_shape(&document).map_err(|e| CoreError::invalid_input(e.to_string()))?;
    serde_json::from_value(document).map_err(|e| CoreError::invalid_input(e.to_string()))
}

// =============================================================================
// Typed Validators
// =============================================================================

/// Checks the analysis preconditions on already typed data.
///
/// ## Rules
/// - `purchase_records` must not be empty
pub fn validate_sales_data(data: &SalesData) -> ValidationResult<()> {
    if data.purchase_records.is_empty() {
        return Err(ValidationError::Empty {
            field: "purchase_records".to_string(),
        });
    }

    Ok(())
}

/// Validates the number of best-sellers kept per seller.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_top_products_limit(limit: usize) -> ValidationResult<()> {
    if limit == 0 {
        return Err(ValidationError::MustBePositive {
            field: "top_products_limit".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_document() -> Value {
        json!({
            "sellers": [{"id": "seller_1", "first_name": "Ivan", "last_name": "Ivanov"}],
            "products": [{"sku": "A1", "purchase_price": 10}],
            "purchase_records": [{
                "seller_id": "seller_1",
                "total_amount": 20,
                "items": [{"sku": "A1", "sale_price": 20, "discount": 0, "quantity": 1}]
            }]
        })
    }

    #[test]
    fn test_shape_accepts_valid_document() {
        assert!(validate_dataset_shape(&minimal_document()).is_ok());
    }

    #[test]
    fn test_shape_rejects_null_document() {
        let err = validate_dataset_shape(&Value::Null).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "data"));
    }

    #[test]
    fn test_shape_rejects_non_array_collections() {
        for field in REQUIRED_COLLECTIONS {
            let mut doc = minimal_document();
            doc[field] = json!({"not": "an array"});
            let err = validate_dataset_shape(&doc).unwrap_err();
            assert!(matches!(err, ValidationError::NotASequence { .. }), "{field}");
        }
    }

    #[test]
    fn test_shape_rejects_missing_collection() {
        let mut doc = minimal_document();
        doc.as_object_mut().unwrap().remove("products");
        assert!(matches!(
            validate_dataset_shape(&doc),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_shape_rejects_empty_records() {
        let mut doc = minimal_document();
        doc["purchase_records"] = json!([]);
        assert!(matches!(
            validate_dataset_shape(&doc),
            Err(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn test_from_value_reports_invalid_input() {
        let data = sales_data_from_value(minimal_document()).unwrap();
        assert_eq!(data.sellers.len(), 1);
        assert_eq!(data.purchase_records[0].items[0].quantity, 1);

        let mut doc = minimal_document();
        doc["products"][0]["purchase_price"] = json!("ten");
        assert!(matches!(
            sales_data_from_value(doc),
            Err(CoreError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_validate_sales_data() {
        assert!(validate_sales_data(&SalesData::default()).is_err());
        let data = sales_data_from_value(minimal_document()).unwrap();
        assert!(validate_sales_data(&data).is_ok());
    }

    #[test]
    fn test_validate_top_products_limit() {
        assert!(validate_top_products_limit(10).is_ok());
        assert!(validate_top_products_limit(0).is_err());
    }
}
