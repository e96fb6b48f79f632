//! # Error Types
//!
//! Domain-specific error types for sellerboard-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sellerboard-core errors (this file)                                   │
//! │  ├── CoreError        - Analysis failures (input, strategies, refs)    │
//! │  └── ValidationError  - Field-level validation failures                │
//! │                                                                         │
//! │  sellerboard-report errors (separate crate)                            │
//! │  └── ReportError      - File, config and rendering failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → stderr              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure aborts the whole analysis: there is no partial output.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by [`analyze_sales_data`](crate::aggregator::analyze_sales_data).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The dataset is absent, a collection is not a sequence, or there are no
    /// purchase records to analyze.
    #[error("Invalid input data: {reason}")]
    InvalidInput { reason: String },

    /// A revenue or bonus strategy was not supplied.
    #[error("Missing required calculation functions: {missing}")]
    MissingStrategy { missing: String },

    /// A purchase record references a seller that is not in the dataset.
    ///
    /// ## When This Occurs
    /// ```text
    /// purchase_records[i].seller_id = "seller_9"
    ///      │
    ///      ▼
    /// sellers: [seller_1, seller_2]   ← no seller_9
    ///      │
    ///      ▼
    /// UnknownSeller { seller_id: "seller_9" }
    /// ```
    #[error("Purchase record references unknown seller: {seller_id}")]
    UnknownSeller { seller_id: String },

    /// A line item references a SKU that is not in the product catalog.
    #[error("Line item references unknown product: {sku}")]
    UnknownProduct { sku: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for an [`CoreError::InvalidInput`] with the given reason.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or null.
    #[error("{field} is required")]
    Required { field: String },

    /// A field that must hold a sequence holds something else.
    #[error("{field} must be an array")]
    NotASequence { field: String },

    /// A sequence that must have entries is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A running total exceeded its integer range.
    #[error("{field} overflowed")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
