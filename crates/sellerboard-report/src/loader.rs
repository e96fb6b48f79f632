//! Dataset loading.
//!
//! A dataset is a single JSON document with `sellers`, `products` and
//! `purchase_records` arrays. Shape problems (a missing or non-array
//! collection, no purchase records) are the core's `InvalidInput`. A record
//! with a wrongly typed field is a dataset error.

use std::path::Path;

use sellerboard_core::validation::validate_dataset_shape;
use sellerboard_core::{CoreError, SalesData};
use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};

/// Reads and parses a dataset file.
pub fn load_dataset(path: &Path) -> ReportResult<SalesData> {
    info!(path = %path.display(), "Loading dataset");

    let contents = std::fs::read_to_string(path).map_err(|source| ReportError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    parse_dataset(&contents)
}

/// Parses a dataset from a JSON string.
pub fn parse_dataset(contents: &str) -> ReportResult<SalesData> {
    let document: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| ReportError::InvalidJson(e.to_string()))?;

    validate_dataset_shape(&document).map_err(|e| CoreError::invalid_input(e.to_string()))?;
    let data: SalesData =
        serde_json::from_value(document).map_err(|e| ReportError::InvalidRecord(e.to_string()))?;

    debug!(
        sellers = data.sellers.len(),
        products = data.products.len(),
        purchase_records = data.purchase_records.len(),
        "Dataset parsed"
    );

    Ok(data)
}
