//! # Report Rendering
//!
//! Turns ranked [`SellerReport`] rows into text for stdout.
//!
//! ## Formats
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  table                                                                  │
//! │   #  Seller          Revenue     Profit  Sales    Bonus  Top products   │
//! │   1  Alexey Petrov   $290.00    $115.00      2   $17.25  SKU_001 x3 ... │
//! │                                                                         │
//! │  json                                                                   │
//! │   { "generated_at": "...", "seller_count": 4, "sellers": [ ... ] }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use chrono::{DateTime, Utc};
use sellerboard_core::money::format_amount;
use sellerboard_core::SellerReport;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::{ReportError, ReportResult};

/// SKUs listed per row in table output.
pub const TABLE_TOP_SKUS: usize = 3;

/// Envelope of the JSON output.
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub generated_at: DateTime<Utc>,
    pub seller_count: usize,
    pub sellers: &'a [SellerReport],
}

/// Renders the report in the requested format.
pub fn render(reports: &[SellerReport], format: OutputFormat) -> ReportResult<String> {
    match format {
        OutputFormat::Table => render_table(reports),
        OutputFormat::Json => render_json(reports, Utc::now()),
    }
}

/// Renders the JSON document with a fixed timestamp.
pub fn render_json(reports: &[SellerReport], generated_at: DateTime<Utc>) -> ReportResult<String> {
    let document = ReportDocument {
        generated_at,
        seller_count: reports.len(),
        sellers: reports,
    };
    serde_json::to_string_pretty(&document).map_err(|e| ReportError::RenderFailed(e.to_string()))
}

/// Renders aligned columns, one row per seller in rank order.
pub fn render_table(reports: &[SellerReport]) -> ReportResult<String> {
    let name_width = reports
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Seller".len());

    let mut out = String::new();
    writeln!(
        out,
        "{:>3}  {:<name_width$}  {:>12}  {:>12}  {:>5}  {:>10}  Top products",
        "#", "Seller", "Revenue", "Profit", "Sales", "Bonus",
    )
    .map_err(render_failed)?;

    for (rank, report) in reports.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<name_width$}  {:>12}  {:>12}  {:>5}  {:>10}  {}",
            rank + 1,
            report.name,
            format_amount(report.revenue),
            format_amount(report.profit),
            report.sales_count,
            format_amount(report.bonus),
            top_skus(report),
        )
        .map_err(render_failed)?;
    }

    Ok(out)
}

fn top_skus(report: &SellerReport) -> String {
    if report.top_products.is_empty() {
        return "-".to_string();
    }

    report
        .top_products
        .iter()
        .take(TABLE_TOP_SKUS)
        .map(|p| format!("{} x{}", p.sku, p.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_failed(err: std::fmt::Error) -> ReportError {
    ReportError::RenderFailed(err.to_string())
}
