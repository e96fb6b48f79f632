//! # sellerboard-report: Dataset In, Ranked Report Out
//!
//! The I/O shell around `sellerboard-core`: it reads a JSON dataset, resolves
//! configuration, runs the analysis and renders the result.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  data.json ──► loader ──► SalesData ─┐                                  │
//! │                                      ├──► build_report ──► render ──►  │
//! │  report.toml + env ──► ReportConfig ─┘        (core)        stdout      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod render;

pub use config::{AnalysisSettings, OutputFormat, OutputSettings, ReportConfig};
pub use error::{exit_codes, ReportError, ReportResult};
pub use loader::{load_dataset, parse_dataset};
pub use render::{render, render_json, render_table, ReportDocument};

use sellerboard_core::{analyze_sales_data, AnalysisOptions, ProfitRankBonus, SalesData, SellerReport, SimpleRevenue};
use tracing::info;

/// Runs the analysis with the configured bonus rates and top-products limit.
pub fn build_report(data: &SalesData, config: &ReportConfig) -> ReportResult<Vec<SellerReport>> {
    let bonus = ProfitRankBonus::new(config.bonus)?;
    let options = AnalysisOptions::new(&SimpleRevenue, &bonus)
        .with_top_products_limit(config.analysis.top_products_limit);

    let reports = analyze_sales_data(data, &options)?;

    info!(
        sellers = reports.len(),
        purchase_records = data.purchase_records.len(),
        "Report built"
    );

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sellerboard_core::CoreError;
    use std::path::PathBuf;

    fn sample() -> SalesData {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample.json");
        load_dataset(&path).unwrap()
    }

    #[test]
    fn test_sample_report_ranking() {
        let reports = build_report(&sample(), &ReportConfig::default()).unwrap();

        let ids: Vec<&str> = reports.iter().map(|r| r.seller_id.as_str()).collect();
        assert_eq!(ids, vec!["seller_1", "seller_2", "seller_3", "seller_4"]);

        let profits: Vec<f64> = reports.iter().map(|r| r.profit).collect();
        assert_eq!(profits, vec![115.0, 67.0, 55.0, 7.5]);

        let revenues: Vec<f64> = reports.iter().map(|r| r.revenue).collect();
        assert_eq!(revenues, vec![290.0, 140.0, 149.0, 13.5]);

        let counts: Vec<u64> = reports.iter().map(|r| r.sales_count).collect();
        assert_eq!(counts, vec![2, 3, 2, 1]);
    }

    #[test]
    fn test_sample_report_bonuses() {
        let reports = build_report(&sample(), &ReportConfig::default()).unwrap();
        let bonuses: Vec<f64> = reports.iter().map(|r| r.bonus).collect();
        assert_eq!(bonuses, vec![17.25, 6.7, 5.5, 0.0]);
    }

    #[test]
    fn test_sample_top_products() {
        let reports = build_report(&sample(), &ReportConfig::default()).unwrap();

        let top: Vec<(&str, i64)> = reports[2]
            .top_products
            .iter()
            .map(|p| (p.sku.as_str(), p.quantity))
            .collect();
        assert_eq!(top, vec![("SKU_003", 2), ("SKU_004", 1), ("SKU_002", 1)]);
        assert_eq!(reports[0].name, "Alexey Petrov");
    }

    #[test]
    fn test_configured_limit_and_rates() {
        let mut config = ReportConfig::default();
        config.analysis.top_products_limit = 1;
        config.bonus.top_rate = 0.2;

        let reports = build_report(&sample(), &config).unwrap();
        assert!(reports.iter().all(|r| r.top_products.len() <= 1));
        assert_eq!(reports[0].bonus, 23.0);
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let mut config = ReportConfig::default();
        config.bonus.last_rate = 2.0;

        let err = build_report(&sample(), &config).unwrap_err();
        assert!(matches!(err, ReportError::Analysis(CoreError::Validation(_))));
    }

    #[test]
    fn test_end_to_end_json() {
        let reports = build_report(&sample(), &ReportConfig::default()).unwrap();
        let json = render(&reports, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seller_count"], 4);
        assert_eq!(value["sellers"][0]["bonus"], 17.25);
    }
}
