//! # Report Configuration
//!
//! Configuration management for the report tool.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority, applied by the binary)       │
//! │     --format json --top 5                                              │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SELLERBOARD_OUTPUT_FORMAT=json                                     │
//! │     SELLERBOARD_TOP_PRODUCTS=5                                         │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/sellerboard/report.toml (Linux)                          │
//! │     ~/Library/Application Support/com.sellerboard.sellerboard/...      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     10 top products, 15/10/0/5 % bonus rates, table output             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [analysis]
//! top_products_limit = 10
//!
//! [bonus]
//! top_rate = 0.15
//! podium_rate = 0.10
//! last_rate = 0.0
//! default_rate = 0.05
//!
//! [output]
//! format = "table"   # table | json
//! ```

use std::path::PathBuf;

use sellerboard_core::validation::validate_top_products_limit;
use sellerboard_core::{BonusRates, TOP_PRODUCTS_LIMIT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Output Format
// =============================================================================

/// How a finished report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned, human-readable columns.
    #[default]
    Table,

    /// `{generated_at, seller_count, sellers: [...]}` document.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(ReportError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: table, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Settings Sections
// =============================================================================

/// Analysis parameters passed to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Best-selling SKUs kept per seller.
    #[serde(default = "default_top_products_limit")]
    pub top_products_limit: usize,
}

fn default_top_products_limit() -> usize {
    TOP_PRODUCTS_LIMIT
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            top_products_limit: default_top_products_limit(),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
}

// =============================================================================
// Main Report Configuration
// =============================================================================

/// Complete report configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Bonus rate per rank band.
    #[serde(default)]
    pub bonus: BonusRates,

    #[serde(default)]
    pub output: OutputSettings,
}

impl ReportConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (report.toml)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        let explicit = config_path.is_some();
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ReportError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ReportError::ConfigLoadFailed(format!(
                    "{}: file not found",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load report config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ReportResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ReportError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ReportError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Report config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        validate_top_products_limit(self.analysis.top_products_limit)
            .map_err(|e| ReportError::InvalidConfig(e.to_string()))?;

        self.bonus
            .validate()
            .map_err(|e| ReportError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Applies `SELLERBOARD_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = lookup("SELLERBOARD_TOP_PRODUCTS") {
            match limit.parse::<usize>() {
                Ok(n) => {
                    debug!(limit = n, "Overriding top products limit from environment");
                    self.analysis.top_products_limit = n;
                }
                Err(_) => warn!(value = %limit, "Invalid SELLERBOARD_TOP_PRODUCTS"),
            }
        }

        if let Some(format) = lookup("SELLERBOARD_OUTPUT_FORMAT") {
            match format.parse() {
                Ok(parsed) => {
                    debug!(format = %format, "Overriding output format from environment");
                    self.output.format = parsed;
                }
                Err(_) => warn!(format = %format, "Unknown output format in environment"),
            }
        }

        let rates = [
            ("SELLERBOARD_BONUS_TOP_RATE", &mut self.bonus.top_rate),
            ("SELLERBOARD_BONUS_PODIUM_RATE", &mut self.bonus.podium_rate),
            ("SELLERBOARD_BONUS_LAST_RATE", &mut self.bonus.last_rate),
            ("SELLERBOARD_BONUS_DEFAULT_RATE", &mut self.bonus.default_rate),
        ];
        for (key, slot) in rates {
            if let Some(value) = lookup(key) {
                match value.parse::<f64>() {
                    Ok(rate) => {
                        debug!(key, rate, "Overriding bonus rate from environment");
                        *slot = rate;
                    }
                    Err(_) => warn!(key, value = %value, "Invalid bonus rate in environment"),
                }
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sellerboard", "sellerboard")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }
}
