//! # Report Error Types
//!
//! Error types for loading, configuring and rendering a report.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Dataset     │  │      Analysis           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  ReadFailed     │  │  Analysis(CoreError)    │ │
//! │  │  ConfigLoad...  │  │  InvalidJson    │  │                         │ │
//! │  │  ConfigSave...  │  │  InvalidRecord  │  │  Rendering              │ │
//! │  └─────────────────┘  └─────────────────┘  │  RenderFailed           │ │
//! │                                             └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use sellerboard_core::CoreError;
use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Process exit codes of the `sellerboard` binary.
pub mod exit_codes {
    /// Report produced.
    pub const EXIT_SUCCESS: u8 = 0;
    /// Unspecified failure.
    pub const EXIT_ERROR: u8 = 1;
    /// Bad configuration or arguments.
    pub const EXIT_CONFIG: u8 = 2;
    /// Dataset could not be read or parsed.
    pub const EXIT_DATASET: u8 = 3;
    /// Dataset loaded but failed analysis preconditions.
    pub const EXIT_ANALYSIS: u8 = 4;
}

/// Report error type covering every failure of a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are out of range.
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Dataset Errors
    // =========================================================================
    /// Dataset file could not be read.
    #[error("Failed to read dataset {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON.
    #[error("Dataset is not valid JSON: {0}")]
    InvalidJson(String),

    /// Dataset is JSON of the right shape but a record has a wrong field type.
    #[error("Dataset record does not match the expected schema: {0}")]
    InvalidRecord(String),

    // =========================================================================
    // Analysis Errors
    // =========================================================================
    /// The core analysis rejected the dataset.
    #[error(transparent)]
    Analysis(#[from] CoreError),

    // =========================================================================
    // Rendering Errors
    // =========================================================================
    /// Failed to render the report.
    #[error("Failed to render report: {0}")]
    RenderFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(err: toml::ser::Error) -> Self {
        ReportError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for exit codes)
// =============================================================================

impl ReportError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidConfig(_)
                | ReportError::ConfigLoadFailed(_)
                | ReportError::ConfigSaveFailed(_)
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            e if e.is_config_error() => exit_codes::EXIT_CONFIG,
            ReportError::ReadFailed { .. } | ReportError::InvalidJson(_) | ReportError::InvalidRecord(_) => {
                exit_codes::EXIT_DATASET
            }
            ReportError::Analysis(_) => exit_codes::EXIT_ANALYSIS,
            _ => exit_codes::EXIT_ERROR,
        }
    }
}
