//! `sellerboard` binary: prints a ranked seller report for a JSON dataset.
//!
//! ## Usage
//! ```bash
//! sellerboard data/sample.json
//! sellerboard data/sample.json --format json --top 5
//! sellerboard --init-config            # write default report.toml
//! RUST_LOG=sellerboard=trace sellerboard data/sample.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sellerboard_report::{build_report, exit_codes, load_dataset, render, OutputFormat, ReportConfig, ReportResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sellerboard")]
#[command(about = "Per-seller revenue, profit and bonus report")]
#[command(version)]
struct Cli {
    /// Dataset with sellers, products and purchase_records
    #[arg(value_name = "INPUT", required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Config file (default: platform config dir/report.toml)
    #[arg(long, short = 'c', value_name = "PATH", env = "SELLERBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(long, short = 'f')]
    format: Option<OutputFormat>,

    /// Best-selling SKUs kept per seller
    #[arg(long, short = 't', value_name = "N")]
    top: Option<usize>,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> ReportResult<()> {
    if cli.init_config {
        let path = ReportConfig::default().save(cli.config)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut config = ReportConfig::load(cli.config)?;

    // CLI flags win over file and environment
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(top) = cli.top {
        config.analysis.top_products_limit = top;
    }
    config.validate()?;
    debug!(?config, "Resolved report configuration");

    let Some(input) = cli.input else {
        return Ok(());
    };

    let data = load_dataset(&input)?;
    let reports = build_report(&data, &config)?;
    print!("{}", render(&reports, config.output.format)?);

    Ok(())
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// parseable in JSON mode.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sellerboard_core=trace` - Show per-record fold events
/// - Default: INFO, DEBUG for sellerboard crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sellerboard=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
