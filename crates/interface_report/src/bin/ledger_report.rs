//! Ledger Report - command-line report runner
//!
//! Reads a JSON document holding a ledger snapshot and a list of report
//! requests, runs every request, and prints the results as a JSON array.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin ledger-report -- reports.json
//!
//! # Run with environment variables
//! REPORT_AGING_BOUNDARIES=15,30,45 REPORT_COMPARISON=previous_year cargo run --bin ledger-report -- reports.json
//! ```
//!
//! # Environment Variables
//!
//! * `REPORT_AGING_BOUNDARIES` - Comma-separated aging boundaries in days (default: 30,60,90)
//! * `REPORT_SHOW_ZERO_BALANCES` - List zero-balance groups and accounts (default: false)
//! * `REPORT_SPLIT_EXPENSES` - Show gross profit on the profit & loss (default: false)
//! * `REPORT_COMPARISON` - previous_period, previous_quarter, previous_year or none (default: none)
//! * `REPORT_BALANCE_TOLERANCE` - Allowed balance sheet difference (default: 0.01)
//! * `REPORT_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `REPORT_LOG_JSON` - Emit logs as JSON lines (default: false)

use anyhow::{bail, Context};
use interface_report::{config::ReportConfig, create_handler, ReportDocument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the report runner.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The input file is missing or is not a valid report document
/// - The ledger in the document is malformed
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ReportConfig::from_env().context("failed to load REPORT_* configuration")?;

    init_tracing(&config.log_level, config.log_json);

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: ledger-report <document.json>");
    };

    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path))?;
    let document: ReportDocument =
        serde_json::from_str(&raw).with_context(|| format!("{} is not a report document", path))?;

    tracing::info!(
        %path,
        requests = document.requests.len(),
        "Starting ledger report run"
    );

    let handler = create_handler(document.ledger, &config)?;
    let outputs = handler.handle_all(document.requests).await;

    println!("{}", serde_json::to_string_pretty(&outputs)?);

    tracing::info!("Report run complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only the report output.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Emit JSON lines instead of human-readable text
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
