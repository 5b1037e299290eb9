//! Report Runner
//!
//! This crate runs ledger reports from JSON documents: it loads
//! configuration, builds the in-memory ledger, and turns each request into
//! a JSON report.
//!
//! # Architecture
//!
//! - **Config**: `REPORT_*` environment variables
//! - **DTOs**: Request and response documents
//! - **Handlers**: Dispatch of requests to the report service
//! - **Error Handling**: Consistent error bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_report::{create_handler, config::ReportConfig};
//!
//! let handler = create_handler(document.ledger, &ReportConfig::default())?;
//! let outputs = handler.handle_all(document.requests).await;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use domain_ledger::{InMemoryLedgerData, LedgerSnapshot, ReportService};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::handlers::ReportHandler;

pub use dto::{ReportDocument, ReportRequest, ReportResponse};

/// Builds a handler over an in-memory ledger
///
/// # Arguments
///
/// * `snapshot` - The ledger to report on
/// * `config` - Report configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the ledger's chart
/// of accounts or postings are malformed
pub fn create_handler(
    snapshot: LedgerSnapshot,
    config: &ReportConfig,
) -> Result<ReportHandler<InMemoryLedgerData>, ReportError> {
    let settings = config.settings()?;
    let default_comparison = config.default_comparison()?;
    let data = InMemoryLedgerData::new(snapshot)?;

    let service = ReportService::new(Arc::new(data), settings);
    Ok(ReportHandler::new(service).with_default_comparison(default_comparison))
}
