//! Report configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::CoreError;
use domain_ledger::{AgingBoundaries, ComparisonMode, ReportSettings, BALANCE_TOLERANCE};

/// Report configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Aging bucket boundaries in days
    pub aging_boundaries: Vec<u32>,
    /// List groups and accounts whose balance is zero
    pub show_zero_balances: bool,
    /// Split expenses into direct and operating on the profit & loss
    pub split_expenses: bool,
    /// Comparison applied when a request names none
    pub comparison: Option<String>,
    /// Allowed balance sheet difference
    pub balance_tolerance: Decimal,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            aging_boundaries: vec![30, 60, 90],
            show_zero_balances: false,
            split_expenses: false,
            comparison: None,
            balance_tolerance: BALANCE_TOLERANCE,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ReportConfig {
    /// Loads configuration from `REPORT_*` environment variables.
    ///
    /// `REPORT_AGING_BOUNDARIES` takes a comma-separated list.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("REPORT")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("aging_boundaries"),
            )
            .build()?
            .try_deserialize()
    }

    /// Validated settings for the report service
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetting` for malformed boundaries or a negative tolerance
    pub fn settings(&self) -> Result<ReportSettings, CoreError> {
        let aging_boundaries = AgingBoundaries::new(self.aging_boundaries.clone())
            .map_err(|e| CoreError::invalid_setting("aging_boundaries", e.to_string()))?;
        if self.balance_tolerance < Decimal::ZERO {
            return Err(CoreError::invalid_setting(
                "balance_tolerance",
                "must not be negative",
            ));
        }

        Ok(ReportSettings {
            aging_boundaries,
            show_zero_balances: self.show_zero_balances,
            balance_tolerance: self.balance_tolerance,
            split_expenses: self.split_expenses,
        })
    }

    /// The configured default comparison, if any
    pub fn default_comparison(&self) -> Result<Option<ComparisonMode>, CoreError> {
        match self.comparison.as_deref().map(str::trim) {
            None | Some("") | Some("none") => Ok(None),
            Some(name) => name
                .parse()
                .map(Some)
                .map_err(|e: domain_ledger::LedgerError| {
                    CoreError::invalid_setting("comparison", e.to_string())
                }),
        }
    }
}
