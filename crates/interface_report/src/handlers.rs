//! Request handling

use serde::Serialize;

use domain_ledger::{ComparisonMode, LedgerDataPort, ReportService};

use crate::dto::{ReportRequest, ReportResponse};
use crate::error::ReportError;

/// Runs report requests against one data port
pub struct ReportHandler<P: LedgerDataPort> {
    service: ReportService<P>,
    default_comparison: Option<ComparisonMode>,
}

impl<P: LedgerDataPort> ReportHandler<P> {
    pub fn new(service: ReportService<P>) -> Self {
        Self {
            service,
            default_comparison: None,
        }
    }

    /// Comparison used by statements whose request names none
    pub fn with_default_comparison(mut self, mode: Option<ComparisonMode>) -> Self {
        self.default_comparison = mode;
        self
    }

    pub fn service(&self) -> &ReportService<P> {
        &self.service
    }

    /// Runs one request
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown accounts, `BadRequest` for invalid
    /// periods or comparisons, and `DataAccess` when the port fails
    pub async fn handle(&self, request: ReportRequest) -> Result<ReportResponse, ReportError> {
        let report = request.name();
        tracing::info!(report, "Running report");

        let result = match request {
            ReportRequest::LedgerStatement { account_id, period } => {
                to_value(self.service.ledger_statement(account_id, period).await?)?
            }
            ReportRequest::Aging {
                side,
                party_ids,
                period,
            } => to_value(self.service.aging_report(side, &party_ids, period).await?)?,
            ReportRequest::TrialBalance { as_of } => {
                to_value(self.service.trial_balance(as_of).await?)?
            }
            ReportRequest::ProfitAndLoss { period, comparison } => {
                let mode = comparison.or(self.default_comparison);
                to_value(self.service.profit_and_loss_comparative(period, mode).await?)?
            }
            ReportRequest::BalanceSheet { period, comparison } => {
                let mode = comparison.or(self.default_comparison);
                to_value(self.service.balance_sheet_comparative(period, mode).await?)?
            }
            ReportRequest::VoucherRegister {
                account_id,
                period,
                group_by,
            } => to_value(
                self.service
                    .voucher_register(account_id, period, group_by)
                    .await?,
            )?,
        };

        Ok(ReportResponse { report, result })
    }

    /// Runs requests in order; a failed report yields its error body and
    /// does not stop the rest
    pub async fn handle_all(&self, requests: Vec<ReportRequest>) -> Vec<serde_json::Value> {
        let mut outputs = Vec::with_capacity(requests.len());
        for request in requests {
            let report = request.name();
            let output = match self.handle(request).await.and_then(to_value) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(report, error = %err, "Report failed");
                    serde_json::json!({ "report": report, "error": err.to_response() })
                }
            };
            outputs.push(output);
        }
        outputs
    }
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value, ReportError> {
    serde_json::to_value(value).map_err(|e| ReportError::Internal(e.to_string()))
}
