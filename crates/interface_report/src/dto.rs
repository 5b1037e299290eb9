//! Report request and response documents

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{DatePeriod, LedgerAccountId, PartyId};
use domain_ledger::{AgingSide, ComparisonMode, GroupKey, LedgerSnapshot};

/// A report to run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum ReportRequest {
    LedgerStatement {
        account_id: LedgerAccountId,
        period: DatePeriod,
    },
    Aging {
        /// Receivables unless stated
        #[serde(default)]
        side: AgingSide,
        /// Empty ages every party account of the side
        #[serde(default)]
        party_ids: Vec<PartyId>,
        period: DatePeriod,
    },
    TrialBalance {
        as_of: NaiveDate,
    },
    ProfitAndLoss {
        period: DatePeriod,
        #[serde(default)]
        comparison: Option<ComparisonMode>,
    },
    BalanceSheet {
        period: DatePeriod,
        #[serde(default)]
        comparison: Option<ComparisonMode>,
    },
    VoucherRegister {
        account_id: LedgerAccountId,
        period: DatePeriod,
        #[serde(default)]
        group_by: Option<GroupKey>,
    },
}

impl ReportRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ReportRequest::LedgerStatement { .. } => "ledger_statement",
            ReportRequest::Aging { .. } => "aging",
            ReportRequest::TrialBalance { .. } => "trial_balance",
            ReportRequest::ProfitAndLoss { .. } => "profit_and_loss",
            ReportRequest::BalanceSheet { .. } => "balance_sheet",
            ReportRequest::VoucherRegister { .. } => "voucher_register",
        }
    }
}

/// Input file of the `ledger-report` command: a ledger plus the reports to run
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDocument {
    pub ledger: LedgerSnapshot,
    pub requests: Vec<ReportRequest>,
}

/// One report's output
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: &'static str,
    pub result: serde_json::Value,
}
