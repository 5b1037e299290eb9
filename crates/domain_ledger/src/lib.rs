//! Ledger Reporting Domain
//!
//! This crate turns ledger postings into the figures accounting reports
//! show: running balances, receivable and payable aging, group rollups,
//! and the profit & loss, balance sheet, and trial balance built on them.
//!
//! # Balance Direction
//!
//! Balances are a non-negative amount plus a side (Debit or Credit). Each
//! account's nature decides its natural side:
//! - Asset and Expense accounts grow with debits
//! - Liability, Equity and Income accounts grow with credits
//!
//! A balance that ends on the opposite side (an overdrawn bank account, an
//! advance from a customer) is a contra balance and subtracts from its
//! group's total.
//!
//! # Components
//!
//! - [`RunningBalanceCalculator`]: per-posting running balances
//! - [`AgingBucketizer`]: outstanding items into age ranges
//! - [`PeriodRollupAggregator`]: account balances up the group tree
//! - [`ComparativePeriodResolver`]: the period a report compares against
//! - [`ReportService`]: runs the above over a [`LedgerDataPort`]
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{InMemoryLedgerData, ReportService, ReportSettings};
//!
//! let data = InMemoryLedgerData::new(snapshot)?;
//! let service = ReportService::new(Arc::new(data), ReportSettings::default());
//!
//! let statement = service.ledger_statement(bank_account, january).await?;
//! println!("closing {}", statement.closing);
//! ```

pub mod account;
pub mod aging;
pub mod comparative;
pub mod error;
pub mod ports;
pub mod posting;
pub mod rollup;
pub mod running_balance;
pub mod service;
pub mod statements;
pub mod voucher;

pub use account::{AccountGroup, AccountNature, ExpenseClass, LedgerAccount};
pub use aging::{
    outstanding_items_from_postings, AgedItem, AgingBoundaries, AgingBucket, AgingBucketizer,
    AgingReport, AgingSide, BucketTotal, OpenItems, OutstandingItem, PartyAging,
    OPENING_BALANCE_REFERENCE,
};
pub use comparative::{ComparativePeriodResolver, ComparisonMode};
pub use error::LedgerError;
pub use ports::{InMemoryLedgerData, LedgerDataPort, LedgerSnapshot, OpeningEntry};
pub use posting::{ensure_ordered, sort_postings, Posting};
pub use rollup::{
    AccountGroupTree, AccountLine, GroupIndex, GroupRollup, GroupTotal, PeriodRollupAggregator,
};
pub use running_balance::{LedgerStatement, RunningBalance, RunningBalanceCalculator, StatementRow};
pub use service::{
    BalanceSheetReport, Comparative, ProfitAndLossReport, ReportService, ReportSettings,
};
pub use statements::{BalanceSheet, ProfitAndLoss, TrialBalance, TrialBalanceLine, BALANCE_TOLERANCE};
pub use voucher::{vouchers_from_postings, GroupKey, Voucher, VoucherListing};
