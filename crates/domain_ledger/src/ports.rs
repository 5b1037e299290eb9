//! Ledger data ports
//!
//! The report engine reads its input through [`LedgerDataPort`]. A database
//! adapter, an external accounting system, or the in-memory snapshot below
//! can stand behind it; the computations never see the difference.
//!
//! # Contract
//!
//! - postings come back in ascending `(date, sequence)` order
//! - the opening balance as of a date covers every posting before that date
//! - the group tree arrives with natures resolved and cycles rejected

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Balance, DatePeriod, DomainPort, LedgerAccountId, PortError};

use crate::account::{AccountGroup, LedgerAccount};
use crate::error::LedgerError;
use crate::posting::{sort_postings, Posting};
use crate::rollup::AccountGroupTree;
use crate::running_balance::RunningBalanceCalculator;

/// Read-only feed the report engine depends on
#[async_trait]
pub trait LedgerDataPort: DomainPort {
    /// Postings of one account inside the period, in date order
    async fn fetch_postings(
        &self,
        account_id: LedgerAccountId,
        period: DatePeriod,
    ) -> Result<Vec<Posting>, PortError>;

    /// Balance of the account before any posting dated `as_of` or later
    async fn fetch_opening_balance(
        &self,
        account_id: LedgerAccountId,
        as_of: NaiveDate,
    ) -> Result<Balance, PortError>;

    /// The chart of accounts with ledger accounts attached
    async fn fetch_account_group_tree(&self) -> Result<AccountGroupTree, PortError>;

    /// Balance the account was brought into the books with, before any
    /// posting. Sources that do not record when it was brought forward
    /// leave `date` empty.
    async fn fetch_base_opening(
        &self,
        account_id: LedgerAccountId,
    ) -> Result<OpeningEntry, PortError> {
        let balance = self.fetch_opening_balance(account_id, NaiveDate::MIN).await?;
        Ok(OpeningEntry {
            account_id,
            balance,
            date: None,
        })
    }
}

/// An account's balance at the start of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningEntry {
    pub account_id: LedgerAccountId,
    pub balance: Balance,
    /// Day the balance was brought forward; aging counts from here
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Everything a report needs, as one serialisable document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub groups: Vec<AccountGroup>,
    #[serde(default)]
    pub accounts: Vec<LedgerAccount>,
    #[serde(default)]
    pub opening_balances: Vec<OpeningEntry>,
    /// Postings; each must name its account
    #[serde(default)]
    pub postings: Vec<Posting>,
}

/// Adapter serving a [`LedgerSnapshot`] from memory
#[derive(Debug, Clone)]
pub struct InMemoryLedgerData {
    tree: AccountGroupTree,
    opening_balances: Vec<OpeningEntry>,
    postings: Vec<Posting>,
}

impl InMemoryLedgerData {
    /// Validates the snapshot and orders its postings.
    ///
    /// # Errors
    ///
    /// Fails when the chart of accounts is malformed or a posting names no
    /// account or an unknown one.
    pub fn new(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        let tree = AccountGroupTree::build(snapshot.groups, snapshot.accounts)?;

        for posting in &snapshot.postings {
            let account_id = posting.account_id.ok_or_else(|| {
                LedgerError::InvalidPosting(format!(
                    "{} has no ledger account",
                    posting.voucher_reference
                ))
            })?;
            if tree.group_of_account(account_id).is_none() {
                return Err(LedgerError::AccountNotFound(account_id.to_string()));
            }
        }
        for entry in &snapshot.opening_balances {
            if tree.group_of_account(entry.account_id).is_none() {
                return Err(LedgerError::AccountNotFound(entry.account_id.to_string()));
            }
        }

        let mut postings = snapshot.postings;
        sort_postings(&mut postings);

        tracing::info!(
            groups = tree.len(),
            postings = postings.len(),
            "Loaded in-memory ledger snapshot"
        );

        Ok(Self {
            tree,
            opening_balances: snapshot.opening_balances,
            postings,
        })
    }

    fn base_opening(&self, account_id: LedgerAccountId) -> Option<&OpeningEntry> {
        self.opening_balances
            .iter()
            .find(|entry| entry.account_id == account_id)
    }
}

impl DomainPort for InMemoryLedgerData {}

#[async_trait]
impl LedgerDataPort for InMemoryLedgerData {
    async fn fetch_postings(
        &self,
        account_id: LedgerAccountId,
        period: DatePeriod,
    ) -> Result<Vec<Posting>, PortError> {
        Ok(self
            .postings
            .iter()
            .filter(|p| p.account_id == Some(account_id) && period.contains(p.date))
            .cloned()
            .collect())
    }

    async fn fetch_opening_balance(
        &self,
        account_id: LedgerAccountId,
        as_of: NaiveDate,
    ) -> Result<Balance, PortError> {
        let nature = self
            .tree
            .nature_of_account(account_id)
            .ok_or_else(|| PortError::not_found("LedgerAccount", account_id))?;
        let base = self
            .base_opening(account_id)
            .map(|entry| entry.balance)
            .unwrap_or_else(|| Balance::zero(nature.natural_side()));

        let earlier: Vec<Posting> = self
            .postings
            .iter()
            .filter(|p| p.account_id == Some(account_id) && p.date < as_of)
            .cloned()
            .collect();

        Ok(RunningBalanceCalculator::closing(base, nature, &earlier))
    }

    async fn fetch_account_group_tree(&self) -> Result<AccountGroupTree, PortError> {
        Ok(self.tree.clone())
    }

    async fn fetch_base_opening(
        &self,
        account_id: LedgerAccountId,
    ) -> Result<OpeningEntry, PortError> {
        if let Some(entry) = self.base_opening(account_id) {
            return Ok(entry.clone());
        }
        let nature = self
            .tree
            .nature_of_account(account_id)
            .ok_or_else(|| PortError::not_found("LedgerAccount", account_id))?;
        Ok(OpeningEntry {
            account_id,
            balance: Balance::zero(nature.natural_side()),
            date: None,
        })
    }
}
