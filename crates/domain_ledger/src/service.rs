//! Report service
//!
//! Thin adapters between the data port and the calculators. Each operation
//! fetches its input, runs one of the pure computations, and returns a
//! complete result. Nothing is cached between calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::{Balance, DatePeriod, LedgerAccountId, PartyId, TemporalError};

use crate::account::AccountNature;
use crate::aging::{
    outstanding_items_from_postings, AgingBoundaries, AgingBucketizer, AgingReport, AgingSide,
    OPENING_BALANCE_REFERENCE,
};
use crate::comparative::{ComparativePeriodResolver, ComparisonMode};
use crate::error::LedgerError;
use crate::ports::LedgerDataPort;
use crate::posting::Posting;
use crate::rollup::{AccountGroupTree, GroupTotal, PeriodRollupAggregator};
use crate::running_balance::{LedgerStatement, RunningBalanceCalculator};
use crate::statements::{BalanceSheet, ProfitAndLoss, TrialBalance, BALANCE_TOLERANCE};
use crate::voucher::{vouchers_from_postings, GroupKey, VoucherListing};

const BALANCE_SHEET_NATURES: [AccountNature; 3] = [
    AccountNature::Asset,
    AccountNature::Liability,
    AccountNature::Equity,
];

const PROFIT_AND_LOSS_NATURES: [AccountNature; 2] = [AccountNature::Income, AccountNature::Expense];

/// Options every report shares
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub aging_boundaries: AgingBoundaries,
    pub show_zero_balances: bool,
    pub balance_tolerance: Decimal,
    /// Show gross profit by splitting direct and operating expenses
    pub split_expenses: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            aging_boundaries: AgingBoundaries::default(),
            show_zero_balances: false,
            balance_tolerance: BALANCE_TOLERANCE,
            split_expenses: false,
        }
    }
}

/// A report next to its comparison column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparative<T> {
    pub current: T,
    pub previous: Option<T>,
}

/// Profit & loss for a period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitAndLossReport {
    pub period: DatePeriod,
    /// Income and expense groups to display
    pub groups: Vec<GroupTotal>,
    pub figures: ProfitAndLoss,
}

/// Balance sheet at a date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheetReport {
    pub as_of: NaiveDate,
    /// Asset, liability and equity groups to display
    pub groups: Vec<GroupTotal>,
    pub figures: BalanceSheet,
    pub is_balanced: bool,
}

/// Computes reports from a ledger data port
pub struct ReportService<P: LedgerDataPort> {
    port: Arc<P>,
    settings: ReportSettings,
}

impl<P: LedgerDataPort> ReportService<P> {
    pub fn new(port: Arc<P>, settings: ReportSettings) -> Self {
        Self { port, settings }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Ledger of one account with running balances
    #[tracing::instrument(skip(self))]
    pub async fn ledger_statement(
        &self,
        account_id: LedgerAccountId,
        period: DatePeriod,
    ) -> Result<LedgerStatement, LedgerError> {
        let tree = self.port.fetch_account_group_tree().await?;
        let nature = tree
            .nature_of_account(account_id)
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))?;

        let opening = self.port.fetch_opening_balance(account_id, period.start).await?;
        let postings = self.port.fetch_postings(account_id, period).await?;
        crate::posting::ensure_ordered(&postings)?;

        let statement = LedgerStatement::build(opening, nature, postings);
        tracing::info!(
            rows = statement.rows.len(),
            closing = %statement.closing,
            "Built ledger statement"
        );
        Ok(statement)
    }

    /// Aging of one side of the party ledger as at `period.end`.
    ///
    /// Open items come from every posting up to `period.end`, so each keeps
    /// its own posting or due date and the result does not depend on
    /// `period.start`. The balance an account was brought into the books with
    /// is aged from the day it was brought forward, or from the account's
    /// first posting when the source does not record that day. An empty
    /// `party_ids` ages every party account of the side.
    #[tracing::instrument(skip(self))]
    pub async fn aging_report(
        &self,
        side: AgingSide,
        party_ids: &[PartyId],
        period: DatePeriod,
    ) -> Result<AgingReport, LedgerError> {
        let tree = self.port.fetch_account_group_tree().await?;
        let accounts: Vec<_> = tree
            .all_accounts()
            .filter(|account| tree.nature_of_account(account.id) == Some(side.nature()))
            .filter_map(|account| {
                let party_id = account.party_id?;
                (party_ids.is_empty() || party_ids.contains(&party_id))
                    .then_some((account.id, party_id))
            })
            .collect();

        let mut items = Vec::new();
        for (account_id, party_id) in accounts {
            let base = self.port.fetch_base_opening(account_id).await?;
            let history = self
                .port
                .fetch_postings(account_id, DatePeriod::through(period.end))
                .await?;
            crate::posting::ensure_ordered(&history)?;

            let mut postings = Vec::with_capacity(history.len() + 1);
            if !base.balance.is_zero() {
                let brought_forward = base
                    .date
                    .or_else(|| history.first().map(|p| p.date))
                    .unwrap_or(period.end);
                let (debit, credit) = base.balance.columns();
                postings.push(Posting::new(
                    brought_forward,
                    debit,
                    credit,
                    OPENING_BALANCE_REFERENCE,
                ));
            }
            postings.extend(history);

            let open = outstanding_items_from_postings(&postings, side.nature());
            if open.unapplied.is_positive() {
                tracing::debug!(
                    %party_id,
                    unapplied = %open.unapplied,
                    "Party holds an unapplied advance"
                );
            }
            items.extend(open.items.into_iter().map(|mut item| {
                item.party_id = Some(party_id);
                item
            }));
        }

        let bucketizer = AgingBucketizer::new(self.settings.aging_boundaries.clone());
        Ok(bucketizer.bucketize(period.end, None, &items))
    }

    /// Closing balances of every account as at `as_of`
    #[tracing::instrument(skip(self))]
    pub async fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalance, LedgerError> {
        let tree = self.port.fetch_account_group_tree().await?;
        let balances = self.closing_balances(&tree, as_of).await?;
        let trial_balance =
            TrialBalance::from_balances(&tree, &balances, self.settings.show_zero_balances);

        if !trial_balance.is_balanced() {
            tracing::warn!(
                difference = %trial_balance.difference(),
                "Trial balance does not agree"
            );
        }
        Ok(trial_balance)
    }

    /// Income and expense movements over a period
    #[tracing::instrument(skip(self))]
    pub async fn profit_and_loss(
        &self,
        period: DatePeriod,
    ) -> Result<ProfitAndLossReport, LedgerError> {
        let tree = self.port.fetch_account_group_tree().await?;
        let movements = self.period_movements(&tree, period).await?;
        let rollup = PeriodRollupAggregator::rollup_balances(&tree, &movements);
        let figures = ProfitAndLoss::from_rollup(&rollup, self.settings.split_expenses);

        let groups = rollup
            .visible(self.settings.show_zero_balances)
            .filter(|row| PROFIT_AND_LOSS_NATURES.contains(&row.nature))
            .cloned()
            .collect();

        Ok(ProfitAndLossReport {
            period,
            groups,
            figures,
        })
    }

    /// Asset, liability and equity positions at a date
    #[tracing::instrument(skip(self))]
    pub async fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport, LedgerError> {
        let tree = self.port.fetch_account_group_tree().await?;
        let balances = self.closing_balances(&tree, as_of).await?;
        let rollup = PeriodRollupAggregator::rollup_balances(&tree, &balances);

        // profit not yet closed to equity: income and expense since inception
        let net_profit = ProfitAndLoss::from_rollup(&rollup, false).net_profit;
        let figures = BalanceSheet::from_rollup(&rollup, net_profit);
        let is_balanced = figures.is_balanced(self.settings.balance_tolerance);
        if !is_balanced {
            tracing::warn!(
                difference = %figures.difference(),
                "Balance sheet does not balance"
            );
        }

        let groups = rollup
            .visible(self.settings.show_zero_balances)
            .filter(|row| BALANCE_SHEET_NATURES.contains(&row.nature))
            .cloned()
            .collect();

        Ok(BalanceSheetReport {
            as_of,
            groups,
            figures,
            is_balanced,
        })
    }

    /// Profit & loss with a comparison column
    pub async fn profit_and_loss_comparative(
        &self,
        period: DatePeriod,
        mode: Option<ComparisonMode>,
    ) -> Result<Comparative<ProfitAndLossReport>, LedgerError> {
        let current = self.profit_and_loss(period).await?;
        let previous = match mode {
            Some(mode) => {
                let previous_period = ComparativePeriodResolver::resolve(period, mode)?;
                Some(self.profit_and_loss(previous_period).await?)
            }
            None => None,
        };
        Ok(Comparative { current, previous })
    }

    /// Balance sheet at `period.end` with a comparison column at the end of
    /// the resolved comparison period
    pub async fn balance_sheet_comparative(
        &self,
        period: DatePeriod,
        mode: Option<ComparisonMode>,
    ) -> Result<Comparative<BalanceSheetReport>, LedgerError> {
        let current = self.balance_sheet(period.end).await?;
        let previous = match mode {
            Some(mode) => {
                let previous_period = ComparativePeriodResolver::resolve(period, mode)?;
                Some(self.balance_sheet(previous_period.end).await?)
            }
            None => None,
        };
        Ok(Comparative { current, previous })
    }

    /// Vouchers posted to an account, flat or grouped
    #[tracing::instrument(skip(self))]
    pub async fn voucher_register(
        &self,
        account_id: LedgerAccountId,
        period: DatePeriod,
        key: Option<GroupKey>,
    ) -> Result<VoucherListing, LedgerError> {
        let tree = self.port.fetch_account_group_tree().await?;
        if tree.group_of_account(account_id).is_none() {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }

        let postings = self.port.fetch_postings(account_id, period).await?;
        let listing = VoucherListing::build(vouchers_from_postings(&postings), key);
        tracing::debug!(vouchers = listing.len(), "Built voucher register");
        Ok(listing)
    }

    async fn closing_balances(
        &self,
        tree: &AccountGroupTree,
        as_of: NaiveDate,
    ) -> Result<HashMap<LedgerAccountId, Balance>, LedgerError> {
        let day_after = as_of
            .succ_opt()
            .ok_or_else(|| TemporalError::OutOfRange(as_of.to_string()))?;

        let mut balances = HashMap::new();
        for account in tree.all_accounts() {
            let balance = self.port.fetch_opening_balance(account.id, day_after).await?;
            balances.insert(account.id, balance);
        }
        Ok(balances)
    }

    async fn period_movements(
        &self,
        tree: &AccountGroupTree,
        period: DatePeriod,
    ) -> Result<HashMap<LedgerAccountId, Balance>, LedgerError> {
        let mut movements = HashMap::new();
        for account in tree.all_accounts() {
            let nature = tree
                .nature_of_account(account.id)
                .ok_or_else(|| LedgerError::AccountNotFound(account.id.to_string()))?;
            let postings = self.port.fetch_postings(account.id, period).await?;
            let movement = RunningBalanceCalculator::closing(
                Balance::zero(nature.natural_side()),
                nature,
                &postings,
            );
            movements.insert(account.id, movement);
        }
        Ok(movements)
    }
}
