//! Running balance calculation
//!
//! Every ledger-style report (account ledger, party statement, cash book)
//! folds an ordered list of postings over an opening balance. The fold lives
//! here once; reports only supply inputs and format the rows.
//!
//! # Sign convention
//!
//! Balances are magnitudes with a side. A posting on the balance's own side
//! grows it; a posting on the other side shrinks it, and when it is larger
//! than the balance the balance crosses over to the other side. A customer
//! who overpays moves from a debit receivable to a credit advance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Balance, BalanceType, Money};

use crate::account::AccountNature;
use crate::posting::Posting;

/// The account balance immediately after a posting
pub type RunningBalance = Balance;

/// Folds postings over an opening balance
pub struct RunningBalanceCalculator;

impl RunningBalanceCalculator {
    /// Computes the balance after each posting.
    ///
    /// The result has the same length and order as `postings`. Both sides of
    /// a posting may be populated; only their net matters. A posting with
    /// both sides zero carries the balance forward unchanged.
    pub fn compute(
        opening_amount: Money,
        opening_type: BalanceType,
        nature: AccountNature,
        postings: &[Posting],
    ) -> Vec<RunningBalance> {
        let is_debit_nature = nature.is_debit_nature();
        let natural_side = nature.natural_side();

        let mut balance = opening_amount.amount();
        let mut balance_type = opening_type;
        let mut rows = Vec::with_capacity(postings.len());

        for posting in postings {
            let (increase, decrease) = if is_debit_nature {
                (posting.debit.amount(), posting.credit.amount())
            } else {
                (posting.credit.amount(), posting.debit.amount())
            };

            if balance_type == natural_side {
                balance = balance + increase - decrease;
                if balance < Decimal::ZERO {
                    // crossed zero
                    balance_type = natural_side.flip();
                }
            } else if decrease > increase {
                balance = balance + decrease - increase;
            } else {
                let diff = increase - decrease;
                if diff > balance {
                    balance = diff - balance;
                    balance_type = natural_side;
                } else {
                    balance -= diff;
                }
            }

            balance = balance.abs();
            rows.push(Balance::new(Money::from_abs(balance), balance_type));
        }

        rows
    }

    /// Balance after the last posting, or the opening balance when there are none
    pub fn closing(opening: Balance, nature: AccountNature, postings: &[Posting]) -> Balance {
        Self::compute(opening.amount, opening.balance_type, nature, postings)
            .last()
            .copied()
            .unwrap_or(opening)
    }
}

/// One statement line: a posting and the balance after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    pub posting: Posting,
    pub balance: RunningBalance,
}

/// A ledger or party statement for one account over one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStatement {
    /// Balance brought forward
    pub opening: Balance,
    /// Postings in date order with their running balances
    pub rows: Vec<StatementRow>,
    /// Sum of the debit column
    pub total_debit: Money,
    /// Sum of the credit column
    pub total_credit: Money,
    /// Balance carried forward
    pub closing: Balance,
}

impl LedgerStatement {
    /// Builds the statement for postings already in date order
    pub fn build(opening: Balance, nature: AccountNature, postings: Vec<Posting>) -> Self {
        let balances = RunningBalanceCalculator::compute(
            opening.amount,
            opening.balance_type,
            nature,
            &postings,
        );
        let closing = balances.last().copied().unwrap_or(opening);
        let total_debit: Money = postings.iter().map(|p| p.debit).sum();
        let total_credit: Money = postings.iter().map(|p| p.credit).sum();

        let rows = postings
            .into_iter()
            .zip(balances)
            .map(|(posting, balance)| StatementRow { posting, balance })
            .collect();

        Self {
            opening,
            rows,
            total_debit,
            total_credit,
            closing,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
