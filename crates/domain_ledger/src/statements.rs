//! Financial statement figures
//!
//! The headline numbers of the profit & loss, balance sheet, and trial
//! balance, derived from a [`GroupRollup`] or from per-account balances.
//! Figures are signed: a negative net profit is a loss.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;

use core_kernel::{Balance, LedgerAccountId, Money};

use crate::account::{AccountNature, ExpenseClass};
use crate::rollup::{AccountGroupTree, GroupRollup};

/// Default tolerance for the balance sheet identity, in currency units
pub const BALANCE_TOLERANCE: Decimal = dec!(0.01);

/// Profit & loss headline figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfitAndLoss {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Present only when the direct/operating split is requested
    pub total_direct_expense: Option<Decimal>,
    pub total_operating_expense: Option<Decimal>,
    pub gross_profit: Option<Decimal>,
    pub net_profit: Decimal,
}

impl ProfitAndLoss {
    /// `net_profit = total_income - total_expense`
    pub fn new(total_income: Decimal, total_expense: Decimal) -> Self {
        Self {
            total_income,
            total_expense,
            total_direct_expense: None,
            total_operating_expense: None,
            gross_profit: None,
            net_profit: total_income - total_expense,
        }
    }

    /// `gross_profit = total_income - direct`, `net_profit = gross_profit - operating`
    pub fn with_split(total_income: Decimal, direct: Decimal, operating: Decimal) -> Self {
        let gross_profit = total_income - direct;
        Self {
            total_income,
            total_expense: direct + operating,
            total_direct_expense: Some(direct),
            total_operating_expense: Some(operating),
            gross_profit: Some(gross_profit),
            net_profit: gross_profit - operating,
        }
    }

    /// Reads the figures off a rollup of income and expense groups
    pub fn from_rollup(rollup: &GroupRollup, split_expenses: bool) -> Self {
        let income = rollup.nature_total(AccountNature::Income);
        if split_expenses {
            Self::with_split(
                income,
                rollup.expense_class_total(ExpenseClass::Direct),
                rollup.expense_class_total(ExpenseClass::Operating),
            )
        } else {
            Self::new(income, rollup.nature_total(AccountNature::Expense))
        }
    }

    pub fn is_loss(&self) -> bool {
        self.net_profit < Decimal::ZERO
    }
}

/// Balance sheet headline figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    /// Profit not yet closed to equity
    pub net_profit: Decimal,
    pub total_liabilities_and_equity: Decimal,
}

impl BalanceSheet {
    pub fn new(
        total_assets: Decimal,
        total_liabilities: Decimal,
        total_equity: Decimal,
        net_profit: Decimal,
    ) -> Self {
        Self {
            total_assets,
            total_liabilities,
            total_equity,
            net_profit,
            total_liabilities_and_equity: total_liabilities + total_equity + net_profit,
        }
    }

    /// Reads the figures off a rollup of asset, liability and equity groups
    pub fn from_rollup(rollup: &GroupRollup, net_profit: Decimal) -> Self {
        Self::new(
            rollup.nature_total(AccountNature::Asset),
            rollup.nature_total(AccountNature::Liability),
            rollup.nature_total(AccountNature::Equity),
            net_profit,
        )
    }

    /// Assets minus liabilities, equity and profit
    pub fn difference(&self) -> Decimal {
        self.total_assets - self.total_liabilities_and_equity
    }

    /// True when both sides agree exactly or differ by less than `tolerance`
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        let difference = self.difference().abs();
        difference.is_zero() || difference < tolerance
    }
}

/// One account on the trial balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceLine {
    pub account_id: LedgerAccountId,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub debit: Money,
    pub credit: Money,
}

/// Trial balance of closing balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    pub lines: Vec<TrialBalanceLine>,
    pub total_debit: Money,
    pub total_credit: Money,
}

impl TrialBalance {
    /// Lists every account of the tree with its closing balance.
    ///
    /// Accounts missing from `balances` are zero and, like other zero
    /// accounts, only listed when `show_zero_balances` is set. Totals are
    /// the same either way.
    pub fn from_balances(
        tree: &AccountGroupTree,
        balances: &HashMap<LedgerAccountId, Balance>,
        show_zero_balances: bool,
    ) -> Self {
        let mut lines = Vec::new();
        let mut total_debit = Money::zero();
        let mut total_credit = Money::zero();

        for account in tree.all_accounts() {
            let nature = tree
                .nature_of_account(account.id)
                .unwrap_or(AccountNature::Asset);
            let balance = balances
                .get(&account.id)
                .copied()
                .unwrap_or_else(|| Balance::zero(nature.natural_side()));
            let (debit, credit) = balance.columns();
            total_debit = total_debit + debit;
            total_credit = total_credit + credit;

            if show_zero_balances || !balance.is_zero() {
                lines.push(TrialBalanceLine {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    nature,
                    debit,
                    credit,
                });
            }
        }

        Self {
            lines,
            total_debit,
            total_credit,
        }
    }

    pub fn difference(&self) -> Decimal {
        self.total_debit.signed_difference(&self.total_credit)
    }

    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_profit_without_split() {
        let pnl = ProfitAndLoss::new(dec!(1000), dec!(700));
        assert_eq!(pnl.net_profit, dec!(300));
        assert!(pnl.gross_profit.is_none());
    }

    #[test]
    fn test_gross_and_net_profit_with_split() {
        let pnl = ProfitAndLoss::with_split(dec!(1000), dec!(400), dec!(250));
        assert_eq!(pnl.gross_profit, Some(dec!(600)));
        assert_eq!(pnl.net_profit, dec!(350));
        assert_eq!(pnl.total_expense, dec!(650));
    }

    #[test]
    fn test_loss() {
        let pnl = ProfitAndLoss::new(dec!(100), dec!(150));
        assert!(pnl.is_loss());
    }

    #[test]
    fn test_balance_sheet_identity() {
        let sheet = BalanceSheet::new(dec!(5000), dec!(1500), dec!(3000), dec!(500));
        assert_eq!(sheet.total_liabilities_and_equity, dec!(5000));
        assert!(sheet.is_balanced(BALANCE_TOLERANCE));

        let off = BalanceSheet::new(dec!(5000.01), dec!(1500), dec!(3000), dec!(500));
        assert!(!off.is_balanced(BALANCE_TOLERANCE));
    }

    #[test]
    fn test_zero_tolerance_accepts_exact_match() {
        let sheet = BalanceSheet::new(dec!(200), dec!(50), dec!(150), Decimal::ZERO);
        assert!(sheet.is_balanced(Decimal::ZERO));

        let near = BalanceSheet::new(dec!(200.001), dec!(50), dec!(150), Decimal::ZERO);
        assert!(!near.is_balanced(Decimal::ZERO));
        assert!(near.is_balanced(BALANCE_TOLERANCE));
    }
}
