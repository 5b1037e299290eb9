//! Chart of accounts
//!
//! Account groups form the hierarchy the financial statements are drawn
//! from. Every group has exactly one [`AccountNature`], fixed at creation;
//! ledger accounts inherit the nature of the group they sit in.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{AccountGroupId, BalanceType, LedgerAccountId, PartyId};

/// Classification of an account group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountNature {
    /// Cash, receivables, inventory (debit increases)
    Asset,
    /// Payables, loans (credit increases)
    Liability,
    /// Capital, retained earnings (credit increases)
    Equity,
    /// Sales and other income (credit increases)
    Income,
    /// Purchases and running costs (debit increases)
    Expense,
}

impl AccountNature {
    pub const ALL: [AccountNature; 5] = [
        AccountNature::Asset,
        AccountNature::Liability,
        AccountNature::Equity,
        AccountNature::Income,
        AccountNature::Expense,
    ];

    /// Returns true if a debit is the natural increase for this nature
    pub fn is_debit_nature(&self) -> bool {
        matches!(self, AccountNature::Asset | AccountNature::Expense)
    }

    /// The side on which a balance of this nature normally sits
    pub fn natural_side(&self) -> BalanceType {
        if self.is_debit_nature() {
            BalanceType::Debit
        } else {
            BalanceType::Credit
        }
    }

    /// Asset, liability and equity groups appear on the balance sheet
    pub fn is_balance_sheet(&self) -> bool {
        matches!(
            self,
            AccountNature::Asset | AccountNature::Liability | AccountNature::Equity
        )
    }

    /// Income and expense groups appear on the profit & loss statement
    pub fn is_profit_and_loss(&self) -> bool {
        !self.is_balance_sheet()
    }
}

impl fmt::Display for AccountNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountNature::Asset => "asset",
            AccountNature::Liability => "liability",
            AccountNature::Equity => "equity",
            AccountNature::Income => "income",
            AccountNature::Expense => "expense",
        };
        write!(f, "{}", name)
    }
}

/// Split of expense groups used by a profit & loss with a gross profit line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseClass {
    /// Cost of sales, purchases, direct labour
    Direct,
    /// Rent, salaries, and other running costs
    Operating,
}

/// A node in the chart of accounts, stored as a flat parent-pointer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGroup {
    /// Unique identifier
    pub id: AccountGroupId,
    /// Group code (e.g., "1000")
    pub code: String,
    /// Group name
    pub name: String,
    /// Nature, fixed at creation
    pub nature: AccountNature,
    /// Parent group, None for a top-level group
    #[serde(default)]
    pub parent_id: Option<AccountGroupId>,
    /// Direct/operating split, inherited by child groups when unset
    #[serde(default)]
    pub expense_class: Option<ExpenseClass>,
}

impl AccountGroup {
    /// Creates a new top-level group
    pub fn new(
        id: AccountGroupId,
        code: impl Into<String>,
        name: impl Into<String>,
        nature: AccountNature,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            nature,
            parent_id: None,
            expense_class: None,
        }
    }

    /// Sets the parent group
    pub fn with_parent(mut self, parent_id: AccountGroupId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Marks the group as direct or operating expense
    pub fn with_expense_class(mut self, class: ExpenseClass) -> Self {
        self.expense_class = Some(class);
        self
    }
}

/// A ledger account postings are made against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Unique identifier
    pub id: LedgerAccountId,
    /// Account code (e.g., "1100")
    pub code: String,
    /// Account name
    pub name: String,
    /// Owning group; the account takes its nature from here
    pub group_id: AccountGroupId,
    /// Customer or supplier the account tracks, if any
    #[serde(default)]
    pub party_id: Option<PartyId>,
}

impl LedgerAccount {
    /// Creates a new ledger account
    pub fn new(
        id: LedgerAccountId,
        code: impl Into<String>,
        name: impl Into<String>,
        group_id: AccountGroupId,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            group_id,
            party_id: None,
        }
    }

    /// Links the account to a customer or supplier
    pub fn with_party(mut self, party_id: PartyId) -> Self {
        self.party_id = Some(party_id);
        self
    }
}
