//! Account group hierarchy and balance rollups
//!
//! The chart of accounts arrives as flat parent-pointer records. It is
//! rebuilt per request into an arena ([`AccountGroupTree`]) whose nodes refer
//! to each other by [`GroupIndex`], so no node owns another and cycles in the
//! stored data are caught while building instead of looping at report time.
//!
//! [`PeriodRollupAggregator`] then sums ledger account balances bottom-up:
//! a node's total is its own accounts plus the totals of its children.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use core_kernel::{AccountGroupId, Balance, LedgerAccountId, Money};

use crate::account::{AccountGroup, AccountNature, ExpenseClass, LedgerAccount};
use crate::error::LedgerError;

/// Stable handle of a node inside an [`AccountGroupTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIndex(usize);

impl GroupIndex {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct GroupNode {
    group: AccountGroup,
    parent: Option<GroupIndex>,
    children: Vec<GroupIndex>,
    accounts: Vec<LedgerAccount>,
}

/// The chart of accounts as an arena-indexed forest
#[derive(Debug, Clone)]
pub struct AccountGroupTree {
    nodes: Vec<GroupNode>,
    roots: Vec<GroupIndex>,
    by_id: HashMap<AccountGroupId, GroupIndex>,
    account_groups: HashMap<LedgerAccountId, GroupIndex>,
}

impl AccountGroupTree {
    /// Builds the tree from flat records.
    ///
    /// # Errors
    ///
    /// - a group id or ledger account id appears twice
    /// - a parent pointer or an account's group refers to nothing
    /// - a child group's nature differs from its parent's
    /// - parent pointers form a cycle
    pub fn build(
        groups: Vec<AccountGroup>,
        accounts: Vec<LedgerAccount>,
    ) -> Result<Self, LedgerError> {
        let mut by_id = HashMap::with_capacity(groups.len());
        let mut nodes = Vec::with_capacity(groups.len());

        for group in groups {
            let index = GroupIndex(nodes.len());
            if by_id.insert(group.id, index).is_some() {
                return Err(LedgerError::DuplicateGroup(group.id.to_string()));
            }
            nodes.push(GroupNode {
                group,
                parent: None,
                children: Vec::new(),
                accounts: Vec::new(),
            });
        }

        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            let Some(parent_id) = nodes[i].group.parent_id else {
                roots.push(GroupIndex(i));
                continue;
            };
            let parent = *by_id.get(&parent_id).ok_or_else(|| LedgerError::UnknownParentGroup {
                group: nodes[i].group.id.to_string(),
                parent: parent_id.to_string(),
            })?;
            let (nature, parent_nature) = (nodes[i].group.nature, nodes[parent.0].group.nature);
            if nature != parent_nature {
                return Err(LedgerError::NatureMismatch {
                    group: nodes[i].group.id.to_string(),
                    nature: nature.to_string(),
                    parent_nature: parent_nature.to_string(),
                });
            }
            nodes[i].parent = Some(parent);
            nodes[parent.0].children.push(GroupIndex(i));
        }

        // Every group has at most one parent, so a group that cannot be
        // reached from a root sits on (or under) a cycle.
        let mut visited = HashSet::with_capacity(nodes.len());
        let mut stack: Vec<GroupIndex> = roots.clone();
        while let Some(index) = stack.pop() {
            if !visited.insert(index) {
                return Err(LedgerError::CyclicGroupHierarchy(
                    nodes[index.0].group.id.to_string(),
                ));
            }
            stack.extend(nodes[index.0].children.iter().copied());
        }
        if let Some(stranded) = (0..nodes.len()).find(|i| !visited.contains(&GroupIndex(*i))) {
            return Err(LedgerError::CyclicGroupHierarchy(
                nodes[stranded].group.id.to_string(),
            ));
        }

        let mut account_groups = HashMap::with_capacity(accounts.len());
        for account in accounts {
            let index = *by_id
                .get(&account.group_id)
                .ok_or_else(|| LedgerError::UnknownGroup(account.group_id.to_string()))?;
            if account_groups.insert(account.id, index).is_some() {
                return Err(LedgerError::DuplicateAccount(account.id.to_string()));
            }
            nodes[index.0].accounts.push(account);
        }

        tracing::debug!(
            groups = nodes.len(),
            roots = roots.len(),
            accounts = account_groups.len(),
            "Built account group tree"
        );

        Ok(Self {
            nodes,
            roots,
            by_id,
            account_groups,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level groups in input order
    pub fn roots(&self) -> &[GroupIndex] {
        &self.roots
    }

    pub fn group(&self, index: GroupIndex) -> &AccountGroup {
        &self.nodes[index.0].group
    }

    pub fn parent(&self, index: GroupIndex) -> Option<GroupIndex> {
        self.nodes[index.0].parent
    }

    pub fn children(&self, index: GroupIndex) -> &[GroupIndex] {
        &self.nodes[index.0].children
    }

    /// Ledger accounts directly under the group
    pub fn accounts(&self, index: GroupIndex) -> &[LedgerAccount] {
        &self.nodes[index.0].accounts
    }

    pub fn find(&self, id: AccountGroupId) -> Option<GroupIndex> {
        self.by_id.get(&id).copied()
    }

    /// Group a ledger account sits in
    pub fn group_of_account(&self, account_id: LedgerAccountId) -> Option<GroupIndex> {
        self.account_groups.get(&account_id).copied()
    }

    pub fn account(&self, account_id: LedgerAccountId) -> Option<&LedgerAccount> {
        let index = self.group_of_account(account_id)?;
        self.accounts(index).iter().find(|a| a.id == account_id)
    }

    /// Nature a ledger account inherits from its group
    pub fn nature_of_account(&self, account_id: LedgerAccountId) -> Option<AccountNature> {
        self.group_of_account(account_id)
            .map(|index| self.group(index).nature)
    }

    /// Every ledger account in the tree, in pre-order of their groups
    pub fn all_accounts(&self) -> impl Iterator<Item = &LedgerAccount> {
        self.pre_order()
            .into_iter()
            .flat_map(move |index| self.accounts(index).iter())
    }

    /// Expense class of a group, inherited from the nearest classified ancestor
    pub fn expense_class(&self, index: GroupIndex) -> Option<ExpenseClass> {
        let mut current = Some(index);
        while let Some(i) = current {
            if let Some(class) = self.group(i).expense_class {
                return Some(class);
            }
            current = self.parent(i);
        }
        None
    }

    /// Nodes ordered parents first
    pub fn pre_order(&self) -> Vec<GroupIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<GroupIndex> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.children(index).iter().rev().copied());
        }
        order
    }

    /// Nodes ordered children first
    pub fn post_order(&self) -> Vec<GroupIndex> {
        let mut order = self.pre_order();
        order.reverse();
        order
    }

    /// Distance from the node's root
    pub fn depth(&self, index: GroupIndex) -> usize {
        let mut depth = 0;
        let mut current = self.parent(index);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }
}

/// One ledger account's line in a rollup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLine {
    pub account_id: LedgerAccountId,
    pub code: String,
    pub name: String,
    pub balance: Balance,
}

/// A group's aggregated balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub group_id: AccountGroupId,
    pub parent_id: Option<AccountGroupId>,
    pub code: String,
    pub name: String,
    pub nature: AccountNature,
    pub expense_class: Option<ExpenseClass>,
    pub depth: usize,
    /// Own accounts plus every descendant group
    pub balance: Balance,
    /// Ledger accounts directly under this group
    pub accounts: Vec<AccountLine>,
}

impl GroupTotal {
    /// Total as a signed figure on the group's natural side
    pub fn signed(&self) -> Decimal {
        self.balance.signed_for(self.nature.natural_side())
    }

    /// Account lines to display, honouring the zero-balance filter
    pub fn visible_accounts(&self, show_zero_balances: bool) -> impl Iterator<Item = &AccountLine> {
        self.accounts
            .iter()
            .filter(move |line| show_zero_balances || !line.balance.is_zero())
    }
}

/// Aggregated balances for every group of a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRollup {
    /// Groups parents first, children in input order
    rows: Vec<GroupTotal>,
    #[serde(skip)]
    index: HashMap<AccountGroupId, usize>,
}

impl GroupRollup {
    pub fn rows(&self) -> &[GroupTotal] {
        &self.rows
    }

    /// Rows to display. Filtering never changes any total.
    pub fn visible(&self, show_zero_balances: bool) -> impl Iterator<Item = &GroupTotal> {
        self.rows
            .iter()
            .filter(move |row| show_zero_balances || !row.balance.is_zero())
    }

    pub fn total_of(&self, group_id: AccountGroupId) -> Option<&GroupTotal> {
        self.index.get(&group_id).map(|&i| &self.rows[i])
    }

    /// Signed total of all top-level groups of a nature
    pub fn nature_total(&self, nature: AccountNature) -> Decimal {
        self.rows
            .iter()
            .filter(|row| row.depth == 0 && row.nature == nature)
            .map(GroupTotal::signed)
            .sum()
    }

    /// Signed total of expense accounts in groups of the given class.
    ///
    /// Unclassified expense groups count as operating.
    pub fn expense_class_total(&self, class: ExpenseClass) -> Decimal {
        self.rows
            .iter()
            .filter(|row| row.nature == AccountNature::Expense)
            .filter(|row| row.expense_class.unwrap_or(ExpenseClass::Operating) == class)
            .flat_map(|row| row.accounts.iter())
            .map(|line| line.balance.signed_for(AccountNature::Expense.natural_side()))
            .sum()
    }

    /// Rows belonging to the given natures (e.g., the balance sheet groups)
    pub fn rows_of<'a>(
        &'a self,
        natures: &'a [AccountNature],
    ) -> impl Iterator<Item = &'a GroupTotal> + 'a {
        self.rows.iter().filter(move |row| natures.contains(&row.nature))
    }
}

/// Sums ledger account balances bottom-up through a group tree
pub struct PeriodRollupAggregator;

impl PeriodRollupAggregator {
    /// Rolls up natural-side magnitudes (e.g., period movements).
    ///
    /// Accounts missing from `leaf_balances` count as zero.
    pub fn rollup(
        tree: &AccountGroupTree,
        leaf_balances: &HashMap<LedgerAccountId, Money>,
    ) -> GroupRollup {
        Self::aggregate(tree, |account, nature| {
            let amount = leaf_balances.get(&account).copied().unwrap_or_default();
            Balance::new(amount, nature.natural_side())
        })
    }

    /// Rolls up two-sided balances, so contra balances reduce their group's total
    pub fn rollup_balances(
        tree: &AccountGroupTree,
        leaf_balances: &HashMap<LedgerAccountId, Balance>,
    ) -> GroupRollup {
        Self::aggregate(tree, |account, nature| {
            leaf_balances
                .get(&account)
                .copied()
                .unwrap_or_else(|| Balance::zero(nature.natural_side()))
        })
    }

    fn aggregate<F>(tree: &AccountGroupTree, balance_of: F) -> GroupRollup
    where
        F: Fn(LedgerAccountId, AccountNature) -> Balance,
    {
        let mut signed = vec![Decimal::ZERO; tree.len()];
        let mut lines: Vec<Vec<AccountLine>> = vec![Vec::new(); tree.len()];

        for index in tree.post_order() {
            let nature = tree.group(index).nature;
            let natural_side = nature.natural_side();

            let mut total = Decimal::ZERO;
            for account in tree.accounts(index) {
                let balance = balance_of(account.id, nature);
                total += balance.signed_for(natural_side);
                lines[index.0].push(AccountLine {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    balance,
                });
            }
            for child in tree.children(index) {
                total += signed[child.0];
            }
            signed[index.0] = total;
        }

        let mut rows = Vec::with_capacity(tree.len());
        let mut index_map = HashMap::with_capacity(tree.len());
        for index in tree.pre_order() {
            let group = tree.group(index);
            index_map.insert(group.id, rows.len());
            rows.push(GroupTotal {
                group_id: group.id,
                parent_id: group.parent_id,
                code: group.code.clone(),
                name: group.name.clone(),
                nature: group.nature,
                expense_class: tree.expense_class(index),
                depth: tree.depth(index),
                balance: Balance::from_signed(signed[index.0], group.nature.natural_side()),
                accounts: std::mem::take(&mut lines[index.0]),
            });
        }

        GroupRollup {
            rows,
            index: index_map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_group_rejected() {
        let id = AccountGroupId::new();
        let groups = vec![
            AccountGroup::new(id, "1", "Assets", AccountNature::Asset),
            AccountGroup::new(id, "2", "Assets again", AccountNature::Asset),
        ];
        let result = AccountGroupTree::build(groups, vec![]);
        assert!(matches!(result, Err(LedgerError::DuplicateGroup(_))));
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let group = AccountGroupId::new();
        let account = LedgerAccountId::new();
        let result = AccountGroupTree::build(
            vec![AccountGroup::new(group, "1", "Assets", AccountNature::Asset)],
            vec![
                LedgerAccount::new(account, "1010", "Cash", group),
                LedgerAccount::new(account, "1011", "Cash", group),
            ],
        );
        assert!(matches!(result, Err(LedgerError::DuplicateAccount(_))));
    }
}
