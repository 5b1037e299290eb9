//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the ledger reporting engine.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{AccountGroupId, DatePeriod, LedgerAccountId, Money, PartyId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_ledger::{
    AccountGroup, AccountGroupTree, AccountNature, ExpenseClass, LedgerAccount, LedgerSnapshot,
};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a money value from a non-negative decimal
    ///
    /// # Panics
    ///
    /// Panics on a negative amount
    pub fn of(amount: Decimal) -> Money {
        Money::new(amount).expect("fixture amounts are non-negative")
    }

    pub fn hundred() -> Money {
        Self::of(dec!(100.00))
    }

    pub fn thousand() -> Money {
        Self::of(dec!(1000.00))
    }

    pub fn zero() -> Money {
        Money::zero()
    }
}

/// Fixture for dates and periods
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Creates a date, panicking on an invalid one
    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
    }

    /// Creates a period, panicking when it is inverted
    pub fn period(start: NaiveDate, end: NaiveDate) -> DatePeriod {
        DatePeriod::new(start, end).expect("fixture periods are ordered")
    }

    /// January 2024
    pub fn january() -> DatePeriod {
        DatePeriod::month_of(Self::date(2024, 1, 1))
    }

    /// First quarter of 2024
    pub fn first_quarter() -> DatePeriod {
        DatePeriod::quarter_of(Self::date(2024, 1, 1))
    }

    /// Calendar year 2024
    pub fn year() -> DatePeriod {
        DatePeriod::year_of(Self::date(2024, 1, 1))
    }
}

/// A small trading business's chart of accounts
///
/// ```text
/// Assets (asset)
/// ├── Bank Accounts          bank, cash
/// └── Sundry Debtors         customer_a, customer_b
/// Liabilities (liability)
/// └── Sundry Creditors       supplier
/// Capital (equity)           capital
/// Income (income)            sales
/// Expenses (expense)
/// ├── Direct Expenses        purchases
/// └── Indirect Expenses      rent
/// ```
#[derive(Debug, Clone)]
pub struct ChartFixture {
    pub assets: AccountGroupId,
    pub bank_accounts: AccountGroupId,
    pub debtors: AccountGroupId,
    pub liabilities: AccountGroupId,
    pub creditors: AccountGroupId,
    pub capital_group: AccountGroupId,
    pub income: AccountGroupId,
    pub expenses: AccountGroupId,
    pub direct_expenses: AccountGroupId,
    pub indirect_expenses: AccountGroupId,

    pub bank: LedgerAccountId,
    pub cash: LedgerAccountId,
    pub customer_a: LedgerAccountId,
    pub customer_b: LedgerAccountId,
    pub supplier: LedgerAccountId,
    pub capital: LedgerAccountId,
    pub sales: LedgerAccountId,
    pub purchases: LedgerAccountId,
    pub rent: LedgerAccountId,

    pub customer_a_party: PartyId,
    pub customer_b_party: PartyId,
    pub supplier_party: PartyId,

    pub groups: Vec<AccountGroup>,
    pub accounts: Vec<LedgerAccount>,
}

impl Default for ChartFixture {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChartFixture {
    /// Builds the chart with fresh identifiers
    pub fn standard() -> Self {
        let assets = AccountGroupId::new();
        let bank_accounts = AccountGroupId::new();
        let debtors = AccountGroupId::new();
        let liabilities = AccountGroupId::new();
        let creditors = AccountGroupId::new();
        let capital_group = AccountGroupId::new();
        let income = AccountGroupId::new();
        let expenses = AccountGroupId::new();
        let direct_expenses = AccountGroupId::new();
        let indirect_expenses = AccountGroupId::new();

        let groups = vec![
            AccountGroup::new(assets, "1000", "Assets", AccountNature::Asset),
            AccountGroup::new(bank_accounts, "1100", "Bank Accounts", AccountNature::Asset)
                .with_parent(assets),
            AccountGroup::new(debtors, "1200", "Sundry Debtors", AccountNature::Asset)
                .with_parent(assets),
            AccountGroup::new(liabilities, "2000", "Liabilities", AccountNature::Liability),
            AccountGroup::new(creditors, "2100", "Sundry Creditors", AccountNature::Liability)
                .with_parent(liabilities),
            AccountGroup::new(capital_group, "3000", "Capital", AccountNature::Equity),
            AccountGroup::new(income, "4000", "Income", AccountNature::Income),
            AccountGroup::new(expenses, "5000", "Expenses", AccountNature::Expense),
            AccountGroup::new(direct_expenses, "5100", "Direct Expenses", AccountNature::Expense)
                .with_parent(expenses)
                .with_expense_class(ExpenseClass::Direct),
            AccountGroup::new(indirect_expenses, "5200", "Indirect Expenses", AccountNature::Expense)
                .with_parent(expenses)
                .with_expense_class(ExpenseClass::Operating),
        ];

        let bank = LedgerAccountId::new();
        let cash = LedgerAccountId::new();
        let customer_a = LedgerAccountId::new();
        let customer_b = LedgerAccountId::new();
        let supplier = LedgerAccountId::new();
        let capital = LedgerAccountId::new();
        let sales = LedgerAccountId::new();
        let purchases = LedgerAccountId::new();
        let rent = LedgerAccountId::new();

        let customer_a_party = PartyId::new();
        let customer_b_party = PartyId::new();
        let supplier_party = PartyId::new();

        let accounts = vec![
            LedgerAccount::new(bank, "1110", "Main Bank", bank_accounts),
            LedgerAccount::new(cash, "1120", "Petty Cash", bank_accounts),
            LedgerAccount::new(customer_a, "1210", "Acme Traders", debtors)
                .with_party(customer_a_party),
            LedgerAccount::new(customer_b, "1220", "Bright Stores", debtors)
                .with_party(customer_b_party),
            LedgerAccount::new(supplier, "2110", "Coastal Supplies", creditors)
                .with_party(supplier_party),
            LedgerAccount::new(capital, "3100", "Owner's Capital", capital_group),
            LedgerAccount::new(sales, "4100", "Sales", income),
            LedgerAccount::new(purchases, "5110", "Purchases", direct_expenses),
            LedgerAccount::new(rent, "5210", "Rent", indirect_expenses),
        ];

        Self {
            assets,
            bank_accounts,
            debtors,
            liabilities,
            creditors,
            capital_group,
            income,
            expenses,
            direct_expenses,
            indirect_expenses,
            bank,
            cash,
            customer_a,
            customer_b,
            supplier,
            capital,
            sales,
            purchases,
            rent,
            customer_a_party,
            customer_b_party,
            supplier_party,
            groups,
            accounts,
        }
    }

    /// The chart as a validated tree
    ///
    /// # Panics
    ///
    /// Panics if the fixture chart is malformed
    pub fn tree(&self) -> AccountGroupTree {
        AccountGroupTree::build(self.groups.clone(), self.accounts.clone())
            .expect("fixture chart is well formed")
    }

    /// An empty snapshot over this chart
    pub fn empty_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            groups: self.groups.clone(),
            accounts: self.accounts.clone(),
            ..LedgerSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_chart_builds() {
        let chart = ChartFixture::standard();
        let tree = chart.tree();
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.roots().len(), 5);
        assert_eq!(
            tree.nature_of_account(chart.customer_a),
            Some(AccountNature::Asset)
        );
    }

    #[test]
    fn test_periods() {
        assert_eq!(TemporalFixtures::january().days(), 31);
        assert_eq!(TemporalFixtures::first_quarter().whole_months(), Some(3));
    }
}
