//! Test Data Builders
//!
//! Provides builder patterns for constructing postings and ledger snapshots
//! with sensible defaults. Tests specify only the relevant fields.

use chrono::NaiveDate;
use core_kernel::{Balance, LedgerAccountId, Money, PartyId};
use rust_decimal::Decimal;

use domain_ledger::{LedgerSnapshot, OpeningEntry, Posting};

use crate::fixtures::{ChartFixture, MoneyFixtures, TemporalFixtures};

/// Builder for a single posting
pub struct PostingBuilder {
    posting: Posting,
}

impl Default for PostingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PostingBuilder {
    /// Creates a zero posting dated 2024-01-01
    pub fn new() -> Self {
        Self {
            posting: Posting::new(
                TemporalFixtures::date(2024, 1, 1),
                Money::zero(),
                Money::zero(),
                "V-0001",
            ),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.posting.date = date;
        self
    }

    pub fn debit(mut self, amount: Decimal) -> Self {
        self.posting.debit = MoneyFixtures::of(amount);
        self
    }

    pub fn credit(mut self, amount: Decimal) -> Self {
        self.posting.credit = MoneyFixtures::of(amount);
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.posting.voucher_reference = reference.into();
        self
    }

    pub fn voucher_type(mut self, voucher_type: impl Into<String>) -> Self {
        self.posting.voucher_type = Some(voucher_type.into());
        self
    }

    pub fn account(mut self, account_id: LedgerAccountId) -> Self {
        self.posting.account_id = Some(account_id);
        self
    }

    pub fn party(mut self, party_id: PartyId) -> Self {
        self.posting.party_id = Some(party_id);
        self
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.posting.due_date = Some(due_date);
        self
    }

    pub fn sequence(mut self, sequence: u64) -> Self {
        self.posting.sequence = sequence;
        self
    }

    pub fn build(self) -> Posting {
        self.posting
    }
}

/// Builder for a balanced ledger snapshot over a [`ChartFixture`]
///
/// Every journal adds one debit and one credit posting of the same amount,
/// so the resulting ledger always balances.
pub struct SnapshotBuilder {
    snapshot: LedgerSnapshot,
    next_sequence: u64,
}

impl SnapshotBuilder {
    pub fn new(chart: &ChartFixture) -> Self {
        Self {
            snapshot: chart.empty_snapshot(),
            next_sequence: 1,
        }
    }

    /// Sets an account's balance at the start of the snapshot
    pub fn opening(mut self, account_id: LedgerAccountId, balance: Balance) -> Self {
        self.snapshot.opening_balances.push(OpeningEntry {
            account_id,
            balance,
            date: None,
        });
        self
    }

    /// Sets an opening balance brought forward on `date`
    pub fn opening_on(
        mut self,
        account_id: LedgerAccountId,
        balance: Balance,
        date: NaiveDate,
    ) -> Self {
        self.snapshot.opening_balances.push(OpeningEntry {
            account_id,
            balance,
            date: Some(date),
        });
        self
    }

    /// Posts `amount` from `credit_account` to `debit_account`
    pub fn journal(
        self,
        date: NaiveDate,
        reference: &str,
        debit_account: LedgerAccountId,
        credit_account: LedgerAccountId,
        amount: Decimal,
    ) -> Self {
        self.journal_with(date, reference, debit_account, credit_account, amount, |p| p)
    }

    /// Like [`journal`](Self::journal), letting the caller decorate both postings
    pub fn journal_with(
        mut self,
        date: NaiveDate,
        reference: &str,
        debit_account: LedgerAccountId,
        credit_account: LedgerAccountId,
        amount: Decimal,
        decorate: impl Fn(Posting) -> Posting,
    ) -> Self {
        let money = MoneyFixtures::of(amount);
        let debit = Posting::debit_of(date, money, reference)
            .with_account(debit_account)
            .with_sequence(self.next_sequence);
        let credit = Posting::credit_of(date, money, reference)
            .with_account(credit_account)
            .with_sequence(self.next_sequence + 1);
        self.next_sequence += 2;

        self.snapshot.postings.push(decorate(debit));
        self.snapshot.postings.push(decorate(credit));
        self
    }

    /// Adds a raw posting, which may leave the ledger unbalanced
    pub fn posting(mut self, posting: Posting) -> Self {
        self.snapshot.postings.push(posting);
        self
    }

    pub fn build(self) -> LedgerSnapshot {
        self.snapshot
    }
}
