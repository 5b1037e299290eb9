//! Aging of outstanding amounts
//!
//! Receivable and payable aging reports classify each open voucher by how
//! many days it is past its due date (or its posting date when it has no due
//! date) and total the amounts per bucket, per party, and overall.
//!
//! Buckets are defined by an ascending list of boundary day counts. With
//! boundaries `[30, 60, 90]` the buckets are `current`, `1-30`, `31-60`,
//! `61-90`, and `older`. Upper bounds are inclusive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

use core_kernel::temporal::days_between;
use core_kernel::{Money, PartyId, Rate};

use crate::account::AccountNature;
use crate::error::LedgerError;
use crate::posting::Posting;

/// Voucher reference given to the aged opening balance
pub const OPENING_BALANCE_REFERENCE: &str = "Opening Balance";

/// The party ledger an aging report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingSide {
    /// Amounts customers owe, held on asset accounts
    #[default]
    Receivables,
    /// Amounts owed to suppliers, held on liability accounts
    Payables,
}

impl AgingSide {
    /// Nature of the accounts aged on this side
    pub fn nature(&self) -> AccountNature {
        match self {
            AgingSide::Receivables => AccountNature::Asset,
            AgingSide::Payables => AccountNature::Liability,
        }
    }
}

/// A validated, strictly increasing list of bucket boundaries in days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct AgingBoundaries(Vec<u32>);

impl AgingBoundaries {
    pub fn new(boundaries: Vec<u32>) -> Result<Self, LedgerError> {
        if boundaries.is_empty() {
            return Err(LedgerError::InvalidBoundaries(
                "at least one boundary is required".to_string(),
            ));
        }
        if boundaries[0] == 0 {
            return Err(LedgerError::InvalidBoundaries(
                "the first boundary must be at least one day".to_string(),
            ));
        }
        if let Some(pair) = boundaries.windows(2).find(|w| w[0] >= w[1]) {
            return Err(LedgerError::InvalidBoundaries(format!(
                "boundaries must be strictly increasing, found {} then {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self(boundaries))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// All buckets in display order: current, ranges, older
    pub fn buckets(&self) -> Vec<AgingBucket> {
        let mut buckets = Vec::with_capacity(self.0.len() + 2);
        buckets.push(AgingBucket::Current);
        let mut from = 1;
        for &to in &self.0 {
            buckets.push(AgingBucket::Range { from, to });
            from = to + 1;
        }
        buckets.push(AgingBucket::Older);
        buckets
    }

    /// Position of the bucket an age falls into, matching [`Self::buckets`]
    fn position(&self, age_days: i64) -> usize {
        if age_days < 0 {
            return 0;
        }
        self.0
            .iter()
            .position(|&boundary| age_days <= i64::from(boundary))
            .map(|i| i + 1)
            .unwrap_or(self.0.len() + 1)
    }

    /// Classifies an age in days
    pub fn classify(&self, age_days: i64) -> AgingBucket {
        self.buckets()[self.position(age_days)]
    }
}

impl Default for AgingBoundaries {
    fn default() -> Self {
        Self(vec![30, 60, 90])
    }
}

impl TryFrom<Vec<u32>> for AgingBoundaries {
    type Error = LedgerError;

    fn try_from(boundaries: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(boundaries)
    }
}

impl From<AgingBoundaries> for Vec<u32> {
    fn from(boundaries: AgingBoundaries) -> Vec<u32> {
        boundaries.0
    }
}

/// A day-count range used to classify how overdue an amount is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    /// Not yet due
    Current,
    /// Overdue by `from..=to` days
    Range { from: u32, to: u32 },
    /// Overdue beyond the last boundary
    Older,
}

impl AgingBucket {
    /// Canonical label: `current`, `31-60`, `older`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgingBucket::Current => write!(f, "current"),
            AgingBucket::Range { from, to } => write!(f, "{}-{}", from, to),
            AgingBucket::Older => write!(f, "older"),
        }
    }
}

/// An outstanding voucher-level amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingItem {
    pub voucher_reference: String,
    #[serde(default)]
    pub party_id: Option<PartyId>,
    pub amount: Money,
    pub posting_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl OutstandingItem {
    pub fn new(voucher_reference: impl Into<String>, amount: Money, posting_date: NaiveDate) -> Self {
        Self {
            voucher_reference: voucher_reference.into(),
            party_id: None,
            amount,
            posting_date,
            due_date: None,
        }
    }

    /// The balance brought forward, aged from `date`
    pub fn opening_balance(amount: Money, date: NaiveDate) -> Self {
        Self::new(OPENING_BALANCE_REFERENCE, amount, date)
    }

    pub fn with_party(mut self, party_id: PartyId) -> Self {
        self.party_id = Some(party_id);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Due date, falling back to the posting date
    pub fn reference_date(&self) -> NaiveDate {
        self.due_date.unwrap_or(self.posting_date)
    }

    /// Whole days past the reference date; negative when not yet due
    pub fn age_days(&self, as_of: NaiveDate) -> i64 {
        days_between(self.reference_date(), as_of)
    }
}

/// An outstanding item with its classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgedItem {
    pub item: OutstandingItem,
    pub bucket: AgingBucket,
    pub age_days: i64,
}

/// Total of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketTotal {
    pub bucket: AgingBucket,
    pub total: Money,
}

/// Bucket totals for one party
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyAging {
    /// None collects items not linked to a party
    pub party_id: Option<PartyId>,
    pub buckets: Vec<BucketTotal>,
    pub total: Money,
}

impl PartyAging {
    pub fn total_for(&self, bucket: &AgingBucket) -> Money {
        bucket_total(&self.buckets, bucket)
    }
}

/// Result of bucketizing outstanding items
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgingReport {
    pub as_of: NaiveDate,
    /// Totals in display order, one per bucket, zero buckets included
    pub buckets: Vec<BucketTotal>,
    /// Items with their bucket and age, in input order
    pub items: Vec<AgedItem>,
    /// Per-party totals, in order of first appearance
    pub parties: Vec<PartyAging>,
    pub grand_total: Money,
}

impl AgingReport {
    pub fn total_for(&self, bucket: &AgingBucket) -> Money {
        bucket_total(&self.buckets, bucket)
    }

    /// Looks a total up by its canonical label
    pub fn total_for_label(&self, label: &str) -> Option<Money> {
        self.buckets
            .iter()
            .find(|b| b.bucket.label() == label)
            .map(|b| b.total)
    }

    /// Share of the grand total held by a bucket, zero when the total is zero
    pub fn share_of(&self, bucket: &AgingBucket) -> Rate {
        Rate::ratio(self.total_for(bucket), self.grand_total)
    }

    pub fn party(&self, party_id: Option<PartyId>) -> Option<&PartyAging> {
        self.parties.iter().find(|p| p.party_id == party_id)
    }
}

fn bucket_total(buckets: &[BucketTotal], bucket: &AgingBucket) -> Money {
    buckets
        .iter()
        .find(|b| &b.bucket == bucket)
        .map(|b| b.total)
        .unwrap_or_default()
}

fn zip_totals(buckets: &[AgingBucket], totals: &[Money]) -> Vec<BucketTotal> {
    buckets
        .iter()
        .zip(totals)
        .map(|(bucket, total)| BucketTotal {
            bucket: *bucket,
            total: *total,
        })
        .collect()
}

/// Classifies outstanding amounts into aging buckets
#[derive(Debug, Clone, Default)]
pub struct AgingBucketizer {
    boundaries: AgingBoundaries,
}

impl AgingBucketizer {
    pub fn new(boundaries: AgingBoundaries) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &AgingBoundaries {
        &self.boundaries
    }

    /// Buckets the opening balance (if any) and every outstanding item.
    ///
    /// Every amount lands in exactly one bucket, so the bucket totals always
    /// sum to the grand total.
    pub fn bucketize(
        &self,
        as_of: NaiveDate,
        opening_balance: Option<OutstandingItem>,
        items: &[OutstandingItem],
    ) -> AgingReport {
        let buckets = self.boundaries.buckets();
        let mut totals = vec![Money::zero(); buckets.len()];
        let mut party_order: Vec<Option<PartyId>> = Vec::new();
        let mut party_totals: HashMap<Option<PartyId>, Vec<Money>> = HashMap::new();
        let mut grand_total = Money::zero();
        let mut aged = Vec::with_capacity(items.len() + 1);

        for item in opening_balance.iter().chain(items.iter()) {
            let age_days = item.age_days(as_of);
            let position = self.boundaries.position(age_days);

            totals[position] = totals[position] + item.amount;
            grand_total = grand_total + item.amount;

            let per_party = party_totals.entry(item.party_id).or_insert_with(|| {
                party_order.push(item.party_id);
                vec![Money::zero(); buckets.len()]
            });
            per_party[position] = per_party[position] + item.amount;

            aged.push(AgedItem {
                item: item.clone(),
                bucket: buckets[position],
                age_days,
            });
        }

        let parties = party_order
            .into_iter()
            .map(|party_id| {
                let party_buckets = party_totals.remove(&party_id).unwrap_or_default();
                PartyAging {
                    party_id,
                    total: party_buckets.iter().sum(),
                    buckets: zip_totals(&buckets, &party_buckets),
                }
            })
            .collect();

        tracing::debug!(
            %as_of,
            items = aged.len(),
            grand_total = %grand_total,
            "Bucketized outstanding items"
        );

        AgingReport {
            as_of,
            buckets: zip_totals(&buckets, &totals),
            items: aged,
            parties,
            grand_total,
        }
    }
}

/// Open items left after settling a party's postings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenItems {
    /// Unsettled natural-side amounts, oldest first
    pub items: Vec<OutstandingItem>,
    /// Settlements with nothing left to apply against (an advance)
    pub unapplied: Money,
}

/// Derives open items from a party account's postings by FIFO settlement.
///
/// Postings that move the balance toward the natural side of `nature` open
/// an item (an invoice on a receivable, a bill on a payable). Postings in the
/// other direction settle the oldest open items first; whatever they cannot
/// settle is kept as an unapplied advance and consumed by later items.
pub fn outstanding_items_from_postings(postings: &[Posting], nature: AccountNature) -> OpenItems {
    let mut open: VecDeque<OutstandingItem> = VecDeque::new();
    let mut unapplied = Money::zero();

    for posting in postings {
        let (increase, decrease) = if nature.is_debit_nature() {
            (posting.debit, posting.credit)
        } else {
            (posting.credit, posting.debit)
        };

        if increase > decrease {
            let mut amount = Money::from_abs(increase.signed_difference(&decrease));
            let applied = amount.min(unapplied);
            amount = Money::from_abs(amount.signed_difference(&applied));
            unapplied = Money::from_abs(unapplied.signed_difference(&applied));

            if amount.is_positive() {
                let mut item = OutstandingItem::new(
                    posting.voucher_reference.clone(),
                    amount,
                    posting.date,
                );
                item.party_id = posting.party_id;
                item.due_date = posting.due_date;
                open.push_back(item);
            }
        } else if decrease > increase {
            let mut remaining = Money::from_abs(decrease.signed_difference(&increase));
            while remaining.is_positive() {
                let Some(oldest) = open.front_mut() else {
                    break;
                };
                let applied = oldest.amount.min(remaining);
                oldest.amount = Money::from_abs(oldest.amount.signed_difference(&applied));
                remaining = Money::from_abs(remaining.signed_difference(&applied));
                if oldest.amount.is_zero() {
                    open.pop_front();
                }
            }
            unapplied = unapplied + remaining;
        }
    }

    if unapplied.is_positive() {
        tracing::debug!(unapplied = %unapplied, "Settlements exceed open items");
    }

    OpenItems {
        items: open.into_iter().collect(),
        unapplied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(amount: Decimal) -> Money {
        Money::new(amount).unwrap()
    }

    #[test]
    fn test_side_natures() {
        assert_eq!(AgingSide::default(), AgingSide::Receivables);
        assert_eq!(AgingSide::Receivables.nature(), AccountNature::Asset);
        assert_eq!(AgingSide::Payables.nature(), AccountNature::Liability);
        assert_eq!(serde_json::to_string(&AgingSide::Payables).unwrap(), "\"payables\"");
    }

    #[test]
    fn test_boundaries_must_increase() {
        assert!(AgingBoundaries::new(vec![30, 30]).is_err());
        assert!(AgingBoundaries::new(vec![60, 30]).is_err());
        assert!(AgingBoundaries::new(vec![]).is_err());
        assert!(AgingBoundaries::new(vec![0, 30]).is_err());
        assert!(AgingBoundaries::new(vec![15, 45]).is_ok());
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = AgingBoundaries::default()
            .buckets()
            .iter()
            .map(|b| b.label())
            .collect();
        assert_eq!(labels, vec!["current", "1-30", "31-60", "61-90", "older"]);
    }

    #[test]
    fn test_classify_inclusive_upper_bound() {
        let boundaries = AgingBoundaries::default();
        assert_eq!(boundaries.classify(-3), AgingBucket::Current);
        assert_eq!(boundaries.classify(30), AgingBucket::Range { from: 1, to: 30 });
        assert_eq!(boundaries.classify(31), AgingBucket::Range { from: 31, to: 60 });
        assert_eq!(boundaries.classify(90), AgingBucket::Range { from: 61, to: 90 });
        assert_eq!(boundaries.classify(91), AgingBucket::Older);
    }

    #[test]
    fn test_due_date_takes_precedence() {
        let item = OutstandingItem::new("INV-1", money(dec!(10)), date(2024, 1, 1))
            .with_due_date(date(2024, 2, 1));
        assert_eq!(item.age_days(date(2024, 2, 11)), 10);
    }

    #[test]
    fn test_empty_input_gives_zero_buckets() {
        let report = AgingBucketizer::default().bucketize(date(2024, 6, 30), None, &[]);
        assert_eq!(report.buckets.len(), 5);
        assert!(report.buckets.iter().all(|b| b.total.is_zero()));
        assert!(report.grand_total.is_zero());
        assert_eq!(report.share_of(&AgingBucket::Older), Rate::zero());
    }

    #[test]
    fn test_opening_balance_is_aged() {
        let opening = OutstandingItem::opening_balance(money(dec!(40)), date(2024, 1, 1));
        let report = AgingBucketizer::default().bucketize(date(2024, 6, 30), Some(opening), &[]);
        assert_eq!(report.total_for(&AgingBucket::Older), money(dec!(40)));
        assert_eq!(report.items[0].item.voucher_reference, OPENING_BALANCE_REFERENCE);
    }

    #[test]
    fn test_fifo_settles_oldest_first() {
        let postings = vec![
            Posting::debit_of(date(2024, 1, 1), money(dec!(100)), "INV-1"),
            Posting::debit_of(date(2024, 2, 1), money(dec!(200)), "INV-2"),
            Posting::credit_of(date(2024, 2, 15), money(dec!(150)), "RCT-1"),
        ];
        let open = outstanding_items_from_postings(&postings, AccountNature::Asset);
        assert_eq!(open.items.len(), 1);
        assert_eq!(open.items[0].voucher_reference, "INV-2");
        assert_eq!(open.items[0].amount, money(dec!(150)));
        assert!(open.unapplied.is_zero());
    }

    #[test]
    fn test_advance_consumed_by_later_invoice() {
        let postings = vec![
            Posting::credit_of(date(2024, 1, 1), money(dec!(80)), "ADV-1"),
            Posting::debit_of(date(2024, 1, 5), money(dec!(100)), "INV-1"),
        ];
        let open = outstanding_items_from_postings(&postings, AccountNature::Asset);
        assert_eq!(open.items[0].amount, money(dec!(20)));
        assert!(open.unapplied.is_zero());
    }

    #[test]
    fn test_payable_uses_credit_as_natural_side() {
        let postings = vec![
            Posting::credit_of(date(2024, 1, 1), money(dec!(500)), "BILL-1"),
            Posting::debit_of(date(2024, 1, 9), money(dec!(600)), "PAY-1"),
        ];
        let open = outstanding_items_from_postings(&postings, AccountNature::Liability);
        assert!(open.items.is_empty());
        assert_eq!(open.unapplied, money(dec!(100)));
    }
}
