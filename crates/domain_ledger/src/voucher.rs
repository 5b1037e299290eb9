//! Voucher listings for register reports
//!
//! A register (sales, purchase, journal) lists vouchers either flat or
//! grouped by a key. The two shapes are distinct variants of
//! [`VoucherListing`] rather than one loosely-typed collection.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use core_kernel::{Money, PartyId};

use crate::posting::Posting;

/// A business document summarised from its postings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voucher {
    pub reference: String,
    pub voucher_type: Option<String>,
    pub date: NaiveDate,
    pub party_id: Option<PartyId>,
    /// Larger of the voucher's debit and credit sides; equal when it balances
    pub amount: Money,
}

/// Key a register is grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Party,
    VoucherType,
    Month,
}

impl GroupKey {
    fn key_of(&self, voucher: &Voucher) -> String {
        match self {
            GroupKey::Party => voucher
                .party_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unassigned".to_string()),
            GroupKey::VoucherType => voucher
                .voucher_type
                .clone()
                .unwrap_or_else(|| "unspecified".to_string()),
            GroupKey::Month => format!("{:04}-{:02}", voucher.date.year(), voucher.date.month()),
        }
    }
}

/// A register either flat or grouped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum VoucherListing {
    Ungrouped { vouchers: Vec<Voucher> },
    GroupedBy {
        key: GroupKey,
        groups: BTreeMap<String, Vec<Voucher>>,
    },
}

impl VoucherListing {
    /// Lists vouchers flat, or grouped when a key is given
    pub fn build(vouchers: Vec<Voucher>, key: Option<GroupKey>) -> Self {
        match key {
            None => VoucherListing::Ungrouped { vouchers },
            Some(key) => {
                let mut groups: BTreeMap<String, Vec<Voucher>> = BTreeMap::new();
                for voucher in vouchers {
                    groups.entry(key.key_of(&voucher)).or_default().push(voucher);
                }
                VoucherListing::GroupedBy { key, groups }
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VoucherListing::Ungrouped { vouchers } => vouchers.len(),
            VoucherListing::GroupedBy { groups, .. } => groups.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total(&self) -> Money {
        match self {
            VoucherListing::Ungrouped { vouchers } => vouchers.iter().map(|v| v.amount).sum(),
            VoucherListing::GroupedBy { groups, .. } => groups
                .values()
                .flat_map(|vs| vs.iter().map(|v| v.amount))
                .sum(),
        }
    }

    /// Per-group subtotals; a flat listing has none
    pub fn group_totals(&self) -> Vec<(String, Money)> {
        match self {
            VoucherListing::Ungrouped { .. } => Vec::new(),
            VoucherListing::GroupedBy { groups, .. } => groups
                .iter()
                .map(|(key, vs)| (key.clone(), vs.iter().map(|v| v.amount).sum()))
                .collect(),
        }
    }
}

/// Summarises postings into vouchers, one per voucher reference, in order
/// of first appearance
pub fn vouchers_from_postings(postings: &[Posting]) -> Vec<Voucher> {
    let mut order: Vec<Voucher> = Vec::new();
    let mut sides: Vec<(Money, Money)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for posting in postings {
        match position.get(posting.voucher_reference.as_str()) {
            Some(&i) => {
                let (debit, credit) = &mut sides[i];
                *debit = *debit + posting.debit;
                *credit = *credit + posting.credit;
                let voucher = &mut order[i];
                if voucher.party_id.is_none() {
                    voucher.party_id = posting.party_id;
                }
                if voucher.voucher_type.is_none() {
                    voucher.voucher_type = posting.voucher_type.clone();
                }
            }
            None => {
                position.insert(posting.voucher_reference.as_str(), order.len());
                sides.push((posting.debit, posting.credit));
                order.push(Voucher {
                    reference: posting.voucher_reference.clone(),
                    voucher_type: posting.voucher_type.clone(),
                    date: posting.date,
                    party_id: posting.party_id,
                    amount: Money::zero(),
                });
            }
        }
    }

    for (voucher, (debit, credit)) in order.iter_mut().zip(sides) {
        voucher.amount = debit.max(credit);
    }

    order
}
