//! Journal postings
//!
//! A posting is one dated debit/credit line against a ledger account.
//! Magnitudes are [`Money`], so negative amounts are rejected when a posting
//! is built or deserialized and never reach the calculators.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{LedgerAccountId, Money, PartyId};

use crate::error::LedgerError;

/// A single dated debit/credit entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Posting date
    pub date: NaiveDate,
    /// Secondary ordering key for postings on the same date
    #[serde(default)]
    pub sequence: u64,
    /// Debit side
    #[serde(default)]
    pub debit: Money,
    /// Credit side
    #[serde(default)]
    pub credit: Money,
    /// Reference of the voucher the posting belongs to
    pub voucher_reference: String,
    /// Free-text narration
    #[serde(default)]
    pub narration: Option<String>,
    /// Voucher kind (e.g., "sales", "receipt", "journal")
    #[serde(default)]
    pub voucher_type: Option<String>,
    /// Ledger account posted to
    #[serde(default)]
    pub account_id: Option<LedgerAccountId>,
    /// Customer or supplier the posting concerns
    #[serde(default)]
    pub party_id: Option<PartyId>,
    /// Date the amount falls due, for invoices
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl Posting {
    /// Creates a posting from two magnitudes
    pub fn new(
        date: NaiveDate,
        debit: Money,
        credit: Money,
        voucher_reference: impl Into<String>,
    ) -> Self {
        Self {
            date,
            sequence: 0,
            debit,
            credit,
            voucher_reference: voucher_reference.into(),
            narration: None,
            voucher_type: None,
            account_id: None,
            party_id: None,
            due_date: None,
        }
    }

    /// Creates a posting from raw decimals, rejecting negative magnitudes
    pub fn from_decimals(
        date: NaiveDate,
        debit: Decimal,
        credit: Decimal,
        voucher_reference: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let voucher_reference = voucher_reference.into();
        let debit = Money::new(debit).map_err(|e| {
            LedgerError::InvalidPosting(format!("{}: debit {}", voucher_reference, e))
        })?;
        let credit = Money::new(credit).map_err(|e| {
            LedgerError::InvalidPosting(format!("{}: credit {}", voucher_reference, e))
        })?;
        Ok(Self::new(date, debit, credit, voucher_reference))
    }

    /// A debit-only posting
    pub fn debit_of(date: NaiveDate, amount: Money, voucher_reference: impl Into<String>) -> Self {
        Self::new(date, amount, Money::zero(), voucher_reference)
    }

    /// A credit-only posting
    pub fn credit_of(date: NaiveDate, amount: Money, voucher_reference: impl Into<String>) -> Self {
        Self::new(date, Money::zero(), amount, voucher_reference)
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }

    pub fn with_voucher_type(mut self, voucher_type: impl Into<String>) -> Self {
        self.voucher_type = Some(voucher_type.into());
        self
    }

    pub fn with_account(mut self, account_id: LedgerAccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_party(mut self, party_id: PartyId) -> Self {
        self.party_id = Some(party_id);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Debit minus credit
    pub fn net(&self) -> Decimal {
        self.debit.signed_difference(&self.credit)
    }

    /// Returns true if both sides are zero
    pub fn is_empty(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }
}

/// Sorts postings by date, then sequence.
///
/// The sort is stable, so postings sharing both keys keep their input order
/// and running balances are reproducible.
pub fn sort_postings(postings: &mut [Posting]) {
    postings.sort_by_key(|p| (p.date, p.sequence));
}

/// Checks that postings are already in (date, sequence) order
pub fn ensure_ordered(postings: &[Posting]) -> Result<(), LedgerError> {
    for pair in postings.windows(2) {
        if (pair[0].date, pair[0].sequence) > (pair[1].date, pair[1].sequence) {
            return Err(LedgerError::InvalidPosting(format!(
                "{} dated {} follows {} dated {}",
                pair[1].voucher_reference, pair[1].date, pair[0].voucher_reference, pair[0].date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_negative_debit_rejected() {
        let result = Posting::from_decimals(date(2024, 1, 1), dec!(-5), dec!(0), "JV-1");
        assert!(matches!(result, Err(LedgerError::InvalidPosting(_))));
    }

    #[test]
    fn test_net_of_two_sided_posting() {
        let posting =
            Posting::from_decimals(date(2024, 1, 1), dec!(100), dec!(30), "JV-1").unwrap();
        assert_eq!(posting.net(), dec!(70));
        assert!(!posting.is_empty());
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut postings = vec![
            Posting::debit_of(date(2024, 1, 2), Money::zero(), "B").with_sequence(1),
            Posting::debit_of(date(2024, 1, 1), Money::zero(), "A2").with_sequence(5),
            Posting::debit_of(date(2024, 1, 1), Money::zero(), "A1").with_sequence(5),
            Posting::debit_of(date(2024, 1, 1), Money::zero(), "A0").with_sequence(2),
        ];
        sort_postings(&mut postings);
        let refs: Vec<_> = postings.iter().map(|p| p.voucher_reference.as_str()).collect();
        assert_eq!(refs, vec!["A0", "A2", "A1", "B"]);
        assert!(ensure_ordered(&postings).is_ok());
    }

    #[test]
    fn test_ensure_ordered_rejects_out_of_order() {
        let postings = vec![
            Posting::debit_of(date(2024, 1, 2), Money::zero(), "B"),
            Posting::debit_of(date(2024, 1, 1), Money::zero(), "A"),
        ];
        assert!(ensure_ordered(&postings).is_err());
    }

    #[test]
    fn test_negative_amount_rejected_on_deserialize() {
        let json = r#"{"date":"2024-01-01","debit":"-1","voucher_reference":"JV-9"}"#;
        let result: Result<Posting, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
