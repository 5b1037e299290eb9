//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random ledger data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{Balance, BalanceType, Money};
use proptest::prelude::*;

use domain_ledger::{sort_postings, AccountNature, Posting};

use crate::fixtures::TemporalFixtures;

/// Strategy for amounts in minor units, up to ten million
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

/// Strategy for non-negative Money values with two decimal places
pub fn money_strategy() -> impl Strategy<Value = Money> {
    amount_minor_strategy().prop_map(|minor| Money::from_minor(minor).unwrap_or_default())
}

/// Strategy for strictly positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..1_000_000_000i64).prop_map(|minor| Money::from_minor(minor).unwrap_or_default())
}

pub fn balance_type_strategy() -> impl Strategy<Value = BalanceType> {
    prop_oneof![Just(BalanceType::Debit), Just(BalanceType::Credit)]
}

pub fn balance_strategy() -> impl Strategy<Value = Balance> {
    (money_strategy(), balance_type_strategy())
        .prop_map(|(amount, side)| Balance::new(amount, side))
}

pub fn nature_strategy() -> impl Strategy<Value = AccountNature> {
    prop_oneof![
        Just(AccountNature::Asset),
        Just(AccountNature::Liability),
        Just(AccountNature::Equity),
        Just(AccountNature::Income),
        Just(AccountNature::Expense),
    ]
}

/// Strategy for dates within 2024
pub fn date_2024_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..366i64).prop_map(|offset| TemporalFixtures::date(2024, 1, 1) + Duration::days(offset))
}

/// Strategy for a one-sided posting in 2024
pub fn posting_strategy() -> impl Strategy<Value = Posting> {
    (date_2024_strategy(), positive_money_strategy(), any::<bool>(), 0u32..10_000u32).prop_map(
        |(date, amount, is_debit, number)| {
            let reference = format!("V-{:04}", number);
            if is_debit {
                Posting::debit_of(date, amount, reference)
            } else {
                Posting::credit_of(date, amount, reference)
            }
        },
    )
}

/// Strategy for postings sorted by date, with sequence numbers assigned
pub fn ordered_postings_strategy(max_len: usize) -> impl Strategy<Value = Vec<Posting>> {
    prop::collection::vec(posting_strategy(), 0..max_len).prop_map(|postings| {
        let mut postings: Vec<Posting> = postings
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.with_sequence(i as u64))
            .collect();
        sort_postings(&mut postings);
        postings
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_ledger::ensure_ordered;

    proptest! {
        #[test]
        fn ordered_postings_are_ordered(postings in ordered_postings_strategy(20)) {
            prop_assert!(ensure_ordered(&postings).is_ok());
        }

        #[test]
        fn positive_money_is_positive(money in positive_money_strategy()) {
            prop_assert!(money.is_positive());
        }
    }
}
