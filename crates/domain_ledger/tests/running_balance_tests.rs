//! Tests for running balances and ledger statements

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Balance, BalanceType, Money};
use domain_ledger::{AccountNature, LedgerStatement, Posting, RunningBalanceCalculator};
use test_utils::{
    assert_balance_eq, balance_strategy, nature_strategy, ordered_postings_strategy,
    MoneyFixtures, PostingBuilder, TemporalFixtures,
};

fn debit(amount: Decimal) -> Posting {
    PostingBuilder::new().debit(amount).build()
}

fn credit(amount: Decimal) -> Posting {
    PostingBuilder::new().credit(amount).build()
}

// ============================================================================
// Calculator Tests
// ============================================================================

mod calculator_tests {
    use super::*;

    #[test]
    fn test_debit_grows_asset_balance() {
        let rows = RunningBalanceCalculator::compute(
            MoneyFixtures::thousand(),
            BalanceType::Debit,
            AccountNature::Asset,
            &[debit(dec!(500))],
        );

        assert_eq!(rows.len(), 1);
        assert_balance_eq(&rows[0], dec!(1500), BalanceType::Debit);
    }

    #[test]
    fn test_overpayment_crosses_to_credit() {
        let rows = RunningBalanceCalculator::compute(
            MoneyFixtures::thousand(),
            BalanceType::Debit,
            AccountNature::Asset,
            &[credit(dec!(1500))],
        );

        assert_balance_eq(&rows[0], dec!(500), BalanceType::Credit);
    }

    #[test]
    fn test_contra_balance_returns_to_natural_side() {
        let rows = RunningBalanceCalculator::compute(
            MoneyFixtures::of(dec!(200)),
            BalanceType::Credit,
            AccountNature::Asset,
            &[credit(dec!(50)), debit(dec!(100)), debit(dec!(400))],
        );

        assert_balance_eq(&rows[0], dec!(250), BalanceType::Credit);
        assert_balance_eq(&rows[1], dec!(150), BalanceType::Credit);
        assert_balance_eq(&rows[2], dec!(250), BalanceType::Debit);
    }

    #[test]
    fn test_liability_mirrors_asset() {
        let rows = RunningBalanceCalculator::compute(
            MoneyFixtures::hundred(),
            BalanceType::Credit,
            AccountNature::Liability,
            &[credit(dec!(50)), debit(dec!(400))],
        );

        assert_balance_eq(&rows[0], dec!(150), BalanceType::Credit);
        assert_balance_eq(&rows[1], dec!(250), BalanceType::Debit);
    }

    #[test]
    fn test_paid_down_to_zero_stays_on_natural_side() {
        let rows = RunningBalanceCalculator::compute(
            MoneyFixtures::hundred(),
            BalanceType::Debit,
            AccountNature::Expense,
            &[credit(dec!(100))],
        );

        assert_balance_eq(&rows[0], dec!(0), BalanceType::Debit);
    }

    #[test]
    fn test_two_sided_posting_uses_net() {
        let posting = PostingBuilder::new().debit(dec!(300)).credit(dec!(100)).build();
        let rows = RunningBalanceCalculator::compute(
            Money::zero(),
            BalanceType::Debit,
            AccountNature::Asset,
            &[posting],
        );

        assert_balance_eq(&rows[0], dec!(200), BalanceType::Debit);
    }

    #[test]
    fn test_no_postings_closes_at_opening() {
        let opening = Balance::credit(MoneyFixtures::hundred());
        let closing = RunningBalanceCalculator::closing(opening, AccountNature::Income, &[]);
        assert_eq!(closing, opening);
    }
}

// ============================================================================
// Statement Tests
// ============================================================================

mod statement_tests {
    use super::*;

    #[test]
    fn test_statement_totals_and_closing() {
        let postings = vec![
            PostingBuilder::new()
                .on(TemporalFixtures::date(2024, 1, 3))
                .debit(dec!(250))
                .reference("S-1")
                .build(),
            PostingBuilder::new()
                .on(TemporalFixtures::date(2024, 1, 9))
                .credit(dec!(100))
                .reference("R-1")
                .build(),
        ];

        let statement = LedgerStatement::build(
            Balance::debit(MoneyFixtures::hundred()),
            AccountNature::Asset,
            postings,
        );

        assert_eq!(statement.rows.len(), 2);
        assert_eq!(statement.total_debit, MoneyFixtures::of(dec!(250)));
        assert_eq!(statement.total_credit, MoneyFixtures::of(dec!(100)));
        assert_balance_eq(&statement.rows[0].balance, dec!(350), BalanceType::Debit);
        assert_balance_eq(&statement.closing, dec!(250), BalanceType::Debit);
        assert_eq!(statement.rows[1].posting.voucher_reference, "R-1");
    }

    #[test]
    fn test_empty_statement() {
        let opening = Balance::credit(MoneyFixtures::hundred());
        let statement = LedgerStatement::build(opening, AccountNature::Liability, Vec::new());

        assert!(statement.is_empty());
        assert_eq!(statement.closing, opening);
        assert!(statement.total_debit.is_zero());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;

    proptest! {
        #[test]
        fn one_row_per_posting(
            opening in balance_strategy(),
            nature in nature_strategy(),
            postings in ordered_postings_strategy(30),
        ) {
            let rows = RunningBalanceCalculator::compute(
                opening.amount,
                opening.balance_type,
                nature,
                &postings,
            );
            prop_assert_eq!(rows.len(), postings.len());
            for row in &rows {
                prop_assert!(row.amount.amount() >= Decimal::ZERO);
            }
        }

        #[test]
        fn closing_equals_opening_plus_net_movement(
            opening in balance_strategy(),
            nature in nature_strategy(),
            postings in ordered_postings_strategy(30),
        ) {
            let side = nature.natural_side();
            let movement: Decimal = postings
                .iter()
                .map(|p| {
                    let net = p.debit.amount() - p.credit.amount();
                    if nature.is_debit_nature() { net } else { -net }
                })
                .sum();

            let closing = RunningBalanceCalculator::closing(opening, nature, &postings);
            prop_assert_eq!(closing.signed_for(side), opening.signed_for(side) + movement);
        }

        #[test]
        fn zero_posting_carries_balance_forward(
            opening in balance_strategy(),
            nature in nature_strategy(),
        ) {
            let rows = RunningBalanceCalculator::compute(
                opening.amount,
                opening.balance_type,
                nature,
                &[PostingBuilder::new().build()],
            );
            prop_assert_eq!(rows[0], opening);
        }
    }
}
