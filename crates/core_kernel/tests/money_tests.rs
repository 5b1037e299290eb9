//! Unit tests for the Money module
//!
//! Tests cover creation, the non-negative invariant, arithmetic, rounding,
//! and serialization.

use core_kernel::{Money, MoneyError, Rate};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_keeps_amount() {
        let m = Money::new(dec!(100.50)).unwrap();
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789)).unwrap();
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Money::new(dec!(-0.01)),
            Err(MoneyError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_from_abs_takes_magnitude() {
        assert_eq!(Money::from_abs(dec!(-42.5)).amount(), dec!(42.5));
    }

    #[test]
    fn test_from_minor_converts_cents() {
        assert_eq!(Money::from_minor(10050).unwrap().amount(), dec!(100.50));
        assert!(Money::from_minor(-1).is_err());
    }

    #[test]
    fn test_zero_and_default_agree() {
        assert_eq!(Money::zero(), Money::default());
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_add_and_sum() {
        let a = Money::new(dec!(10.25)).unwrap();
        let b = Money::new(dec!(4.75)).unwrap();
        assert_eq!((a + b).amount(), dec!(15.00));

        let total: Money = vec![a, b, a].into_iter().sum();
        assert_eq!(total.amount(), dec!(25.25));
    }

    #[test]
    fn test_signed_difference() {
        let small = Money::new(dec!(5)).unwrap();
        let large = Money::new(dec!(8)).unwrap();
        assert_eq!(small.signed_difference(&large), dec!(-3));
    }

    #[test]
    fn test_sum_keeps_storage_precision() {
        let amounts = vec![
            Money::new(dec!(0.3333)).unwrap(),
            Money::new(dec!(0.3333)).unwrap(),
            Money::new(dec!(0.3334)).unwrap(),
        ];
        assert_eq!(amounts.iter().sum::<Money>().amount(), dec!(1.0000));
    }

    #[test]
    fn test_ordering() {
        let a = Money::new(dec!(1)).unwrap();
        let b = Money::new(dec!(2)).unwrap();
        assert!(a < b);
        assert_eq!(a.max(b), b);
    }
}

mod presentation {
    use super::*;

    #[test]
    fn test_display_rounds_half_up_to_two_places() {
        assert_eq!(Money::new(dec!(1500)).unwrap().to_string(), "1500.00");
        assert_eq!(Money::new(dec!(2.345)).unwrap().to_string(), "2.35");
        assert_eq!(Money::new(dec!(2.344)).unwrap().rounded(), dec!(2.34));
    }

    #[test]
    fn test_serde_rejects_negative() {
        let m: Money = serde_json::from_str("\"12.50\"").unwrap();
        assert_eq!(m.amount(), dec!(12.50));
        assert!(serde_json::from_str::<Money>("\"-1\"").is_err());
    }
}

mod rate {
    use super::*;

    #[test]
    fn test_ratio_of_zero_whole_is_zero() {
        let part = Money::new(dec!(10)).unwrap();
        assert_eq!(Rate::ratio(part, Money::zero()), Rate::zero());
    }

    #[test]
    fn test_ratio_and_percentage() {
        let part = Money::new(dec!(25)).unwrap();
        let whole = Money::new(dec!(100)).unwrap();
        let rate = Rate::ratio(part, whole);
        assert_eq!(rate.as_decimal(), dec!(0.25));
        assert_eq!(rate.as_percentage(), dec!(25));
        assert_eq!(rate.to_string(), "25.00%");
    }
}
