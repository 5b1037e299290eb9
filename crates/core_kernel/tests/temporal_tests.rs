//! Tests for report periods and calendar helpers

use chrono::NaiveDate;
use core_kernel::temporal::{
    days_between, first_day_of_month, is_last_day_of_month, last_day_of_month, months_back,
};
use core_kernel::{DatePeriod, TemporalError};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod periods {
    use super::*;

    #[test]
    fn test_inverted_period_is_rejected() {
        assert!(matches!(
            DatePeriod::new(date(2024, 2, 1), date(2024, 1, 31)),
            Err(TemporalError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_single_day_period() {
        let p = DatePeriod::new(date(2024, 5, 5), date(2024, 5, 5)).unwrap();
        assert_eq!(p.days(), 1);
        assert!(p.contains(date(2024, 5, 5)));
        assert!(!p.contains(date(2024, 5, 6)));
    }

    #[test]
    fn test_calendar_periods() {
        let feb = DatePeriod::month_of(date(2024, 2, 17));
        assert_eq!(feb.start, date(2024, 2, 1));
        assert_eq!(feb.end, date(2024, 2, 29));
        assert_eq!(feb.whole_months(), Some(1));

        let q3 = DatePeriod::quarter_of(date(2023, 8, 9));
        assert_eq!(q3.start, date(2023, 7, 1));
        assert_eq!(q3.end, date(2023, 9, 30));
        assert_eq!(q3.whole_months(), Some(3));

        let year = DatePeriod::year_of(date(2023, 8, 9));
        assert_eq!(year.days(), 365);
        assert_eq!(year.whole_months(), Some(12));
    }

    #[test]
    fn test_partial_month_is_not_whole() {
        let p = DatePeriod::new(date(2024, 1, 15), date(2024, 2, 14)).unwrap();
        assert!(!p.is_whole_months());
        assert_eq!(p.whole_months(), None);
    }

    #[test]
    fn test_display() {
        let p = DatePeriod::month_of(date(2024, 1, 1));
        assert_eq!(p.to_string(), "2024-01-01 to 2024-01-31");
    }
}

mod calendar {
    use super::*;

    #[test]
    fn test_month_bounds() {
        assert_eq!(first_day_of_month(date(2024, 3, 19)), date(2024, 3, 1));
        assert_eq!(last_day_of_month(date(2023, 2, 3)), date(2023, 2, 28));
        assert!(is_last_day_of_month(date(2024, 2, 29)));
        assert!(!is_last_day_of_month(date(2023, 2, 27)));
    }

    #[test]
    fn test_months_back_clamps_short_months() {
        assert_eq!(months_back(date(2024, 3, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(months_back(date(2023, 5, 30), 3).unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn test_months_back_keeps_month_end() {
        assert_eq!(months_back(date(2023, 2, 28), 1).unwrap(), date(2023, 1, 31));
        assert_eq!(months_back(date(2024, 6, 30), 12).unwrap(), date(2023, 6, 30));
    }

    #[test]
    fn test_days_between_is_signed() {
        assert_eq!(days_between(date(2024, 5, 1), date(2024, 6, 30)), 60);
        assert_eq!(days_between(date(2024, 6, 30), date(2024, 5, 1)), -60);
    }
}

proptest! {
    #[test]
    fn months_back_never_moves_forward(offset in 0i64..3650, months in 0u32..48) {
        let d = date(2015, 1, 1) + chrono::Duration::days(offset);
        let back = months_back(d, months).unwrap();
        prop_assert!(back <= d);
    }

    #[test]
    fn month_of_contains_its_date(offset in 0i64..3650) {
        let d = date(2015, 1, 1) + chrono::Duration::days(offset);
        let month = DatePeriod::month_of(d);
        prop_assert!(month.contains(d));
        prop_assert_eq!(month.whole_months(), Some(1));
    }
}
