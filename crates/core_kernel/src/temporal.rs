//! Report periods and calendar helpers
//!
//! Reports work on whole calendar days. A [`DatePeriod`] is inclusive at both
//! ends, matching how users pick "from" and "to" dates on a report filter.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Date out of range: {0}")]
    OutOfRange(String),
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct DatePeriod {
    /// First day of the period (inclusive)
    pub start: NaiveDate,
    /// Last day of the period (inclusive)
    pub end: NaiveDate,
}

impl DatePeriod {
    /// Creates a new period, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Every date up to and including `end`
    pub fn through(end: NaiveDate) -> Self {
        Self {
            start: NaiveDate::MIN,
            end,
        }
    }

    /// The whole calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = first_day_of_month(date);
        Self {
            start,
            end: last_day_of_month(date),
        }
    }

    /// The calendar quarter containing `date`
    pub fn quarter_of(date: NaiveDate) -> Self {
        let first_month = (date.month0() / 3) * 3 + 1;
        let start = NaiveDate::from_ymd_opt(date.year(), first_month, 1)
            .unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(2))
            .map(last_day_of_month)
            .unwrap_or(date);
        Self { start, end }
    }

    /// The calendar year containing `date`
    pub fn year_of(date: NaiveDate) -> Self {
        let start = date.with_ordinal(1).unwrap_or(date);
        let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
        Self { start, end }
    }

    /// Returns true if `date` falls inside the period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the period starts on a month's first day and ends on
    /// a month's last day
    pub fn is_whole_months(&self) -> bool {
        self.start.day() == 1 && is_last_day_of_month(self.end)
    }

    /// Number of calendar months spanned, when the period is whole months
    pub fn whole_months(&self) -> Option<u32> {
        if !self.is_whole_months() {
            return None;
        }
        let months = (self.end.year() - self.start.year()) * 12
            + self.end.month() as i32
            - self.start.month() as i32
            + 1;
        u32::try_from(months).ok()
    }
}

#[derive(Deserialize)]
struct RawPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawPeriod> for DatePeriod {
    type Error = TemporalError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        DatePeriod::new(raw.start, raw.end)
    }
}

impl fmt::Display for DatePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// First day of the month containing `date`
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    last_day_of_month(date) == date
}

/// Moves `date` back by `months` calendar months.
///
/// Days that do not exist in the target month clamp to its last day
/// (Mar 31 minus one month is Feb 28/29). A month-end date always lands on
/// the target month's end, so Feb 28 minus one month is Jan 31.
pub fn months_back(date: NaiveDate, months: u32) -> Result<NaiveDate, TemporalError> {
    let shifted = date
        .checked_sub_months(Months::new(months))
        .ok_or_else(|| TemporalError::OutOfRange(date.to_string()))?;
    if is_last_day_of_month(date) {
        Ok(last_day_of_month(shifted))
    } else {
        Ok(shifted)
    }
}

/// Whole days elapsed from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_period() {
        let result = DatePeriod::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_single_day_period() {
        let period = DatePeriod::new(date(2024, 2, 1), date(2024, 2, 1)).unwrap();
        assert_eq!(period.days(), 1);
        assert!(period.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_last_day_of_month_leap_year() {
        assert_eq!(last_day_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2023, 2, 10)), date(2023, 2, 28));
        assert_eq!(last_day_of_month(date(2023, 12, 5)), date(2023, 12, 31));
    }

    #[test]
    fn test_months_back_clamps() {
        assert_eq!(months_back(date(2024, 3, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(months_back(date(2023, 2, 28), 1).unwrap(), date(2023, 1, 31));
        assert_eq!(months_back(date(2024, 3, 15), 1).unwrap(), date(2024, 2, 15));
    }

    #[test]
    fn test_quarter_of() {
        let q = DatePeriod::quarter_of(date(2024, 5, 17));
        assert_eq!(q.start, date(2024, 4, 1));
        assert_eq!(q.end, date(2024, 6, 30));
    }

    #[test]
    fn test_whole_months() {
        let q = DatePeriod::quarter_of(date(2024, 11, 2));
        assert_eq!(q.whole_months(), Some(3));
        let partial = DatePeriod::new(date(2024, 1, 2), date(2024, 1, 31)).unwrap();
        assert_eq!(partial.whole_months(), None);
    }

    #[test]
    fn test_through_covers_all_history() {
        let period = DatePeriod::through(date(2024, 3, 31));
        assert!(period.contains(date(1900, 1, 1)));
        assert!(period.contains(date(2024, 3, 31)));
        assert!(!period.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_deserialize_rejects_reversed_period() {
        let json = r#"{ "start": "2024-03-01", "end": "2024-02-01" }"#;
        assert!(serde_json::from_str::<DatePeriod>(json).is_err());

        let json = r#"{ "start": "2024-02-01", "end": "2024-03-01" }"#;
        let period: DatePeriod = serde_json::from_str(json).unwrap();
        assert_eq!(period.days(), 30);
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 5, 1), date(2024, 6, 30)), 60);
        assert_eq!(days_between(date(2024, 7, 1), date(2024, 6, 30)), -1);
    }
}
