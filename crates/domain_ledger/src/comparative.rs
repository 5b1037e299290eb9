//! Comparison periods for side-by-side report columns
//!
//! # Month-length rule
//!
//! A period made of whole calendar months moves by whole months, so
//! February compares against January in full (Jan 1 to Jan 31), not against
//! a 28-day window. Any other period moves day for day and keeps its exact
//! length. When a quarter or year shift lands on a day the target month
//! lacks, the date clamps to that month's last day, and month-end dates stay
//! on month ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use core_kernel::temporal::months_back;
use core_kernel::{DatePeriod, TemporalError};

use crate::error::LedgerError;

/// Which earlier period a report is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ComparisonMode {
    /// The period of equal span immediately before
    PreviousPeriod,
    /// The same span three months earlier
    PreviousQuarter,
    /// The same span a year earlier
    PreviousYear,
    /// An explicit period chosen by the user
    Custom { period: DatePeriod },
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonMode::PreviousPeriod => write!(f, "previous_period"),
            ComparisonMode::PreviousQuarter => write!(f, "previous_quarter"),
            ComparisonMode::PreviousYear => write!(f, "previous_year"),
            ComparisonMode::Custom { period } => write!(f, "custom ({})", period),
        }
    }
}

impl FromStr for ComparisonMode {
    type Err = LedgerError;

    /// Parses the named modes; custom periods are not expressible as a name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous_period" => Ok(ComparisonMode::PreviousPeriod),
            "previous_quarter" => Ok(ComparisonMode::PreviousQuarter),
            "previous_year" => Ok(ComparisonMode::PreviousYear),
            other => Err(LedgerError::InvalidComparison(other.to_string())),
        }
    }
}

/// Resolves the comparison period for a report period
pub struct ComparativePeriodResolver;

impl ComparativePeriodResolver {
    pub fn resolve(current: DatePeriod, mode: ComparisonMode) -> Result<DatePeriod, LedgerError> {
        let previous = match mode {
            ComparisonMode::PreviousPeriod => match current.whole_months() {
                Some(months) => {
                    let end = current
                        .start
                        .pred_opt()
                        .ok_or_else(|| TemporalError::OutOfRange(current.start.to_string()))?;
                    DatePeriod::new(months_back(current.start, months)?, end)?
                }
                None => {
                    let end = current
                        .start
                        .pred_opt()
                        .ok_or_else(|| TemporalError::OutOfRange(current.start.to_string()))?;
                    let start = end
                        .checked_sub_signed(Duration::days(current.days() - 1))
                        .ok_or_else(|| TemporalError::OutOfRange(end.to_string()))?;
                    DatePeriod::new(start, end)?
                }
            },
            ComparisonMode::PreviousQuarter => Self::shift_months(current, 3)?,
            ComparisonMode::PreviousYear => Self::shift_months(current, 12)?,
            ComparisonMode::Custom { period } => period,
        };

        tracing::debug!(%current, %previous, %mode, "Resolved comparison period");
        Ok(previous)
    }

    fn shift_months(current: DatePeriod, months: u32) -> Result<DatePeriod, LedgerError> {
        let start = months_back(current.start, months)?;
        let end = months_back(current.end, months)?;
        Ok(DatePeriod::new(start, end)?)
    }
}
