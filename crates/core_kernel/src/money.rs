//! Money types with precise decimal arithmetic
//!
//! Monetary amounts in reports are magnitudes: the side a balance sits on is
//! carried separately by [`BalanceType`](crate::BalanceType). `Money` is
//! therefore never negative. Signed intermediate figures are plain `Decimal`
//! values and only become `Money` again through [`Money::from_abs`] or the
//! checked constructor [`Money::new`].

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use thiserror::Error;

/// Decimal places kept internally
const STORAGE_DP: u32 = 4;

/// Decimal places shown at presentation boundaries
pub const DISPLAY_DP: u32 = 2;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Negative amount: {0} (money is a magnitude, the side is carried by the balance type)")]
    NegativeAmount(String),

}

/// A non-negative monetary magnitude
///
/// Money uses rust_decimal for precise arithmetic without floating-point
/// drift. Amounts are stored with 4 decimal places and rounded half-up to
/// 2 decimal places only when presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money {
    amount: Decimal,
}

impl Money {
    /// Creates a new Money value, rejecting negative amounts
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::NegativeAmount(amount.to_string()));
        }
        Ok(Self::from_abs(amount))
    }

    /// Creates Money from the magnitude of a signed figure
    pub fn from_abs(amount: Decimal) -> Self {
        let amount = amount
            .abs()
            .round_dp_with_strategy(STORAGE_DP, RoundingStrategy::MidpointAwayFromZero);
        // normalise -0 so equality and hashing stay stable
        Self {
            amount: if amount.is_zero() { Decimal::ZERO } else { amount },
        }
    }

    /// Creates Money from an amount in minor units (e.g., cents)
    pub fn from_minor(minor_units: i64) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(minor_units, DISPLAY_DP))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self { amount: dec!(0) }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        !self.amount.is_zero()
    }

    /// Rounds half-up to the presentation precision
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Returns `self - other` as a signed figure
    pub fn signed_difference(&self, other: &Money) -> Decimal {
        self.amount - other.amount
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Money::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.amount
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.dp$}", self.rounded(), dp = DISPLAY_DP as usize)
    }
}

/// # Panics
///
/// Panics when the sum exceeds `Decimal::MAX` (about 7.9e28). Report totals
/// are sums of posted amounts, which sit many orders of magnitude below that.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_abs(self.amount + other.amount)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Represents a ratio between two amounts (e.g., a bucket's share of a total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// The zero rate
    pub fn zero() -> Self {
        Self { value: Decimal::ZERO }
    }

    /// Returns `part / whole`, defined as zero when `whole` is zero
    pub fn ratio(part: Money, whole: Money) -> Self {
        if whole.is_zero() {
            return Self::zero();
        }
        Self {
            value: part.amount() / whole.amount(),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}%",
            self.as_percentage()
                .round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}
