//! Balance sides
//!
//! A balance is a magnitude plus the side it sits on. Which side counts as
//! an increase depends on the account's nature, so conversions to and from a
//! signed figure always take the natural side as an argument.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

/// The side a balance or posting sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceType {
    Debit,
    Credit,
}

impl BalanceType {
    /// Returns the opposite side
    pub fn flip(self) -> Self {
        match self {
            BalanceType::Debit => BalanceType::Credit,
            BalanceType::Credit => BalanceType::Debit,
        }
    }

    pub fn is_debit(self) -> bool {
        self == BalanceType::Debit
    }

    pub fn is_credit(self) -> bool {
        self == BalanceType::Credit
    }

    /// Short suffix used on statements ("Dr" / "Cr")
    pub fn suffix(self) -> &'static str {
        match self {
            BalanceType::Debit => "Dr",
            BalanceType::Credit => "Cr",
        }
    }
}

impl fmt::Display for BalanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceType::Debit => write!(f, "Debit"),
            BalanceType::Credit => write!(f, "Credit"),
        }
    }
}

/// A magnitude together with the side it sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Balance {
    pub amount: Money,
    pub balance_type: BalanceType,
}

impl Balance {
    pub fn new(amount: Money, balance_type: BalanceType) -> Self {
        Self { amount, balance_type }
    }

    pub fn debit(amount: Money) -> Self {
        Self::new(amount, BalanceType::Debit)
    }

    pub fn credit(amount: Money) -> Self {
        Self::new(amount, BalanceType::Credit)
    }

    /// A zero balance sitting on the given side
    pub fn zero(side: BalanceType) -> Self {
        Self::new(Money::zero(), side)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Signed figure relative to the natural side: positive when the balance
    /// sits on `natural_side`, negative otherwise
    pub fn signed_for(&self, natural_side: BalanceType) -> Decimal {
        if self.balance_type == natural_side {
            self.amount.amount()
        } else {
            -self.amount.amount()
        }
    }

    /// Inverse of [`Balance::signed_for`]; zero lands on the natural side
    pub fn from_signed(value: Decimal, natural_side: BalanceType) -> Self {
        if value < Decimal::ZERO {
            Self::new(Money::from_abs(value), natural_side.flip())
        } else {
            Self::new(Money::from_abs(value), natural_side)
        }
    }

    /// Splits the balance into (debit, credit) trial balance columns
    pub fn columns(&self) -> (Money, Money) {
        match self.balance_type {
            BalanceType::Debit => (self.amount, Money::zero()),
            BalanceType::Credit => (Money::zero(), self.amount),
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.balance_type.suffix())
    }
}
