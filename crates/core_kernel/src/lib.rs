//! Core Kernel - Foundational types for the ledger reporting engine
//!
//! This crate provides the building blocks shared by every report computation:
//! - Money as a non-negative fixed-point magnitude with precise decimal arithmetic
//! - Balance sides (debit/credit) and two-sided balances
//! - Inclusive date periods and calendar helpers
//! - Typed identifiers and the port error shared by data-access adapters

pub mod money;
pub mod balance;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, MoneyError, Rate};
pub use balance::{Balance, BalanceType};
pub use temporal::{DatePeriod, TemporalError};
pub use identifiers::{AccountGroupId, LedgerAccountId, PartyId};
pub use ports::{DomainPort, PortError};
pub use error::CoreError;
