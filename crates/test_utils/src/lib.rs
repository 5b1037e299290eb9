//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ledger reporting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, amounts, and a standard chart of accounts
//! - `builders`: Builder patterns for postings and ledger snapshots
//! - `assertions`: Custom assertion helpers for money and balances
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
