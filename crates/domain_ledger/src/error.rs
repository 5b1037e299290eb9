//! Ledger domain errors

use thiserror::Error;

use core_kernel::{MoneyError, PortError, TemporalError};

/// Errors that can occur in the ledger reporting domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Posting breaks an ingestion invariant
    #[error("Invalid posting: {0}")]
    InvalidPosting(String),

    /// Aging boundaries are empty, zero, or not strictly increasing
    #[error("Invalid aging boundaries: {0}")]
    InvalidBoundaries(String),

    /// Parent pointers of the account groups form a cycle
    #[error("Cyclic account group hierarchy at group {0}")]
    CyclicGroupHierarchy(String),

    /// A group refers to a parent that does not exist
    #[error("Account group {group} refers to unknown parent {parent}")]
    UnknownParentGroup {
        group: String,
        parent: String,
    },

    /// A child group's nature differs from its parent's
    #[error("Account group {group} has nature {nature}, but its parent is {parent_nature}")]
    NatureMismatch {
        group: String,
        nature: String,
        parent_nature: String,
    },

    /// Group registered twice
    #[error("Duplicate account group: {0}")]
    DuplicateGroup(String),

    /// Ledger account registered twice
    #[error("Duplicate ledger account: {0}")]
    DuplicateAccount(String),

    /// A ledger account refers to a group that does not exist
    #[error("Unknown account group: {0}")]
    UnknownGroup(String),

    /// Ledger account not found
    #[error("Ledger account not found: {0}")]
    AccountNotFound(String),

    /// Unrecognised comparison mode
    #[error("Invalid comparison mode: {0}")]
    InvalidComparison(String),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error("Data access error: {0}")]
    Port(#[from] PortError),
}
