//! Ports infrastructure
//!
//! Report computations never touch storage. They receive their input from a
//! data-access port defined in the domain crate; adapters (database, external
//! system, in-memory snapshot) implement that port and report failures with
//! the shared [`PortError`].

use std::fmt;
use thiserror::Error;

/// Failure of a ledger data feed
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested record does not exist in the source
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The source could not be reached or did not answer in time
    #[error("Ledger source unavailable: {message}")]
    Unavailable {
        message: String,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        PortError::Unavailable {
            message: message.into(),
        }
    }

    /// Returns true if retrying the same read may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Unavailable { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Port traits extend this so adapters can be shared across async tasks.
pub trait DomainPort: Send + Sync + 'static {}
