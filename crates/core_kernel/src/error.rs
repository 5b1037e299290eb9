//! Kernel errors shared by the domain and the report runner

use thiserror::Error;
use crate::money::MoneyError;
use crate::temporal::TemporalError;

/// Errors raised by kernel values and by report settings built from them
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// A report setting failed validation; `key` names the setting
    #[error("Invalid setting `{key}`: {message}")]
    InvalidSetting {
        key: String,
        message: String,
    },
}

impl CoreError {
    pub fn invalid_setting(key: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }

    /// The setting this error concerns, if any
    pub fn setting(&self) -> Option<&str> {
        match self {
            CoreError::InvalidSetting { key, .. } => Some(key),
            _ => None,
        }
    }
}
