//! Report error handling

use serde::Serialize;
use thiserror::Error;

use core_kernel::{CoreError, PortError};
use domain_ledger::LedgerError;

/// Report runner error types
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body written in place of a report
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ReportError {
    /// Stable machine-readable error kind
    pub fn error_type(&self) -> &'static str {
        match self {
            ReportError::NotFound(_) => "not_found",
            ReportError::BadRequest(_) => "bad_request",
            ReportError::Validation(_) => "validation_error",
            ReportError::DataAccess(_) => "data_access_error",
            ReportError::Internal(_) => "internal_error",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<LedgerError> for ReportError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AccountNotFound(_) | LedgerError::UnknownGroup(_) => {
                ReportError::NotFound(err.to_string())
            }
            LedgerError::InvalidComparison(_)
            | LedgerError::InvalidBoundaries(_)
            | LedgerError::Temporal(_) => ReportError::BadRequest(err.to_string()),
            LedgerError::Port(port) => port.into(),
            other => ReportError::Validation(other.to_string()),
        }
    }
}

impl From<PortError> for ReportError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ReportError::NotFound(err.to_string()),
            PortError::Unavailable { .. } => ReportError::DataAccess(err.to_string()),
        }
    }
}

impl From<CoreError> for ReportError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Temporal(_) => ReportError::BadRequest(err.to_string()),
            CoreError::Money(_) | CoreError::InvalidSetting { .. } => {
                ReportError::Validation(err.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::TemporalError;

    #[test]
    fn test_port_errors_map_by_kind() {
        let kind = |err: PortError| ReportError::from(err).error_type();

        assert_eq!(kind(PortError::not_found("LedgerAccount", "LAC-1")), "not_found");
        assert_eq!(kind(PortError::unavailable("timed out")), "data_access_error");
    }

    #[test]
    fn test_ledger_errors_map_by_kind() {
        let not_found: ReportError = LedgerError::AccountNotFound("LAC-9".into()).into();
        assert_eq!(not_found.error_type(), "not_found");

        let bad: ReportError = LedgerError::InvalidComparison("fortnight".into()).into();
        assert_eq!(bad.error_type(), "bad_request");

        let invalid: ReportError = LedgerError::InvalidPosting("J-1".into()).into();
        assert_eq!(invalid.error_type(), "validation_error");

        let wrapped: ReportError = LedgerError::Port(PortError::unavailable("down")).into();
        assert_eq!(wrapped.error_type(), "data_access_error");
    }

    #[test]
    fn test_core_errors_map_by_kind() {
        let setting: ReportError = CoreError::invalid_setting("comparison", "unknown").into();
        assert_eq!(setting.error_type(), "validation_error");

        let period: ReportError = CoreError::from(TemporalError::OutOfRange("x".into())).into();
        assert_eq!(period.error_type(), "bad_request");
    }

    #[test]
    fn test_response_body() {
        let body = ReportError::NotFound("Ledger account LAC-1".into()).to_response();
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "Not found: Ledger account LAC-1");
    }
}
