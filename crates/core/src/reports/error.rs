//! Report error types.

use ledgerview_shared::AppError;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A store read failed or referenced data is missing.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The filters cannot describe a report.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// A lookup table the report relies on is absent or empty.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Background computation did not complete.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    /// Returns true when the error means referenced data does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound { .. }))
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { .. } => Self::NotFound(error.to_string()),
            StoreError::Backend(message) => Self::Database(message),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(error: ReportError) -> Self {
        match error {
            ReportError::Store(store) => store.into(),
            ReportError::InvalidFilter(message) => Self::Validation(message),
            ReportError::Configuration(message) => Self::Configuration(message),
            ReportError::Internal(message) => Self::Internal(message),
        }
    }
}
