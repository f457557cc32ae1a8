//! Shared error type for read-only data-access ports.

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Failure reading catalog, order, or customer data.
///
/// Surfaced to callers as a generic failure; no partial data is returned.
#[derive(Debug, Clone, Error)]
#[error("data access failed: {message}")]
pub struct DataAccessError {
    pub message: String,
}

impl DataAccessError {
    /// Creates a new data access error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<DataAccessError> for DomainError {
    fn from(err: DataAccessError) -> Self {
        DomainError::data_access(err.message)
    }
}
