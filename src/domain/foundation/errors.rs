//! Error types for the domain layer.
//!
//! Every operation failure is converted into a [`DomainError`] at the
//! boundary of the operation that produced it; nothing leaves a session or
//! a request in an indeterminate state.

use std::fmt;
use thiserror::Error;

/// Error codes organized by category.
///
/// Stable machine-readable codes surfaced to API clients alongside the
/// human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Authentication errors
    InvalidCredentials,

    // Conversation errors
    SessionNotFound,
    SessionBusy,

    // Upstream errors
    AgentUnavailable,
    StorageFailed,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::SessionBusy => "SESSION_BUSY",
            ErrorCode::AgentUnavailable => "AGENT_UNAVAILABLE",
            ErrorCode::StorageFailed => "STORAGE_FAILED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with a code and message.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error (missing or malformed input; surfaced
    /// immediately, no downstream call is attempted).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Creates the single opaque invalid-credentials error. The message is
    /// intentionally identical for unknown emails and wrong passwords to
    /// avoid account enumeration.
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "Invalid credentials")
    }

    /// Creates an error for a session id that does not match the currently
    /// open conversation.
    pub fn session_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionNotFound, message)
    }

    /// Creates an error for a submission while a reply is still in flight.
    pub fn session_busy() -> Self {
        Self::new(
            ErrorCode::SessionBusy,
            "A reply is still pending for this conversation",
        )
    }

    /// Creates an upstream agent delivery error.
    pub fn agent(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AgentUnavailable, message)
    }

    /// Creates an attachment storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageFailed, message)
    }

    /// Creates a data-access error (catalog/order lookup failure; no partial
    /// data is returned).
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::session_not_found("No open conversation");
        assert_eq!(format!("{}", err), "[SESSION_NOT_FOUND] No open conversation");
    }

    #[test]
    fn invalid_credentials_is_opaque() {
        let err = DomainError::invalid_credentials();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert!(!err.message.contains("email"));
        assert!(!err.message.contains("password"));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::SessionBusy), "SESSION_BUSY");
        assert_eq!(format!("{}", ErrorCode::AgentUnavailable), "AGENT_UNAVAILABLE");
    }
}
