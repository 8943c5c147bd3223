//! Error model of module public APIs.

use thiserror::Error;
use watchtower_contracts::ContractViolation;

/// Result type returned by every public module operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure surfaced to a caller of a module API.
///
/// Argument and contract errors are never recovered inside the module; they
/// always reach the immediate caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// Data crossing the module boundary did not match its declared schema.
    #[error(transparent)]
    ContractViolation(#[from] ContractViolation),

    /// A primitive argument was malformed; nothing was attempted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The module's internal service failed.
    #[error("service failure: {0}")]
    Service(String),
}

impl ApiError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    /// Reject blank string arguments before any service call.
    ///
    /// Returns the argument with surrounding whitespace removed.
    pub fn require_non_empty<'a>(name: &str, value: &'a str) -> ApiResult<&'a str> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Self::invalid_argument(format!("{name} must be a non-empty string")));
        }
        Ok(value)
    }
}
