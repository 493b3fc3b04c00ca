//! Error types for the Trailmark engine.

use thiserror::Error;

/// All possible errors from the Trailmark engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    // Storage capability errors
    #[error("storage write failed: {0}")]
    StorageWrite(String),

    #[error("storage read failed: {0}")]
    StorageRead(String),

    // State errors
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl Error {
    /// Shorthand for a validation failure on one input field.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
