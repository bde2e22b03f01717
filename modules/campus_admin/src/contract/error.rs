//! Contract error types for the campus admin module
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Campus admin domain errors
///
/// Every variant is terminal for the call that produced it; nothing is retried
/// inside the module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampusError {
    /// Referenced record is absent
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource kind (member, section, board, ...)
        resource: String,
        /// Offending identifier
        id: String,
    },
    /// Uniqueness or invariant violation
    #[error("Conflict: {reason}")]
    Conflict { reason: String },
    /// Operation not permitted given the relationship between records
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },
    /// Malformed or empty request payload
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
    /// Storage or other unexpected failure
    #[error("Internal error")]
    Internal,
}

impl CampusError {
    pub fn not_found(resource: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        Self::InvalidOperation {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Log a storage failure and collapse it into [`CampusError::Internal`]
    pub fn storage(error: anyhow::Error) -> Self {
        tracing::error!(error = ?error, "storage operation failed");
        Self::Internal
    }
}
