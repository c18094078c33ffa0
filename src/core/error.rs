//! Error taxonomy for lifecycle and bulk operations
//!
//! Partial bulk failure is not represented here: it is the normal shape of a
//! [`BulkOperationResult`](super::models::BulkOperationResult) with a non-zero
//! error count.

use thiserror::Error;

use super::models::{AssetStatus, AssignmentStatus};

/// Result alias used by ports and services
pub type Result<T> = std::result::Result<T, Error>;

/// Broad error classes that callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input was missing or malformed (no network call was made)
    Validation,
    /// Referenced asset or assignment does not exist
    NotFound,
    /// A precondition on the current status was not met
    Conflict,
    /// The backend call failed
    Remote,
}

impl ErrorKind {
    /// Get the HTTP status code this kind is reported as
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Remote => 502,
        }
    }

    /// Get the error code string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Remote => "REMOTE_ERROR",
        }
    }
}

/// Errors raised by lifecycle and bulk operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Missing or malformed caller input
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced record does not exist
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Record type ("asset" or "assignment")
        entity: &'static str,
        /// The identifier that was looked up
        id: String,
    },

    /// Asset cannot take a new assignment in its current status
    #[error("asset '{asset_id}' is {current}, expected Available")]
    AssetUnavailable {
        /// The asset that was checked
        asset_id: String,
        /// Its status at the time of the check
        current: AssetStatus,
    },

    /// Assignment status change that the lifecycle does not allow
    #[error("assignment '{id}' cannot move from {from} to {to}")]
    IllegalTransition {
        /// The assignment being updated
        id: String,
        /// Its current status
        from: AssignmentStatus,
        /// The requested status
        to: AssignmentStatus,
    },

    /// Active assignments of an asset could not be listed, so a status
    /// change on it was not attempted
    #[error("could not check active assignments: {0}")]
    ActiveLookup(#[source] Box<Error>),

    /// Backend call failed (transport error or non-success response)
    #[error("remote call failed ({}): {body}", status_label(.status))]
    Remote {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Response body or transport error text
        body: String,
    },
}

impl Error {
    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error for an asset
    #[must_use]
    pub fn asset_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "asset",
            id: id.into(),
        }
    }

    /// Create a not-found error for an assignment
    #[must_use]
    pub fn assignment_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "assignment",
            id: id.into(),
        }
    }

    /// Create a remote error
    #[must_use]
    pub fn remote(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AssetUnavailable { .. } | Self::IllegalTransition { .. } => ErrorKind::Conflict,
            Self::ActiveLookup(_) | Self::Remote { .. } => ErrorKind::Remote,
        }
    }

    /// Whether this is a not-found error
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "no response".to_string(), |code| format!("HTTP {code}"))
}
