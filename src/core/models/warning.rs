//! Warning model
//!
//! A warning records a secondary write (usually an asset status update after
//! an assignment change) that failed while the primary write succeeded. The
//! backend stays the source of truth; a reconcile pass can repair the drift.

use serde::{Deserialize, Serialize};

/// A failed secondary write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// The record that was left inconsistent (asset or assignment id)
    pub subject: String,
    /// What went wrong
    pub message: String,
}

impl Warning {
    /// Create a warning
    #[must_use]
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}
