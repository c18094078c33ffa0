//! Bulk operation model
//!
//! A bulk operation is one action applied to an ordered list of asset ids.
//! The result is always a count summary; partial failure is a normal outcome.

use serde::{Deserialize, Serialize};

use super::{AssetStatus, Warning};
use crate::core::error::{Error, Result};

/// One action applied to many assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BulkOperation {
    /// Delete the assets
    Delete,
    /// Set the asset status
    SetStatus {
        /// Target status (never Assigned)
        status: AssetStatus,
    },
    /// Hand every asset to one user
    Assign {
        /// The receiving user
        assigned_to_id: String,
        /// The user handing them out
        assigned_by: String,
    },
    /// Move the assets to another department
    Transfer {
        /// Destination department
        department_id: String,
    },
    /// Change the physical location
    SetLocation {
        /// New location
        location: String,
    },
    /// Change the category
    SetCategory {
        /// New category
        category_id: String,
    },
}

impl BulkOperation {
    /// Short operation name used in logs and reports
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::SetStatus { .. } => "setStatus",
            Self::Assign { .. } => "assign",
            Self::Transfer { .. } => "transfer",
            Self::SetLocation { .. } => "setLocation",
            Self::SetCategory { .. } => "setCategory",
        }
    }

    /// Whether the operation can change assignment state and so needs the
    /// active assignments of each asset looked up first
    #[must_use]
    pub const fn touches_assignments(&self) -> bool {
        matches!(self, Self::Delete | Self::SetStatus { .. })
    }

    /// Reject malformed input before any backend call
    pub fn validate(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::validation(format!("{}: no asset ids given", self.name())));
        }
        if let Some(pos) = ids.iter().position(|id| id.trim().is_empty()) {
            return Err(Error::validation(format!(
                "{}: asset id at position {pos} is blank",
                self.name()
            )));
        }

        let blank = |field: &str, value: &str| {
            if value.trim().is_empty() {
                Err(Error::validation(format!("{}: {field} is required", self.name())))
            } else {
                Ok(())
            }
        };

        match self {
            Self::Delete => Ok(()),
            Self::SetStatus {
                status: AssetStatus::Assigned,
            } => Err(Error::validation(
                "setStatus: Assigned can only be set by creating an assignment",
            )),
            Self::SetStatus { .. } => Ok(()),
            Self::Assign {
                assigned_to_id,
                assigned_by,
            } => {
                blank("assigned_to_id", assigned_to_id)?;
                blank("assigned_by", assigned_by)
            },
            Self::Transfer { department_id } => blank("department_id", department_id),
            Self::SetLocation { location } => blank("location", location),
            Self::SetCategory { category_id } => blank("category_id", category_id),
        }
    }
}

impl std::fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delete => write!(f, "delete"),
            Self::SetStatus { status } => write!(f, "setStatus({status})"),
            Self::Assign { assigned_to_id, .. } => write!(f, "assign(to {assigned_to_id})"),
            Self::Transfer { department_id } => write!(f, "transfer(to {department_id})"),
            Self::SetLocation { location } => write!(f, "setLocation({location})"),
            Self::SetCategory { category_id } => write!(f, "setCategory({category_id})"),
        }
    }
}

/// Which strategy produced the per-item outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One request to the batch endpoint
    Batch,
    /// One request per id, in input order
    Sequential,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Batch => write!(f, "batch"),
            Self::Sequential => write!(f, "sequential"),
        }
    }
}

/// Outcome for a single id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// The asset id
    pub id: String,
    /// Whether the primary write succeeded
    pub result: Result<()>,
    /// Secondary writes that failed for this id
    pub warnings: Vec<Warning>,
}

impl ItemOutcome {
    /// A successful outcome
    #[must_use]
    pub fn succeeded(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result: Ok(()),
            warnings: Vec::new(),
        }
    }

    /// A failed outcome
    #[must_use]
    pub fn failed(id: impl Into<String>, error: Error) -> Self {
        Self {
            id: id.into(),
            result: Err(error),
            warnings: Vec::new(),
        }
    }

    /// Attach a warning, if any
    #[must_use]
    pub fn with_warning(mut self, warning: Option<Warning>) -> Self {
        self.warnings.extend(warning);
        self
    }

    /// Whether the primary write succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated report of a bulk operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperationResult {
    /// True iff no id failed
    pub success: bool,
    /// Ids whose primary write succeeded
    pub processed_count: usize,
    /// Ids whose primary write failed
    pub error_count: usize,
    /// One `"<id>: <reason>"` entry per failed id, in failure order
    pub errors: Vec<String>,
    /// Secondary writes that failed (not counted as errors)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
    /// Strategy that produced the outcomes
    pub strategy: ExecutionMode,
}

impl BulkOperationResult {
    /// Tally per-item outcomes into a report
    #[must_use]
    pub fn from_outcomes(strategy: ExecutionMode, outcomes: Vec<ItemOutcome>) -> Self {
        let mut processed_count = 0;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for outcome in outcomes {
            match outcome.result {
                Ok(()) => processed_count += 1,
                Err(e) => errors.push(format!("{}: {e}", outcome.id)),
            }
            warnings.extend(outcome.warnings);
        }

        let error_count = errors.len();
        Self {
            success: error_count == 0,
            processed_count,
            error_count,
            errors,
            warnings,
            strategy,
        }
    }

    /// Total number of ids the report covers
    #[must_use]
    pub const fn total(&self) -> usize {
        self.processed_count + self.error_count
    }
}
