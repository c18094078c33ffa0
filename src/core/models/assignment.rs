//! Assignment model
//!
//! An assignment records that a user holds an asset. It starts Active and
//! ends in exactly one terminal state; handing the asset out again creates a
//! new assignment rather than reviving the old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Assignment status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// The user currently holds the asset
    #[default]
    Active,
    /// The asset came back
    Returned,
    /// The assignment was withdrawn
    Cancelled,
    /// The user lost the asset
    Lost,
    /// The asset came back broken
    Damaged,
}

impl AssignmentStatus {
    /// Every assignment status, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::Returned,
        Self::Cancelled,
        Self::Lost,
        Self::Damaged,
    ];

    /// Whether the assignment has ended
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }

    /// Whether an existing assignment may move to `next`
    ///
    /// Active may move to any terminal state. Re-applying the current status
    /// is allowed and changes nothing. Everything else is rejected.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || (self == Self::Active && next.is_terminal())
    }

    /// Canonical name, as sent to the backend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Returned => "Returned",
            Self::Cancelled => "Cancelled",
            Self::Lost => "Lost",
            Self::Damaged => "Damaged",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "returned" => Ok(Self::Returned),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "lost" => Ok(Self::Lost),
            "damaged" => Ok(Self::Damaged),
            _ => Err(format!(
                "Invalid assignment status: {s}. Use: active, returned, cancelled, lost, damaged"
            )),
        }
    }
}

/// An assignment as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Opaque identifier
    pub id: String,

    /// The asset being held
    pub asset_id: String,

    /// The user holding it
    pub assigned_to_id: String,

    /// The user who handed it out
    pub assigned_by: String,

    /// When custody started
    pub assignment_date: DateTime<Utc>,

    /// When custody ended, if it has
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,

    /// Lifecycle status
    pub status: AssignmentStatus,

    /// Flagged for priority handling
    #[serde(default)]
    pub is_urgent: bool,

    /// Approved without a manual review step
    #[serde(default)]
    pub is_automatic_approval: bool,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for creating an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssignment {
    /// The asset to hand out
    pub asset_id: String,
    /// The receiving user
    pub assigned_to_id: String,
    /// The user handing it out
    pub assigned_by: String,
    /// When custody starts
    pub assignment_date: DateTime<Utc>,
    /// Initial status (Active unless importing history)
    pub status: AssignmentStatus,
    /// Flagged for priority handling
    pub is_urgent: bool,
    /// Approved without a manual review step
    pub is_automatic_approval: bool,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewAssignment {
    /// Create an Active assignment starting now
    #[must_use]
    pub fn new(
        asset_id: impl Into<String>,
        assigned_to_id: impl Into<String>,
        assigned_by: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            assigned_to_id: assigned_to_id.into(),
            assigned_by: assigned_by.into(),
            assignment_date: Utc::now(),
            status: AssignmentStatus::Active,
            is_urgent: false,
            is_automatic_approval: false,
            notes: None,
        }
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the urgency and automatic-approval flags
    #[must_use]
    pub const fn with_flags(mut self, is_urgent: bool, is_automatic_approval: bool) -> Self {
        self.is_urgent = is_urgent;
        self.is_automatic_approval = is_automatic_approval;
        self
    }

    /// Reject payloads with blank references
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("asset_id", &self.asset_id),
            ("assigned_to_id", &self.assigned_to_id),
            ("assigned_by", &self.assigned_by),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!("missing required field(s): {}", missing.join(", "))))
        }
    }
}

/// Partial update of an assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPatch {
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssignmentStatus>,

    /// When custody ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<DateTime<Utc>>,

    /// Replacement notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// New urgency flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,
}

impl AssignmentPatch {
    /// A patch that only changes the status
    #[must_use]
    pub fn status(status: AssignmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Filter for listing assignments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentFilter {
    /// Only assignments of this asset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,

    /// Only assignments held by this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<String>,

    /// Only assignments in this status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssignmentStatus>,
}

impl AssignmentFilter {
    /// Active assignments of one asset
    #[must_use]
    pub fn active_for(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: Some(asset_id.into()),
            assigned_to_id: None,
            status: Some(AssignmentStatus::Active),
        }
    }

    /// Query-string pairs for the set fields
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(asset_id) = &self.asset_id {
            pairs.push(("asset_id", asset_id.clone()));
        }
        if let Some(user) = &self.assigned_to_id {
            pairs.push(("assigned_to_id", user.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}
