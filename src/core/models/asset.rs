//! Asset model
//!
//! An asset is a tracked physical item (a laptop, a vehicle, a drill). Its
//! status is derived from its assignments and is only written by the
//! lifecycle services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asset status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AssetStatus {
    /// In stock, free to be assigned
    #[default]
    Available,
    /// Held by a user through an Active assignment
    Assigned,
    /// Broken, lost, or otherwise unusable
    Damaged,
    /// Out of service for repair or inspection
    Maintenance,
    /// Permanently withdrawn
    Retired,
}

impl AssetStatus {
    /// Every asset status, in declaration order
    pub const ALL: [Self; 5] = [
        Self::Available,
        Self::Assigned,
        Self::Damaged,
        Self::Maintenance,
        Self::Retired,
    ];

    /// Check whether a string names a valid asset status
    ///
    /// Matching is case-insensitive, like parsing.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        s.parse::<Self>().is_ok()
    }

    /// Whether a new assignment may be created for an asset in this status
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::Available)
    }

    /// Canonical name, as sent to the backend
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Assigned => "Assigned",
            Self::Damaged => "Damaged",
            Self::Maintenance => "Maintenance",
            Self::Retired => "Retired",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "assigned" => Ok(Self::Assigned),
            "damaged" => Ok(Self::Damaged),
            "maintenance" => Ok(Self::Maintenance),
            "retired" => Ok(Self::Retired),
            _ => Err(format!(
                "Invalid asset status: {s}. Use: available, assigned, damaged, maintenance, retired"
            )),
        }
    }
}

/// A tracked asset as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Opaque identifier
    pub id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Current status
    pub status: AssetStatus,

    /// Category reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    /// Owning department reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,

    /// Free-form physical location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// When the asset was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the asset was last modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Asset {
    /// Create an asset with only an id and a status
    #[must_use]
    pub fn new(id: impl Into<String>, status: AssetStatus) -> Self {
        Self {
            id: id.into(),
            name: None,
            status,
            category_id: None,
            department_id: None,
            location: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial update of non-status asset attributes
///
/// Status never travels through here; it has its own collaborator call so the
/// lifecycle services stay the only writers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatch {
    /// New department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,

    /// New location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// New category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl AssetPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.department_id.is_none() && self.location.is_none() && self.category_id.is_none()
    }
}
