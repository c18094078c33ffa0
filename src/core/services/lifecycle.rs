//! Lifecycle synchronizer - keeps asset status in step with assignments
//!
//! Every assignment create, update, or delete implies an asset status. The
//! assignment write and the asset write are separate backend calls; when the
//! asset write fails the assignment change stands and a [`Warning`] is
//! returned (and logged) so a reconcile pass can repair the asset later.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};

use crate::core::error::{Error, Result};
use crate::core::models::{
    AssetStatus, Assignment, AssignmentPatch, AssignmentStatus, NewAssignment, Warning,
};
use crate::core::ports::{AssetApi, AssignmentApi};

/// What happened to an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleTrigger {
    /// A new assignment was stored
    Created,
    /// An existing assignment was updated
    Updated {
        /// Its status before the update
        previous: AssignmentStatus,
    },
    /// An assignment was deleted
    Deleted,
}

/// Asset status implied by an assignment event, if any
///
/// `status` is the assignment status after the operation, or at the time of
/// deletion for [`LifecycleTrigger::Deleted`].
///
/// | Trigger | Assignment status | Asset status |
/// |---|---|---|
/// | created | Active | Assigned |
/// | updated | Returned, Cancelled | Available |
/// | updated | Lost, Damaged | Damaged |
/// | updated | Active, or unchanged | - |
/// | deleted | was Active | Available |
/// | deleted | otherwise | - |
#[must_use]
pub fn derived_asset_status(
    trigger: LifecycleTrigger,
    status: AssignmentStatus,
) -> Option<AssetStatus> {
    match trigger {
        LifecycleTrigger::Created => match status {
            AssignmentStatus::Active => Some(AssetStatus::Assigned),
            _ => None,
        },
        LifecycleTrigger::Updated { previous } if previous == status => None,
        LifecycleTrigger::Updated { .. } => match status {
            AssignmentStatus::Returned | AssignmentStatus::Cancelled => Some(AssetStatus::Available),
            AssignmentStatus::Lost | AssignmentStatus::Damaged => Some(AssetStatus::Damaged),
            AssignmentStatus::Active => None,
        },
        LifecycleTrigger::Deleted => match status {
            AssignmentStatus::Active => Some(AssetStatus::Available),
            _ => None,
        },
    }
}

/// A stored record plus the warning from its follow-up asset write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synced<T> {
    /// The assignment as the backend stored it (or as it was before deletion)
    pub record: T,
    /// Set when the follow-up asset status write failed
    pub warning: Option<Warning>,
}

/// Applies assignment mutations and the asset status they imply
#[derive(Clone)]
pub struct LifecycleSynchronizer {
    assets: Arc<dyn AssetApi>,
    assignments: Arc<dyn AssignmentApi>,
}

impl std::fmt::Debug for LifecycleSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleSynchronizer").finish_non_exhaustive()
    }
}

impl LifecycleSynchronizer {
    /// Create a synchronizer over the given collaborators
    #[must_use]
    pub fn new(assets: Arc<dyn AssetApi>, assignments: Arc<dyn AssignmentApi>) -> Self {
        Self {
            assets,
            assignments,
        }
    }

    /// Propagate an assignment event to its asset
    ///
    /// Returns a warning instead of failing when the asset write fails.
    pub async fn synchronize(
        &self,
        trigger: LifecycleTrigger,
        assignment: &Assignment,
    ) -> Option<Warning> {
        match derived_asset_status(trigger, assignment.status) {
            Some(status) => self.write_asset_status(&assignment.asset_id, status).await,
            None => {
                debug!(
                    "assignment {} ({:?}, {}): no asset status change",
                    assignment.id, trigger, assignment.status
                );
                None
            },
        }
    }

    /// Write an asset status as a compensating step
    ///
    /// Failures are logged and returned as a warning, never as an error.
    pub async fn write_asset_status(&self, asset_id: &str, status: AssetStatus) -> Option<Warning> {
        match self.assets.update_asset_status(asset_id, status).await {
            Ok(()) => {
                debug!("asset {asset_id} set to {status}");
                None
            },
            Err(e) => {
                warn!("asset {asset_id} could not be set to {status}: {e}");
                Some(Warning::new(asset_id, format!("failed to set status to {status}: {e}")))
            },
        }
    }

    /// Create an assignment and mark its asset Assigned
    ///
    /// # Errors
    ///
    /// - `Validation` when a required reference is blank (no backend call)
    /// - `NotFound` when the asset does not exist
    /// - `AssetUnavailable` when the asset is not Available
    ///
    /// The Available check is advisory: two callers can both pass it before
    /// either creates its assignment.
    pub async fn create_assignment(&self, new: NewAssignment) -> Result<Synced<Assignment>> {
        new.validate()?;

        let asset = self.assets.get_asset(&new.asset_id).await?;
        if !asset.status.is_assignable() {
            return Err(Error::AssetUnavailable {
                asset_id: asset.id,
                current: asset.status,
            });
        }

        let created = self.assignments.create_assignment(&new).await?;
        info!(
            "assignment {} created: asset {} -> {}",
            created.id, created.asset_id, created.assigned_to_id
        );

        let warning = self.synchronize(LifecycleTrigger::Created, &created).await;
        Ok(Synced {
            record: created,
            warning,
        })
    }

    /// Update an assignment and propagate a status change to its asset
    ///
    /// Moving out of Active stamps `return_date` with the current time unless
    /// the patch carries one.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the existing assignment cannot be read
    /// - `IllegalTransition` when the status change is not allowed
    pub async fn update_assignment(
        &self,
        id: &str,
        mut patch: AssignmentPatch,
    ) -> Result<Synced<Assignment>> {
        let existing = self.read_existing(id).await?;

        if let Some(next) = patch.status {
            if !existing.status.can_transition_to(next) {
                return Err(Error::IllegalTransition {
                    id: id.to_string(),
                    from: existing.status,
                    to: next,
                });
            }
            if next != existing.status && next.is_terminal() && patch.return_date.is_none() {
                patch.return_date = Some(Utc::now());
            }
        }

        let updated = self.assignments.update_assignment(id, &patch).await?;
        if updated.status != existing.status {
            info!("assignment {id}: {} -> {}", existing.status, updated.status);
        }

        let trigger = LifecycleTrigger::Updated {
            previous: existing.status,
        };
        let warning = self.synchronize(trigger, &updated).await;
        Ok(Synced {
            record: updated,
            warning,
        })
    }

    /// Move an assignment to a new status
    pub async fn transition(
        &self,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Synced<Assignment>> {
        self.update_assignment(id, AssignmentPatch::status(status)).await
    }

    /// Delete an assignment, freeing its asset if it was Active
    ///
    /// Returns the record as it was before deletion.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the existing assignment cannot be read
    pub async fn delete_assignment(&self, id: &str) -> Result<Synced<Assignment>> {
        let existing = self.read_existing(id).await?;

        self.assignments.delete_assignment(id).await?;
        info!("assignment {id} deleted (was {})", existing.status);

        let warning = self.synchronize(LifecycleTrigger::Deleted, &existing).await;
        Ok(Synced {
            record: existing,
            warning,
        })
    }

    async fn read_existing(&self, id: &str) -> Result<Assignment> {
        if id.trim().is_empty() {
            return Err(Error::validation("assignment id is required"));
        }
        self.assignments.get_assignment(id).await.map_err(|e| {
            debug!("assignment {id} could not be read: {e}");
            Error::assignment_not_found(id)
        })
    }
}
