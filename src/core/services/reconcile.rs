//! Reconciler - repairs asset status drift
//!
//! Compensating writes can fail. This pass re-reads each asset and its Active
//! assignments and rewrites the status where the two disagree.

use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

use crate::core::error::{Error, Result};
use crate::core::models::{AssetStatus, Warning};
use crate::core::ports::{AssetApi, AssignmentApi};

/// Status an asset should have given its Active assignment count
///
/// Damaged, Maintenance, and Retired are legitimate without an assignment and
/// are left alone; only an Assigned asset with nothing Active is freed.
#[must_use]
pub const fn expected_status(current: AssetStatus, active_assignments: usize) -> AssetStatus {
    if active_assignments > 0 {
        AssetStatus::Assigned
    } else if matches!(current, AssetStatus::Assigned) {
        AssetStatus::Available
    } else {
        current
    }
}

/// One status rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repair {
    /// The asset
    pub asset_id: String,
    /// Status before the repair
    pub from: AssetStatus,
    /// Status after the repair
    pub to: AssetStatus,
}

/// Outcome of a reconcile pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Assets that were read successfully
    pub checked: usize,
    /// Status rewrites that were applied
    pub repaired: Vec<Repair>,
    /// One `"<id>: <reason>"` entry per asset that could not be checked or fixed
    pub errors: Vec<String>,
    /// Inconsistencies that need a human (e.g. two Active assignments)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl ReconcileReport {
    /// Whether every asset was checked and fixed
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Re-derives asset status from Active assignments
#[derive(Clone)]
pub struct Reconciler {
    assets: Arc<dyn AssetApi>,
    assignments: Arc<dyn AssignmentApi>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Create a reconciler over the given collaborators
    #[must_use]
    pub fn new(assets: Arc<dyn AssetApi>, assignments: Arc<dyn AssignmentApi>) -> Self {
        Self {
            assets,
            assignments,
        }
    }

    /// Check and repair each asset
    ///
    /// # Errors
    ///
    /// `Validation` when `asset_ids` is empty. Per-asset failures are
    /// collected in the report.
    pub async fn reconcile(&self, asset_ids: &[String]) -> Result<ReconcileReport> {
        if asset_ids.is_empty() {
            return Err(Error::validation("reconcile: no asset ids given"));
        }

        let mut report = ReconcileReport::default();
        for id in asset_ids {
            if let Err(e) = self.reconcile_one(id, &mut report).await {
                report.errors.push(format!("{id}: {e}"));
            }
        }

        info!(
            "reconcile: {} checked, {} repaired, {} failed",
            report.checked,
            report.repaired.len(),
            report.errors.len()
        );
        Ok(report)
    }

    async fn reconcile_one(&self, id: &str, report: &mut ReconcileReport) -> Result<()> {
        let asset = self.assets.get_asset(id).await?;
        let active = self.assignments.active_assignments(id).await?;
        report.checked += 1;

        if active.len() > 1 {
            let ids: Vec<&str> = active.iter().map(|a| a.id.as_str()).collect();
            warn!("asset {id} has {} Active assignments: {}", active.len(), ids.join(", "));
            report.warnings.push(Warning::new(
                id,
                format!("multiple Active assignments: {}", ids.join(", ")),
            ));
        }

        let expected = expected_status(asset.status, active.len());
        if expected != asset.status {
            self.assets.update_asset_status(id, expected).await?;
            info!("asset {id} repaired: {} -> {expected}", asset.status);
            report.repaired.push(Repair {
                asset_id: id.to_string(),
                from: asset.status,
                to: expected,
            });
        }
        Ok(())
    }
}
