//! Bulk operation executor
//!
//! Applies one [`BulkOperation`] to an ordered id list. The executor first
//! tries a [`BatchStrategy`] (one request for every id). If that fails for any
//! reason it switches, once, to a [`SequentialStrategy`] that tries each id on
//! its own, in input order, without stopping at the first failure.
//!
//! After the primary writes, the executor applies the lifecycle follow-ups for
//! every id that succeeded, so bulk operations keep the rule that an asset is
//! Assigned exactly when it has an Active assignment.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};

use super::lifecycle::LifecycleSynchronizer;
use crate::core::error::{Error, Result};
use crate::core::models::{
    AssetPatch, AssetStatus, Assignment, AssignmentPatch, AssignmentStatus, BulkOperation,
    BulkOperationResult, ExecutionMode, ItemOutcome, NewAssignment, Warning,
};
use crate::core::ports::{AssetApi, AssignmentApi, BatchApi};

/// Per-id outcomes, one per input id, in input order
pub type PerItemResults = Vec<ItemOutcome>;

/// A way of applying an operation to a list of ids
#[async_trait]
pub trait ExecutionStrategy: Send + Sync {
    /// Which mode this strategy reports as
    fn mode(&self) -> ExecutionMode;

    /// Apply `operation` to `ids`
    ///
    /// An `Err` means the strategy as a whole could not run; the executor
    /// then moves on to its fallback.
    async fn execute(&self, operation: &BulkOperation, ids: &[String]) -> Result<PerItemResults>;
}

/// One request to the batch endpoint for the whole id list
#[derive(Clone)]
pub struct BatchStrategy {
    batch: Arc<dyn BatchApi>,
}

impl std::fmt::Debug for BatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchStrategy").finish_non_exhaustive()
    }
}

impl BatchStrategy {
    /// Create a batch strategy
    #[must_use]
    pub fn new(batch: Arc<dyn BatchApi>) -> Self {
        Self { batch }
    }
}

#[async_trait]
impl ExecutionStrategy for BatchStrategy {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Batch
    }

    async fn execute(&self, operation: &BulkOperation, ids: &[String]) -> Result<PerItemResults> {
        self.batch.execute_batch(operation, ids).await?;
        Ok(ids.iter().map(ItemOutcome::succeeded).collect())
    }
}

/// One request per id, in input order
///
/// A failure on one id never stops the others. Assignments go through the
/// synchronizer so each item gets the Available check and the Assigned write.
#[derive(Clone)]
pub struct SequentialStrategy {
    assets: Arc<dyn AssetApi>,
    synchronizer: LifecycleSynchronizer,
}

impl std::fmt::Debug for SequentialStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialStrategy").finish_non_exhaustive()
    }
}

impl SequentialStrategy {
    /// Create a sequential strategy
    #[must_use]
    pub fn new(assets: Arc<dyn AssetApi>, synchronizer: LifecycleSynchronizer) -> Self {
        Self {
            assets,
            synchronizer,
        }
    }

    async fn apply_one(&self, operation: &BulkOperation, id: &str) -> ItemOutcome {
        let result = match operation {
            BulkOperation::Delete => self.assets.delete_asset(id).await,
            BulkOperation::SetStatus { status } => self.assets.update_asset_status(id, *status).await,
            BulkOperation::Assign {
                assigned_to_id,
                assigned_by,
            } => {
                let new = NewAssignment::new(id, assigned_to_id.as_str(), assigned_by.as_str());
                return match self.synchronizer.create_assignment(new).await {
                    Ok(synced) => ItemOutcome::succeeded(id).with_warning(synced.warning),
                    Err(e) => ItemOutcome::failed(id, e),
                };
            },
            BulkOperation::Transfer { department_id } => {
                let patch = AssetPatch {
                    department_id: Some(department_id.clone()),
                    ..AssetPatch::default()
                };
                self.assets.update_asset(id, &patch).await
            },
            BulkOperation::SetLocation { location } => {
                let patch = AssetPatch {
                    location: Some(location.clone()),
                    ..AssetPatch::default()
                };
                self.assets.update_asset(id, &patch).await
            },
            BulkOperation::SetCategory { category_id } => {
                let patch = AssetPatch {
                    category_id: Some(category_id.clone()),
                    ..AssetPatch::default()
                };
                self.assets.update_asset(id, &patch).await
            },
        };

        match result {
            Ok(()) => ItemOutcome::succeeded(id),
            Err(e) => ItemOutcome::failed(id, e),
        }
    }
}

#[async_trait]
impl ExecutionStrategy for SequentialStrategy {
    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }

    async fn execute(&self, operation: &BulkOperation, ids: &[String]) -> Result<PerItemResults> {
        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            let outcome = self.apply_one(operation, id).await;
            if let Err(e) = &outcome.result {
                debug!("{operation} failed for {id}: {e}");
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

/// Executor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Try the batch endpoint before going per-item
    pub prefer_batch: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { prefer_batch: true }
    }
}

/// Applies bulk operations with batch-then-sequential escalation
pub struct BulkOperationExecutor {
    primary: Option<Box<dyn ExecutionStrategy>>,
    fallback: Box<dyn ExecutionStrategy>,
    assignments: Arc<dyn AssignmentApi>,
    synchronizer: LifecycleSynchronizer,
}

impl std::fmt::Debug for BulkOperationExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkOperationExecutor")
            .field("primary", &self.primary.as_ref().map(|s| s.mode()))
            .field("fallback", &self.fallback.mode())
            .finish_non_exhaustive()
    }
}

/// Active assignments per asset, looked up before the primary writes
type ActiveAssignments = HashMap<String, Vec<Assignment>>;

impl BulkOperationExecutor {
    /// Create an executor with the standard batch and sequential strategies
    #[must_use]
    pub fn new(
        assets: Arc<dyn AssetApi>,
        assignments: Arc<dyn AssignmentApi>,
        batch: Arc<dyn BatchApi>,
        config: ExecutorConfig,
    ) -> Self {
        let synchronizer = LifecycleSynchronizer::new(Arc::clone(&assets), Arc::clone(&assignments));
        let primary: Option<Box<dyn ExecutionStrategy>> = if config.prefer_batch {
            Some(Box::new(BatchStrategy::new(batch)))
        } else {
            None
        };
        let fallback = Box::new(SequentialStrategy::new(assets, synchronizer.clone()));

        Self {
            primary,
            fallback,
            assignments,
            synchronizer,
        }
    }

    /// Create an executor from explicit strategies
    #[must_use]
    pub fn with_strategies(
        primary: Option<Box<dyn ExecutionStrategy>>,
        fallback: Box<dyn ExecutionStrategy>,
        assets: Arc<dyn AssetApi>,
        assignments: Arc<dyn AssignmentApi>,
    ) -> Self {
        let synchronizer = LifecycleSynchronizer::new(assets, Arc::clone(&assignments));
        Self {
            primary,
            fallback,
            assignments,
            synchronizer,
        }
    }

    /// Apply `operation` to every id
    ///
    /// Partial failure is reported in the result, never as an `Err`. For
    /// delete and status changes, an id whose Active assignments cannot be
    /// listed is not written and counts as failed.
    ///
    /// # Errors
    ///
    /// `Validation` when the input is malformed (empty id list, blank id or
    /// parameter, or a status only an assignment may set). No backend call is
    /// made in that case.
    pub async fn execute(
        &self,
        operation: &BulkOperation,
        ids: &[String],
    ) -> Result<BulkOperationResult> {
        operation.validate(ids)?;
        info!("{operation}: {} asset(s)", ids.len());

        let (active, blocked) = if operation.touches_assignments() {
            self.lookup_active(ids).await
        } else {
            (ActiveAssignments::new(), vec![None; ids.len()])
        };

        let runnable: Vec<String> = ids
            .iter()
            .zip(&blocked)
            .filter(|(_, cause)| cause.is_none())
            .map(|(id, _)| id.clone())
            .collect();

        let (mode, ran) = if runnable.is_empty() {
            (self.preferred_mode(), Vec::new())
        } else {
            self.run_strategies(operation, &runnable).await
        };

        let mut ran = ran.into_iter();
        let mut outcomes = Vec::with_capacity(ids.len());
        for (id, cause) in ids.iter().zip(blocked) {
            match cause {
                Some(e) => outcomes.push(ItemOutcome::failed(id, Error::ActiveLookup(Box::new(e)))),
                None => outcomes.extend(ran.next()),
            }
        }

        for outcome in outcomes.iter_mut().filter(|o| o.is_success()) {
            let follow_up = self.follow_up(operation, mode, &outcome.id, &active).await;
            outcome.warnings.extend(follow_up);
        }

        let result = BulkOperationResult::from_outcomes(mode, outcomes);

        if result.success {
            info!("{operation}: {} processed ({mode})", result.processed_count);
        } else {
            warn!(
                "{operation}: {} processed, {} failed ({mode})",
                result.processed_count, result.error_count
            );
        }
        Ok(result)
    }

    async fn run_strategies(
        &self,
        operation: &BulkOperation,
        ids: &[String],
    ) -> (ExecutionMode, PerItemResults) {
        if let Some(primary) = &self.primary {
            match primary.execute(operation, ids).await {
                Ok(outcomes) => return (primary.mode(), outcomes),
                Err(e) => {
                    info!("{operation}: {} strategy failed ({e}), retrying per item", primary.mode());
                },
            }
        }

        let outcomes = self.fallback.execute(operation, ids).await.unwrap_or_else(|e| {
            warn!("{operation}: {} strategy failed ({e})", self.fallback.mode());
            ids.iter().map(|id| ItemOutcome::failed(id, e.clone())).collect()
        });
        (self.fallback.mode(), outcomes)
    }

    fn preferred_mode(&self) -> ExecutionMode {
        self.primary.as_ref().map_or_else(|| self.fallback.mode(), |p| p.mode())
    }

    /// List Active assignments for every id
    ///
    /// The second vector is aligned with `ids`: an id whose lookup failed is
    /// left out of the primary writes, since changing it blind could leave an
    /// Active assignment on an asset that is no longer Assigned.
    async fn lookup_active(&self, ids: &[String]) -> (ActiveAssignments, Vec<Option<Error>>) {
        let mut active = ActiveAssignments::new();
        let mut blocked = Vec::with_capacity(ids.len());
        for id in ids {
            match self.assignments.active_assignments(id).await {
                Ok(list) => {
                    if !list.is_empty() {
                        active.insert(id.clone(), list);
                    }
                    blocked.push(None);
                },
                Err(e) => {
                    warn!("active assignments of {id} could not be listed, skipping it: {e}");
                    blocked.push(Some(e));
                },
            }
        }
        (active, blocked)
    }

    /// Lifecycle writes after a successful primary write
    ///
    /// A batch assign writes Assigned without the per-asset Available check
    /// that the sequential path gets from `create_assignment`; the batch
    /// endpoint is trusted to enforce that precondition itself.
    async fn follow_up(
        &self,
        operation: &BulkOperation,
        mode: ExecutionMode,
        id: &str,
        active: &ActiveAssignments,
    ) -> Vec<Warning> {
        match operation {
            BulkOperation::Assign { .. } if mode == ExecutionMode::Batch => self
                .synchronizer
                .write_asset_status(id, AssetStatus::Assigned)
                .await
                .into_iter()
                .collect(),
            BulkOperation::SetStatus { status } => {
                let closing = if *status == AssetStatus::Damaged {
                    AssignmentStatus::Damaged
                } else {
                    AssignmentStatus::Returned
                };
                self.close_active(id, active, closing, false).await
            },
            BulkOperation::Delete => {
                self.close_active(id, active, AssignmentStatus::Cancelled, true).await
            },
            _ => Vec::new(),
        }
    }

    /// Close the Active assignments of an asset without touching its status
    ///
    /// With `tolerate_missing`, a not-found on the close means the backend
    /// already removed the assignment together with the asset.
    async fn close_active(
        &self,
        asset_id: &str,
        active: &ActiveAssignments,
        closing: AssignmentStatus,
        tolerate_missing: bool,
    ) -> Vec<Warning> {
        let Some(list) = active.get(asset_id) else {
            return Vec::new();
        };

        let patch = AssignmentPatch {
            status: Some(closing),
            return_date: Some(Utc::now()),
            ..AssignmentPatch::default()
        };

        let mut warnings = Vec::new();
        for assignment in list {
            match self.assignments.update_assignment(&assignment.id, &patch).await {
                Ok(_) => info!("assignment {} of asset {asset_id} closed as {closing}", assignment.id),
                Err(e) if tolerate_missing && e.is_not_found() => {
                    debug!("assignment {} went away with asset {asset_id}", assignment.id);
                },
                Err(e) => {
                    warn!("assignment {} of asset {asset_id} could not be closed: {e}", assignment.id);
                    warnings.push(Warning::new(
                        assignment.id.as_str(),
                        format!("failed to close as {closing} after asset {asset_id} changed: {e}"),
                    ));
                },
            }
        }
        warnings
    }
}
