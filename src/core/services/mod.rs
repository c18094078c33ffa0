//! Business logic services
//!
//! Orchestration over the port traits. The status rules themselves are pure
//! functions ([`derived_asset_status`], [`expected_status`]); the services
//! apply them against the backend.
//!
//! - [`lifecycle`] - Assignment mutations and the asset status they imply
//! - [`bulk`] - One operation over many assets, batch first, then per item
//! - [`reconcile`] - Repair asset status drift

pub mod bulk;
pub mod lifecycle;
pub mod reconcile;

pub use bulk::{
    BatchStrategy, BulkOperationExecutor, ExecutionStrategy, ExecutorConfig, PerItemResults,
    SequentialStrategy,
};
pub use lifecycle::{LifecycleSynchronizer, LifecycleTrigger, Synced, derived_asset_status};
pub use reconcile::{ReconcileReport, Reconciler, Repair, expected_status};
