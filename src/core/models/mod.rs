//! Domain models for assetkeeper
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Asset`] / [`AssetStatus`] - A tracked physical item and its state
//! - [`Assignment`] / [`AssignmentStatus`] - Custody of an asset by a user
//! - [`BulkOperation`] / [`BulkOperationResult`] - One action over many assets
//! - [`Warning`] - A secondary write that failed without failing the operation

mod asset;
mod assignment;
mod bulk;
mod warning;

pub use asset::{Asset, AssetPatch, AssetStatus};
pub use assignment::{
    Assignment, AssignmentFilter, AssignmentPatch, AssignmentStatus, NewAssignment,
};
pub use bulk::{BulkOperation, BulkOperationResult, ExecutionMode, ItemOutcome};
pub use warning::Warning;
