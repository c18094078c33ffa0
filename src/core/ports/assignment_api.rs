//! Assignment collaborator port

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::models::{Assignment, AssignmentFilter, AssignmentPatch, NewAssignment};

/// Backend operations on assignments
///
/// Writes here never touch asset status; the lifecycle synchronizer issues
/// that write separately.
#[async_trait]
pub trait AssignmentApi: Send + Sync {
    /// Create an assignment, returning the stored record
    async fn create_assignment(&self, new: &NewAssignment) -> Result<Assignment>;

    /// Fetch an assignment
    async fn get_assignment(&self, id: &str) -> Result<Assignment>;

    /// Apply a partial update, returning the stored record
    async fn update_assignment(&self, id: &str, patch: &AssignmentPatch) -> Result<Assignment>;

    /// Delete an assignment
    async fn delete_assignment(&self, id: &str) -> Result<()>;

    /// List assignments matching a filter
    async fn list_assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>>;

    /// Active assignments of one asset
    async fn active_assignments(&self, asset_id: &str) -> Result<Vec<Assignment>> {
        self.list_assignments(&AssignmentFilter::active_for(asset_id)).await
    }
}
