//! Batch collaborator port

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::models::BulkOperation;

/// Batch endpoints that apply one operation to many assets at once
///
/// A batch call succeeds or fails as a whole. "Endpoint missing" and
/// "endpoint refused" are both just errors; the executor treats them alike.
#[async_trait]
pub trait BatchApi: Send + Sync {
    /// Apply `operation` to every id in one request
    async fn execute_batch(&self, operation: &BulkOperation, ids: &[String]) -> Result<()>;
}
