//! Asset collaborator port

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::models::{Asset, AssetPatch, AssetStatus};

/// Backend operations on single assets
#[async_trait]
pub trait AssetApi: Send + Sync {
    /// Fetch an asset
    ///
    /// Returns `Error::NotFound` when the asset does not exist.
    async fn get_asset(&self, id: &str) -> Result<Asset>;

    /// Set an asset's status
    ///
    /// Idempotent: writing the current status again succeeds.
    async fn update_asset_status(&self, id: &str, status: AssetStatus) -> Result<()>;

    /// Change department, location, or category
    async fn update_asset(&self, id: &str, patch: &AssetPatch) -> Result<()>;

    /// Delete an asset
    async fn delete_asset(&self, id: &str) -> Result<()>;
}
