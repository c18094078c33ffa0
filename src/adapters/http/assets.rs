//! `AssetApi` over REST

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::HttpBackend;
use crate::core::error::Result;
use crate::core::models::{Asset, AssetPatch, AssetStatus};
use crate::core::ports::AssetApi;

#[async_trait]
impl AssetApi for HttpBackend {
    async fn get_asset(&self, id: &str) -> Result<Asset> {
        let request = self.request(Method::GET, &["assets", id]);
        self.send_json(request, "asset", id).await
    }

    async fn update_asset_status(&self, id: &str, status: AssetStatus) -> Result<()> {
        let request = self
            .request(Method::PATCH, &["assets", id, "status"])
            .json(&json!({ "status": status }));
        self.send(request, "asset", id).await?;
        Ok(())
    }

    async fn update_asset(&self, id: &str, patch: &AssetPatch) -> Result<()> {
        let request = self.request(Method::PATCH, &["assets", id]).json(patch);
        self.send(request, "asset", id).await?;
        Ok(())
    }

    async fn delete_asset(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &["assets", id]);
        self.send(request, "asset", id).await?;
        Ok(())
    }
}
