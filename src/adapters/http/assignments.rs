//! `AssignmentApi` over REST

use async_trait::async_trait;
use reqwest::Method;

use super::HttpBackend;
use crate::core::error::Result;
use crate::core::models::{Assignment, AssignmentFilter, AssignmentPatch, NewAssignment};
use crate::core::ports::AssignmentApi;

#[async_trait]
impl AssignmentApi for HttpBackend {
    async fn create_assignment(&self, new: &NewAssignment) -> Result<Assignment> {
        let request = self.request(Method::POST, &["assignments"]).json(new);
        self.send_json(request, "asset", &new.asset_id).await
    }

    async fn get_assignment(&self, id: &str) -> Result<Assignment> {
        let request = self.request(Method::GET, &["assignments", id]);
        self.send_json(request, "assignment", id).await
    }

    async fn update_assignment(&self, id: &str, patch: &AssignmentPatch) -> Result<Assignment> {
        let request = self.request(Method::PATCH, &["assignments", id]).json(patch);
        self.send_json(request, "assignment", id).await
    }

    async fn delete_assignment(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &["assignments", id]);
        self.send(request, "assignment", id).await?;
        Ok(())
    }

    async fn list_assignments(&self, filter: &AssignmentFilter) -> Result<Vec<Assignment>> {
        let request = self.request(Method::GET, &["assignments"]).query(&filter.query_pairs());
        self.send_json(request, "assignment", "*").await
    }
}
