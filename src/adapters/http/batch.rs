//! `BatchApi` over REST
//!
//! Each operation kind has its own endpoint under `/assets/bulk/`. The body is
//! the id list plus the operation's parameters.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use super::HttpBackend;
use crate::core::error::Result;
use crate::core::models::BulkOperation;
use crate::core::ports::BatchApi;

/// Endpoint name and request body for a batch call
fn batch_request(operation: &BulkOperation, ids: &[String]) -> (&'static str, Value) {
    match operation {
        BulkOperation::Delete => ("delete", json!({ "ids": ids })),
        BulkOperation::SetStatus { status } => ("status", json!({ "ids": ids, "status": status })),
        BulkOperation::Assign {
            assigned_to_id,
            assigned_by,
        } => (
            "assign",
            json!({ "ids": ids, "assigned_to_id": assigned_to_id, "assigned_by": assigned_by }),
        ),
        BulkOperation::Transfer { department_id } => {
            ("transfer", json!({ "ids": ids, "department_id": department_id }))
        },
        BulkOperation::SetLocation { location } => {
            ("location", json!({ "ids": ids, "location": location }))
        },
        BulkOperation::SetCategory { category_id } => {
            ("category", json!({ "ids": ids, "category_id": category_id }))
        },
    }
}

#[async_trait]
impl BatchApi for HttpBackend {
    async fn execute_batch(&self, operation: &BulkOperation, ids: &[String]) -> Result<()> {
        let (endpoint, body) = batch_request(operation, ids);
        let request = self.request(Method::POST, &["assets", "bulk", endpoint]).json(&body);
        self.send(request, "batch endpoint", endpoint).await?;
        Ok(())
    }
}
