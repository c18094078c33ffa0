//! Assign command - hand an asset to a user

use assetkeeper::core::models::NewAssignment;
use assetkeeper::output::{AssignmentReport, OutputMode, Render};

use super::Services;

/// Arguments of `assetkeeper assign`
#[derive(Debug)]
pub struct AssignRequest {
    pub asset_id: String,
    pub assigned_to_id: String,
    pub assigned_by: String,
    pub is_urgent: bool,
    pub is_automatic_approval: bool,
    pub notes: Option<String>,
}

/// Create an Active assignment and mark the asset Assigned
pub async fn assign(
    services: &Services,
    request: AssignRequest,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let mut new = NewAssignment::new(request.asset_id, request.assigned_to_id, request.assigned_by)
        .with_flags(request.is_urgent, request.is_automatic_approval);
    if let Some(notes) = request.notes {
        new = new.with_notes(notes);
    }

    let synced = services.synchronizer.create_assignment(new).await?;

    AssignmentReport {
        action: "created".to_string(),
        assignment: synced.record,
        warning: synced.warning,
    }
    .render(mode);
    Ok(())
}
