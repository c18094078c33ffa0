//! Assignment command - update, close, delete, and list assignments

use assetkeeper::core::models::{Assignment, AssignmentFilter, AssignmentPatch, AssignmentStatus};
use assetkeeper::core::services::Synced;
use assetkeeper::output::{AssignmentList, AssignmentReport, OutputMode, Render};

use super::Services;
use crate::cli::AssignmentAction;

/// Handle assignment subcommands
pub async fn assignment_cmd(
    services: &Services,
    action: AssignmentAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    match action {
        AssignmentAction::Update {
            id,
            status,
            note,
            urgent,
        } => update(services, &id, status.as_deref(), note, urgent, mode).await,
        AssignmentAction::Return { id } => {
            transition(services, &id, AssignmentStatus::Returned, mode).await
        },
        AssignmentAction::Cancel { id } => {
            transition(services, &id, AssignmentStatus::Cancelled, mode).await
        },
        AssignmentAction::Lost { id } => transition(services, &id, AssignmentStatus::Lost, mode).await,
        AssignmentAction::Damaged { id } => {
            transition(services, &id, AssignmentStatus::Damaged, mode).await
        },
        AssignmentAction::Delete { id } => {
            let synced = services.synchronizer.delete_assignment(&id).await?;
            report("deleted", synced, mode);
            Ok(())
        },
        AssignmentAction::List {
            asset,
            user,
            status,
        } => list(services, asset, user, status.as_deref(), mode).await,
    }
}

fn parse_status(status: Option<&str>) -> anyhow::Result<Option<AssignmentStatus>> {
    status.map(str::parse).transpose().map_err(|e: String| anyhow::anyhow!(e))
}

fn report(action: &str, synced: Synced<Assignment>, mode: OutputMode) {
    AssignmentReport {
        action: action.to_string(),
        assignment: synced.record,
        warning: synced.warning,
    }
    .render(mode);
}

async fn update(
    services: &Services,
    id: &str,
    status: Option<&str>,
    notes: Option<String>,
    is_urgent: Option<bool>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let patch = AssignmentPatch {
        status: parse_status(status)?,
        notes,
        is_urgent,
        ..AssignmentPatch::default()
    };
    if patch == AssignmentPatch::default() {
        anyhow::bail!("nothing to update: pass --status, --note, or --urgent");
    }

    let synced = services.synchronizer.update_assignment(id, patch).await?;
    report("updated", synced, mode);
    Ok(())
}

async fn transition(
    services: &Services,
    id: &str,
    status: AssignmentStatus,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let synced = services.synchronizer.transition(id, status).await?;
    report("updated", synced, mode);
    Ok(())
}

async fn list(
    services: &Services,
    asset_id: Option<String>,
    assigned_to_id: Option<String>,
    status: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let filter = AssignmentFilter {
        asset_id,
        assigned_to_id,
        status: parse_status(status)?,
    };

    let assignments = services.assignments.list_assignments(&filter).await?;
    AssignmentList { assignments }.render(mode);
    Ok(())
}
