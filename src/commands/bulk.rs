//! Bulk command - one operation over many assets

use assetkeeper::core::models::{AssetStatus, BulkOperation};
use assetkeeper::output::{BulkReport, OutputMode, Render};

use super::Services;
use crate::cli::BulkAction;

/// Handle bulk subcommands
///
/// The report is printed even on partial failure; the command then exits
/// non-zero.
pub async fn bulk_cmd(
    services: &Services,
    action: BulkAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let (operation, ids) = to_operation(action)?;

    let result = services.executor.execute(&operation, &ids).await?;
    let report = BulkReport {
        operation: operation.name().to_string(),
        result,
    };
    report.render(mode);

    if !report.result.success {
        anyhow::bail!(
            "{} of {} asset(s) failed",
            report.result.error_count,
            report.result.total()
        );
    }
    Ok(())
}

fn to_operation(action: BulkAction) -> anyhow::Result<(BulkOperation, Vec<String>)> {
    let pair = match action {
        BulkAction::Delete { ids } => (BulkOperation::Delete, ids),
        BulkAction::Status { status, ids } => {
            let status: AssetStatus = status.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            (BulkOperation::SetStatus { status }, ids)
        },
        BulkAction::Assign { to, by, ids } => (
            BulkOperation::Assign {
                assigned_to_id: to,
                assigned_by: by,
            },
            ids,
        ),
        BulkAction::Transfer { department, ids } => (
            BulkOperation::Transfer {
                department_id: department,
            },
            ids,
        ),
        BulkAction::Location { location, ids } => (BulkOperation::SetLocation { location }, ids),
        BulkAction::Category { category, ids } => (
            BulkOperation::SetCategory {
                category_id: category,
            },
            ids,
        ),
    };
    Ok(pair)
}
