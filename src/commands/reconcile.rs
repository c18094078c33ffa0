//! Reconcile command - repair asset status drift

use assetkeeper::output::{OutputMode, Render};

use super::Services;

/// Check each asset against its Active assignments and fix its status
pub async fn reconcile(services: &Services, ids: &[String], mode: OutputMode) -> anyhow::Result<()> {
    let report = services.reconciler.reconcile(ids).await?;
    report.render(mode);

    if !report.is_clean() {
        anyhow::bail!("{} asset(s) could not be reconciled", report.errors.len());
    }
    Ok(())
}
