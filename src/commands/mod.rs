//! Command implementations

mod assign;
mod assignment;
mod bulk;
mod config_cmd;
mod reconcile;

use std::path::Path;
use std::sync::Arc;

use assetkeeper::adapters::HttpBackend;
use assetkeeper::config::Config;
use assetkeeper::core::ports::AssignmentApi;
use assetkeeper::core::services::{BulkOperationExecutor, LifecycleSynchronizer, Reconciler};

pub use assign::{AssignRequest, assign};
pub use assignment::assignment_cmd;
pub use bulk::bulk_cmd;
pub use config_cmd::config_cmd;
pub use reconcile::reconcile;

/// Load config from an explicit file, or from the default location
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?.with_env_overrides(),
        None => Config::load()?,
    };
    Ok(config)
}

/// Services wired to the configured backend
pub struct Services {
    pub synchronizer: LifecycleSynchronizer,
    pub executor: BulkOperationExecutor,
    pub reconciler: Reconciler,
    pub assignments: Arc<dyn AssignmentApi>,
}

impl Services {
    /// Build every service over one HTTP backend
    pub fn load(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = load_config(config_path)?;
        let backend = Arc::new(HttpBackend::new(&config.backend)?);
        log::debug!("backend: {}", backend.base_url());

        Ok(Self {
            synchronizer: LifecycleSynchronizer::new(backend.clone(), backend.clone()),
            executor: BulkOperationExecutor::new(
                backend.clone(),
                backend.clone(),
                backend.clone(),
                config.bulk.into(),
            ),
            reconciler: Reconciler::new(backend.clone(), backend.clone()),
            assignments: backend,
        })
    }
}
