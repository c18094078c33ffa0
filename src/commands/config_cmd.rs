//! Config command - show or create the config file

use std::path::Path;

use assetkeeper::config::Config;
use assetkeeper::output::{OperationResult, OutputMode, Render};

use super::load_config;
use crate::cli::ConfigAction;

/// Handle config subcommands
pub fn config_cmd(path: Option<&Path>, action: ConfigAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => show(path, mode),
        ConfigAction::Init { base_url, force } => init(path, base_url, force, mode),
    }
}

fn show(path: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let mut config = load_config(path)?;
    if config.backend.api_token.is_some() {
        config.backend.api_token = Some("[REDACTED]".to_string());
    }

    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        let file = path.map_or_else(Config::config_path, Path::to_path_buf);
        println!("# {}", file.display());
        print!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

fn init(
    path: Option<&Path>,
    base_url: Option<String>,
    force: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let file = path.map_or_else(Config::config_path, Path::to_path_buf);
    if file.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", file.display());
    }

    let mut config = Config::default();
    if let Some(url) = base_url {
        config.backend.base_url = url;
    }
    config.save_to(&file)?;

    OperationResult {
        success: true,
        message: format!("Wrote {}", file.display()),
    }
    .render(mode);
    Ok(())
}
