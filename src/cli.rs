//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use assetkeeper::core::Error;
use assetkeeper::output::{ErrorReport, OutputMode, Render};

use crate::commands;

/// assetkeeper - Asset status kept in step with assignments
#[derive(Parser, Debug)]
#[command(
    name = "assetkeeper",
    version,
    about = "Asset status kept in step with assignments",
    long_about = "Create and close asset assignments, run bulk operations, and repair drift.\n\n\
                  An asset is Assigned exactly when it has an Active assignment.\n\
                  Every command here keeps that rule on the backend."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of ~/.assetkeeper/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hand an asset to a user (creates an Active assignment)
    Assign {
        /// Asset ID
        asset_id: String,

        /// Receiving user
        #[arg(long)]
        to: String,

        /// User handing the asset out
        #[arg(long)]
        by: String,

        /// Flag the assignment as urgent
        #[arg(long)]
        urgent: bool,

        /// Approve without a manual review step
        #[arg(long)]
        auto_approve: bool,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Manage existing assignments
    Assignment {
        #[command(subcommand)]
        action: AssignmentAction,
    },

    /// Apply one operation to many assets
    Bulk {
        #[command(subcommand)]
        action: BulkAction,
    },

    /// Re-derive asset status from Active assignments
    Reconcile {
        /// Asset IDs to check
        ids: Vec<String>,
    },

    /// Show or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum AssignmentAction {
    /// Update status, notes, or urgency
    Update {
        /// Assignment ID
        id: String,

        /// New status: active, returned, cancelled, lost, damaged
        #[arg(short, long)]
        status: Option<String>,

        /// Replacement notes
        #[arg(short, long)]
        note: Option<String>,

        /// Urgency flag
        #[arg(long)]
        urgent: Option<bool>,
    },

    /// Mark an assignment returned (frees the asset)
    Return {
        /// Assignment ID
        id: String,
    },

    /// Cancel an assignment (frees the asset)
    Cancel {
        /// Assignment ID
        id: String,
    },

    /// Mark the asset lost
    Lost {
        /// Assignment ID
        id: String,
    },

    /// Mark the asset damaged
    Damaged {
        /// Assignment ID
        id: String,
    },

    /// Delete an assignment
    Delete {
        /// Assignment ID
        id: String,
    },

    /// List assignments
    List {
        /// Filter by asset
        #[arg(short, long)]
        asset: Option<String>,

        /// Filter by holder
        #[arg(short, long)]
        user: Option<String>,

        /// Filter by status: active, returned, cancelled, lost, damaged
        #[arg(short, long)]
        status: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BulkAction {
    /// Delete assets
    Delete {
        /// Asset IDs
        ids: Vec<String>,
    },

    /// Set asset status (available, damaged, maintenance, retired)
    Status {
        /// Target status
        #[arg(short, long)]
        status: String,

        /// Asset IDs
        ids: Vec<String>,
    },

    /// Hand every asset to one user
    Assign {
        /// Receiving user
        #[arg(long)]
        to: String,

        /// User handing the assets out
        #[arg(long)]
        by: String,

        /// Asset IDs
        ids: Vec<String>,
    },

    /// Move assets to another department
    Transfer {
        /// Destination department
        #[arg(short, long)]
        department: String,

        /// Asset IDs
        ids: Vec<String>,
    },

    /// Change the physical location
    Location {
        /// New location
        #[arg(short, long)]
        location: String,

        /// Asset IDs
        ids: Vec<String>,
    },

    /// Change the category
    Category {
        /// New category
        #[arg(short, long)]
        category: String,

        /// Asset IDs
        ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a config file with defaults
    Init {
        /// Backend base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the CLI
pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match dispatch(cli, output_mode).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, output_mode);
            ExitCode::FAILURE
        },
    }
}

async fn dispatch(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Command::Assign {
            asset_id,
            to,
            by,
            urgent,
            auto_approve,
            note,
        }) => {
            let services = commands::Services::load(config_path)?;
            let request = commands::AssignRequest {
                asset_id,
                assigned_to_id: to,
                assigned_by: by,
                is_urgent: urgent,
                is_automatic_approval: auto_approve,
                notes: note,
            };
            commands::assign(&services, request, output_mode).await
        },
        Some(Command::Assignment { action }) => {
            let services = commands::Services::load(config_path)?;
            commands::assignment_cmd(&services, action, output_mode).await
        },
        Some(Command::Bulk { action }) => {
            let services = commands::Services::load(config_path)?;
            commands::bulk_cmd(&services, action, output_mode).await
        },
        Some(Command::Reconcile { ids }) => {
            let services = commands::Services::load(config_path)?;
            commands::reconcile(&services, &ids, output_mode).await
        },
        Some(Command::Config { action }) => commands::config_cmd(config_path, action, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("assetkeeper v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("assetkeeper v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'assetkeeper --help' for usage");
                println!("Run 'assetkeeper config init' to get started");
            }
            Ok(())
        },
    }
}

/// Print an error, keeping the domain error code when there is one
fn report_error(error: &anyhow::Error, mode: OutputMode) {
    let report = match error.downcast_ref::<Error>() {
        Some(domain) => ErrorReport::new(domain.kind(), domain.to_string()),
        None => ErrorReport {
            success: false,
            code: "ERROR".to_string(),
            status: 1,
            message: format!("{error:#}"),
        },
    };
    report.render(mode);
}
