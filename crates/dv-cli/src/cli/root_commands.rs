use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, ChecksCommands, ProjectCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, register, and manage the stored token.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Project management.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Inspect the check catalog and default configuration.
    Checks {
        #[command(subcommand)]
        action: ChecksCommands,
    },
    /// Upload a file, run the checks, and download the reports.
    Run(RunArgs),
    /// Admin overview: stats, users, and activity logs.
    Admin,
    /// Interactive session.
    Shell,
    /// Print the JSON Schema of a remote payload.
    Schema(SchemaArgs),
}

/// Arguments for `dvz run`.
#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Project ID to run in.
    #[arg(long)]
    pub project: i64,
    /// Dataset to upload (.csv, .xlsx, .parquet).
    #[arg(long)]
    pub file: PathBuf,
    /// JSON file with a full check configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Start from the service's default configuration.
    #[arg(long)]
    pub defaults: bool,
    /// Field assignment `key=value` or `group.child=value`; repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
    /// Directory for downloaded reports (overrides general.download_dir).
    #[arg(long)]
    pub download_dir: Option<PathBuf>,
}

/// Arguments for `dvz schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Payload name; lists the available names when omitted.
    pub name: Option<String>,
}
