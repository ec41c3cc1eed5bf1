use clap::{Args, Subcommand};
use dv_core::enums::ProjectStatus;

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// List your projects.
    List,
    /// Create a project.
    Create(ProjectCreateArgs),
    /// Update a project's name, description, or status.
    Update(ProjectUpdateArgs),
    /// Delete a project.
    Delete {
        id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ProjectCreateArgs {
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectUpdateArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// active, archived, or deleted
    #[arg(long)]
    pub status: Option<ProjectStatus>,
}
