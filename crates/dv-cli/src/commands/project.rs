use dv_config::DatvizConfig;
use dv_core::entities::{ProjectCreate, ProjectUpdate};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::context;
use crate::output::output;

#[derive(Serialize)]
struct ProjectDeleteResponse {
    id: i64,
    deleted: bool,
}

/// Handle `dvz project <subcommand>`.
pub async fn handle(
    action: &ProjectCommands,
    config: &DatvizConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = context::authenticated_client(config)?;
    match action {
        ProjectCommands::List => output(&client.list_projects().await?, flags.format),
        ProjectCommands::Create(args) => {
            let project = client
                .create_project(&ProjectCreate {
                    name: args.name.clone(),
                    description: args.description.clone(),
                    config: None,
                })
                .await?;
            output(&project, flags.format)
        }
        ProjectCommands::Update(args) => {
            let update = ProjectUpdate {
                name: args.name.clone(),
                description: args.description.clone(),
                config: None,
                status: args.status,
            };
            if update.is_empty() {
                anyhow::bail!("project update: nothing to change (pass --name, --description, or --status)");
            }
            output(&client.update_project(args.id, &update).await?, flags.format)
        }
        ProjectCommands::Delete { id } => {
            client.delete_project(*id).await?;
            output(&ProjectDeleteResponse { id: *id, deleted: true }, flags.format)
        }
    }
}
