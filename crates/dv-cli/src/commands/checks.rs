use dv_checks::CheckDescriptor;
use dv_config::DatvizConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ChecksCommands;
use crate::commands::shared;
use crate::context;
use crate::output::output;

#[derive(Serialize)]
struct CheckRow {
    name: String,
    description: String,
    fields: String,
    unknown_fields: String,
}

impl From<&CheckDescriptor> for CheckRow {
    fn from(check: &CheckDescriptor) -> Self {
        let fields: Vec<String> = check
            .fields
            .iter()
            .map(|f| format!("{} ({})", f.key, f.kind.as_str()))
            .collect();
        Self {
            name: check.name.clone(),
            description: check.description.clone(),
            fields: fields.join(", "),
            unknown_fields: check.unknown_fields.join(", "),
        }
    }
}

/// Handle `dvz checks <subcommand>`.
pub async fn handle(
    action: &ChecksCommands,
    config: &DatvizConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = context::authenticated_client(config)?;
    match action {
        ChecksCommands::List => {
            let registry = shared::load_registry(&client).await;
            if flags.format == crate::cli::OutputFormat::Table {
                let rows: Vec<CheckRow> = registry.checks().iter().map(CheckRow::from).collect();
                output(&rows, flags.format)
            } else {
                output(registry.checks(), flags.format)
            }
        }
        ChecksCommands::Defaults => output(&client.default_config().await?, flags.format),
    }
}
