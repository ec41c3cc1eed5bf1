use dv_config::DatvizConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &DatvizConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, config, flags).await,
        Commands::Project { action } => commands::project::handle(&action, config, flags).await,
        Commands::Checks { action } => commands::checks::handle(&action, config, flags).await,
        Commands::Run(args) => commands::run::handle(&args, config, flags).await,
        Commands::Admin => commands::admin::handle(config, flags).await,
        Commands::Shell => commands::shell::handle(config, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
