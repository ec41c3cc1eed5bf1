use clap::Subcommand;

/// Check catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ChecksCommands {
    /// Available checks with their resolved field kinds.
    List,
    /// The service's default configuration.
    Defaults,
}
