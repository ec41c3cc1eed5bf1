use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Exchange username and password for a bearer token.
    Login(AuthLoginArgs),
    /// Create an account.
    Register(AuthRegisterArgs),
    /// Clear stored credentials.
    Logout,
    /// Show current auth status.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub username: String,
    /// Password (prefer `DATVIZ_PASSWORD` to keep it out of shell history).
    #[arg(long, env = "DATVIZ_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long, env = "DATVIZ_PASSWORD", hide_env_values = true)]
    pub password: String,
}
