use dv_config::DatvizConfig;
use dv_core::entities::UserCreate;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AuthCommands, AuthLoginArgs, AuthRegisterArgs};
use crate::context;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    username: Option<String>,
    is_admin: Option<bool>,
    token_source: Option<String>,
    note: Option<String>,
}

impl AuthStatusResponse {
    fn signed_out(note: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            username: None,
            is_admin: None,
            token_source: None,
            note: Some(note.into()),
        }
    }
}

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

/// Handle `dvz auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    config: &DatvizConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, config, flags).await,
        AuthCommands::Register(args) => register(args, config, flags).await,
        AuthCommands::Logout => {
            dv_auth::logout()?;
            output(&AuthLogoutResponse { cleared: true }, flags.format)
        }
        AuthCommands::Status => status(config, flags).await,
    }
}

async fn login(args: &AuthLoginArgs, config: &DatvizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("Logging in");
    let client = context::anonymous_client(config)?;
    let token = match client.login(&args.username, &args.password).await {
        Ok(token) => token,
        Err(error) => {
            spinner.finish_err("Login failed");
            anyhow::bail!("login failed: {}", error.detail());
        }
    };
    dv_auth::save_token(&token.access_token)?;

    let client = client.with_token(Some(token.access_token));
    let user = client.me().await?;
    spinner.finish_clear();

    output(
        &AuthStatusResponse {
            authenticated: true,
            username: Some(user.username),
            is_admin: Some(user.is_admin),
            token_source: dv_auth::token_store::detect_token_source().map(|s| s.to_string()),
            note: None,
        },
        flags.format,
    )
}

async fn register(
    args: &AuthRegisterArgs,
    config: &DatvizConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let client = context::anonymous_client(config)?;
    let user = client
        .register(&UserCreate {
            username: args.username.clone(),
            email: args.email.clone(),
            full_name: args.full_name.clone(),
            password: args.password.clone(),
        })
        .await
        .map_err(|error| anyhow::anyhow!("registration failed: {}", error.detail()))?;
    output(&user, flags.format)
}

async fn status(config: &DatvizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let token = match dv_auth::require_token(config.auth.token()) {
        Ok(token) => token,
        Err(error) => return output(&AuthStatusResponse::signed_out(error.to_string()), flags.format),
    };

    let client = context::anonymous_client(config)?.with_token(Some(token));
    let status = match client.me().await {
        Ok(user) => AuthStatusResponse {
            authenticated: true,
            username: Some(user.username),
            is_admin: Some(user.is_admin),
            token_source: dv_auth::token_store::detect_token_source().map(|s| s.to_string()),
            note: None,
        },
        Err(error) if error.is_auth_failure() => {
            dv_auth::logout()?;
            AuthStatusResponse::signed_out("stored token was rejected and has been cleared")
        }
        Err(error) => AuthStatusResponse::signed_out(error.to_string()),
    };
    output(&status, flags.format)
}
