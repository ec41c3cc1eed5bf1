//! Configuration loading and client construction shared by commands.

use anyhow::Context;
use dv_auth::AuthError;
use dv_client::ApiClient;
use dv_config::DatvizConfig;
use dv_core::entities::User;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<DatvizConfig> {
    let config = DatvizConfig::load_with_dotenv()
        .context("failed to load datviz configuration")?
        .with_base_url(flags.server.as_deref());
    config.validate()?;
    Ok(config)
}

/// A client without credentials, for login and registration.
pub fn anonymous_client(config: &DatvizConfig) -> anyhow::Result<ApiClient> {
    ApiClient::new(&config.server).context("failed to build HTTP client")
}

/// A client carrying the stored bearer token.
pub fn authenticated_client(config: &DatvizConfig) -> anyhow::Result<ApiClient> {
    let token = dv_auth::require_token(config.auth.token()).map_err(|error| match error {
        AuthError::NotAuthenticated | AuthError::TokenExpired => {
            anyhow::anyhow!("{error}; run `dvz auth login` first")
        }
        other => other.into(),
    })?;
    Ok(anonymous_client(config)?.with_token(Some(token)))
}

/// Resolve the signed-in user, clearing the stored token if it is rejected.
pub async fn current_user(client: &ApiClient) -> anyhow::Result<User> {
    match client.me().await {
        Ok(user) => Ok(user),
        Err(error) if error.is_auth_failure() => {
            tracing::info!(%error, "stored token rejected");
            if let Err(clear) = dv_auth::logout() {
                tracing::warn!(%clear, "failed to clear stored token");
            }
            anyhow::bail!("session expired; run `dvz auth login` again")
        }
        Err(error) => Err(error).context("failed to resolve the current user"),
    }
}
