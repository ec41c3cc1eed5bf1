//! # dv-auth
//!
//! Bearer-token persistence for the datviz CLI.
//!
//! The processing service issues an opaque bearer token at login. It is the
//! only client state that survives a restart. Tokens are stored in the OS
//! keychain (`keyring`), with an env var for CI and a `0600` file fallback.

pub mod error;
pub mod expiry;
pub mod token_store;

pub use error::AuthError;
pub use token_store::TokenSource;

/// Resolve the best available bearer token.
///
/// Priority: keyring → `DATVIZ_AUTH__TOKEN` env → credentials file →
/// `fallback` (the `auth.token` config value).
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` when no token is stored and
/// `AuthError::TokenExpired` when the stored token's `exp` has passed.
pub fn require_token(fallback: Option<&str>) -> Result<String, AuthError> {
    let token = token_store::load()
        .or_else(|| fallback.map(ToString::to_string))
        .filter(|token| !token.trim().is_empty())
        .ok_or(AuthError::NotAuthenticated)?;
    if expiry::is_expired(&token, 0) {
        tracing::info!("stored token has expired");
        return Err(AuthError::TokenExpired);
    }
    Ok(token)
}

/// Like [`require_token`], without saying why no token is available.
#[must_use]
pub fn resolve_token(fallback: Option<&str>) -> Option<String> {
    require_token(fallback).ok()
}

/// Persist a freshly issued token.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if neither keyring nor file storage works.
pub fn save_token(token: &str) -> Result<(), AuthError> {
    token_store::store(token)
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
