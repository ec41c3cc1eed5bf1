use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "datviz-cli";
const KEYRING_USER: &str = "bearer-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "DATVIZ_AUTH__TOKEN";

/// Where the active token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the keyring service name.
///
/// Defaults to `"datviz-cli"`. Override via `DATVIZ_KEYRING_SERVICE` for
/// testing to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("DATVIZ_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

fn keyring_entry() -> Option<keyring::Entry> {
    keyring::Entry::new(&keyring_service(), KEYRING_USER)
        .inspect_err(|error| tracing::debug!(%error, "keyring unavailable"))
        .ok()
}

/// Store a token in the OS keychain, or in the credentials file when the
/// keychain refuses it.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
pub fn store(token: &str) -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry() {
        match entry.set_password(token) {
            Ok(()) => return Ok(()),
            Err(error) => tracing::warn!(%error, "keyring rejected the token; using the credentials file"),
        }
    }
    CredentialsFile::default_location()?.write(token)
}

/// Load a token. Priority: keyring → `DATVIZ_AUTH__TOKEN` env → `~/.datviz/credentials`.
#[must_use]
pub fn load() -> Option<String> {
    load_with_source().map(|(token, _)| token)
}

/// Load a token together with the tier it came from.
#[must_use]
pub fn load_with_source() -> Option<(String, TokenSource)> {
    let from_keyring = keyring_entry()
        .and_then(|entry| entry.get_password().ok())
        .filter(|token| !token.is_empty());
    if let Some(token) = from_keyring {
        return Some((token, TokenSource::Keyring));
    }

    if let Some(token) = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()) {
        return Some((token, TokenSource::Env));
    }

    CredentialsFile::default_location()
        .ok()?
        .read()
        .map(|token| (token, TokenSource::File))
}

/// Remove the token from the keyring and the credentials file.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Some(entry) = keyring_entry()
        && let Err(error) = entry.delete_credential()
    {
        tracing::debug!(%error, "no keyring credential to delete");
    }
    CredentialsFile::default_location()?.remove()
}

/// Which tier the current token comes from (for status display).
#[must_use]
pub fn detect_token_source() -> Option<TokenSource> {
    load_with_source().map(|(_, source)| source)
}

/// The plain-file tier: one token per file, owner-readable only.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    fn default_location() -> Result<Self, AuthError> {
        let home = dirs::home_dir().ok_or_else(|| {
            AuthError::TokenStoreError("no home directory to keep credentials in".into())
        })?;
        Ok(Self::at(home.join(".datviz").join(CREDENTIALS_FILE_NAME)))
    }

    const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, token: &str) -> Result<(), AuthError> {
        let store_err = |what: &str, path: &Path, e: std::io::Error| {
            AuthError::TokenStoreError(format!("{what} {}: {e}", path.display()))
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| store_err("cannot create", dir, e))?;
            if let Err(error) = restrict(dir, 0o700) {
                tracing::warn!(%error, dir = %dir.display(), "could not restrict credentials directory");
            }
        }
        fs::write(&self.path, token).map_err(|e| store_err("cannot write", &self.path, e))?;
        restrict(&self.path, 0o600).map_err(|e| store_err("cannot restrict", &self.path, e))
    }

    fn read(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn remove(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::TokenStoreError(format!(
                "cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
