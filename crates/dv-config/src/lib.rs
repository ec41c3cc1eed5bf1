//! # dv-config
//!
//! Layered configuration loading for datviz using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DATVIZ_*` prefix, `__` as separator)
//! 2. Project-level `.datviz/config.toml`
//! 3. User-level `~/.config/datviz/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DATVIZ_SERVER__BASE_URL` -> `server.base_url`,
//! `DATVIZ_GENERAL__DOWNLOAD_DIR` -> `general.download_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use dv_config::DatvizConfig;
//!
//! let config = DatvizConfig::load_with_dotenv().expect("config");
//! println!("service: {}", config.server.base());
//! ```

mod auth;
mod error;
mod general;
mod server;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".datviz/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatvizConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl DatvizConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory, if there is one.
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and callers can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("DATVIZ_").split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("datviz").join("config.toml"))
    }

    /// Replace the service URL (the `--server` flag).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url {
            self.server.base_url = url.to_string();
        }
        self
    }

    /// Check values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.is_configured() {
            return Err(ConfigError::InvalidValue {
                field: "server.base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.server.base_url),
            });
        }
        if self.server.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.general.download_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.download_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
