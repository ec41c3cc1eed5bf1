//! Remote processing service connection settings.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "datviz/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL of the processing service, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServerConfig {
    /// Whether the base URL is a usable `http(s)://` address.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let url = self.base_url.trim();
        (url.starts_with("http://") || url.starts_with("https://"))
            && url.len() > "https://".len()
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = ServerConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.is_configured());
    }

    #[test]
    fn rejects_non_http_urls() {
        for url in ["", "localhost:8000", "ftp://files", "https://"] {
            let config = ServerConfig {
                base_url: url.to_string(),
                ..ServerConfig::default()
            };
            assert!(!config.is_configured(), "{url}");
        }
    }

    #[test]
    fn base_strips_trailing_slash() {
        let config = ServerConfig {
            base_url: "https://dq.example.org/".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(config.base(), "https://dq.example.org");
    }
}
