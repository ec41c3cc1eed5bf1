//! Authentication settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Bearer token for non-interactive use (CI). Lowest-priority token source.
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let token = self.token.trim();
        (!token.is_empty()).then_some(token)
    }
}
