//! General client settings.

use serde::{Deserialize, Serialize};

fn default_download_dir() -> String {
    ".".to_string()
}

/// Rows of the upload preview shown after a successful upload.
const fn default_preview_rows() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory downloaded reports are written to.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,

    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            preview_rows: default_preview_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.download_dir, ".");
        assert_eq!(config.preview_rows, 5);
    }
}
