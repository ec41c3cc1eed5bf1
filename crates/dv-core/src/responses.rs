//! Response envelopes returned by the remote processing service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

/// Response of `POST /token`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Generic `{message, success}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_true")]
    pub success: bool,
}

/// Response of `POST /identify-issues`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RunChecksResponse {
    #[serde(default)]
    pub message: String,
    /// Whether the run produced the downloadable issues spreadsheet.
    /// Servers that omit the flag always produce it.
    #[serde(default = "default_true")]
    pub issues_report: bool,
}

impl Default for RunChecksResponse {
    fn default() -> Self {
        Self {
            message: String::new(),
            issues_report: true,
        }
    }
}

/// One entry of `GET /config/available-checks`.
///
/// `config_fields` lists configuration keys, not kinds; the client resolves
/// each key to a typed field through its field catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CheckCatalogEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config_fields: Vec<String>,
}

/// A downloaded report body with the filename it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_checks_response_defaults_to_report_generated() {
        let parsed: RunChecksResponse =
            serde_json::from_str(r#"{"message": "Issue detection complete."}"#).unwrap();
        assert!(parsed.issues_report);

        let parsed: RunChecksResponse =
            serde_json::from_str(r#"{"message": "ok", "issues_report": false}"#).unwrap();
        assert!(!parsed.issues_report);
    }

    #[test]
    fn message_response_defaults_success() {
        let parsed: MessageResponse = serde_json::from_str(r#"{"message": "saved"}"#).unwrap();
        assert!(parsed.success);
    }
}
