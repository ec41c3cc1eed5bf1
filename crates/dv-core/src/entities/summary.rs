use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Issue count reported for one check.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CheckIssueCount {
    pub check: String,
    /// Missing counts are treated as zero.
    #[serde(default)]
    pub issues: u64,
}

/// Structured JSON digest of a check run (`GET /download-issues-summary`).
///
/// Read-only. A new run replaces the payload wholesale; payloads are never
/// merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SummaryPayload {
    /// UTC timestamp of the run as sent by the server.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub checks: Vec<CheckIssueCount>,
}

impl SummaryPayload {
    /// Total issues across all checks, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_issues(&self) -> u64 {
        self.checks
            .iter()
            .map(|c| c.issues)
            .fold(0, u64::saturating_add)
    }
}
