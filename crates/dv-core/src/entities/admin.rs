use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregate counters from `GET /admin/stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub total_projects: u64,
    #[serde(default)]
    pub total_logs: u64,
}

/// One row of the server activity log (`GET /admin/logs`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ActivityLog {
    pub id: i64,
    pub user_id: i64,
    pub project_id: Option<i64>,
    /// `upload`, `check`, `download`, `login`, ...
    pub action: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub created_at: NaiveDateTime,
}
