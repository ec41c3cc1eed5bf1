//! Admin-only aggregate queries.
//!
//! The three admin queries are independent. [`ApiClient::admin_overview_independent`]
//! keeps each result separately so one failure does not hide the others;
//! [`ApiClient::admin_overview`] treats them as one unit.

use dv_core::entities::{ActivityLog, AdminStats, User};
use reqwest::Method;
use serde::Serialize;

use crate::ApiClient;
use crate::error::ClientError;

/// Admin data fetched as one unit.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSnapshot {
    pub stats: AdminStats,
    pub users: Vec<User>,
    pub logs: Vec<ActivityLog>,
}

/// Admin data fetched part by part; each part succeeds or fails on its own.
#[derive(Debug)]
pub struct AdminOverview {
    pub stats: Result<AdminStats, ClientError>,
    pub users: Result<Vec<User>, ClientError>,
    pub logs: Result<Vec<ActivityLog>, ClientError>,
}

impl AdminOverview {
    /// Whether any part failed because the token was rejected.
    #[must_use]
    pub fn has_auth_failure(&self) -> bool {
        [
            self.stats.as_ref().err(),
            self.users.as_ref().err(),
            self.logs.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .any(ClientError::is_auth_failure)
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 403 for non-admin users.
    pub async fn admin_stats(&self) -> Result<AdminStats, ClientError> {
        let resp = self.send(self.request(Method::GET, "/admin/stats")).await?;
        self.checked(resp, "admin_stats").await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 403 for non-admin users.
    pub async fn admin_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_json("/admin/users").await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 403 for non-admin users.
    pub async fn admin_logs(&self) -> Result<Vec<ActivityLog>, ClientError> {
        self.get_json("/admin/logs").await
    }

    /// Fetch stats, users, and logs concurrently; any failure fails the whole.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] among the three calls.
    pub async fn admin_overview(&self) -> Result<AdminSnapshot, ClientError> {
        let (stats, users, logs) =
            tokio::try_join!(self.admin_stats(), self.admin_users(), self.admin_logs())?;
        Ok(AdminSnapshot { stats, users, logs })
    }

    /// Fetch stats, users, and logs concurrently, keeping each outcome.
    ///
    /// All three calls resolve before this returns.
    pub async fn admin_overview_independent(&self) -> AdminOverview {
        let (stats, users, logs) =
            tokio::join!(self.admin_stats(), self.admin_users(), self.admin_logs());

        for (part, error) in [
            ("stats", stats.as_ref().err()),
            ("users", users.as_ref().err()),
            ("logs", logs.as_ref().err()),
        ] {
            if let Some(e) = error {
                tracing::warn!(part, %e, "admin query failed");
            }
        }

        AdminOverview { stats, users, logs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_in_any_part_is_reported() {
        let overview = AdminOverview {
            stats: Ok(AdminStats::default()),
            users: Err(ClientError::Unauthorized {
                status: 401,
                detail: "Could not validate credentials".into(),
            }),
            logs: Err(ClientError::Parse("truncated".into())),
        };
        assert!(overview.has_auth_failure());

        let healthy = AdminOverview {
            stats: Ok(AdminStats::default()),
            users: Ok(Vec::new()),
            logs: Err(ClientError::Api {
                status: 500,
                detail: "db down".into(),
            }),
        };
        assert!(!healthy.has_auth_failure());

        let not_admin = AdminOverview {
            stats: Err(ClientError::Api {
                status: 403,
                detail: "Admin access required".into(),
            }),
            users: Ok(Vec::new()),
            logs: Ok(Vec::new()),
        };
        assert!(!not_admin.has_auth_failure());
    }
}
