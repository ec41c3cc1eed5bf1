use std::collections::BTreeMap;

use dv_config::DatvizConfig;
use dv_core::entities::{ActivityLog, AdminStats, User};
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context;
use crate::output::output;
use crate::progress::with_spinner;

#[derive(Serialize)]
struct AdminView {
    stats: Option<AdminStats>,
    users: Option<Vec<User>>,
    logs: Option<Vec<ActivityLog>>,
    errors: BTreeMap<&'static str, String>,
}

/// Handle `dvz admin`.
pub async fn handle(config: &DatvizConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = context::authenticated_client(config)?;
    let user = context::current_user(&client).await?;
    if !user.is_admin {
        anyhow::bail!("admin access required ('{}' is not an admin)", user.username);
    }

    let overview =
        with_spinner("Loading admin overview", client.admin_overview_independent()).await;

    if overview.has_auth_failure() {
        dv_auth::logout()?;
        anyhow::bail!("session expired; run `dvz auth login` again");
    }

    let mut errors = BTreeMap::new();
    let stats = overview
        .stats
        .map_err(|e| errors.insert("stats", e.detail()))
        .ok();
    let users = overview
        .users
        .map_err(|e| errors.insert("users", e.detail()))
        .ok();
    let logs = overview
        .logs
        .map_err(|e| errors.insert("logs", e.detail()))
        .ok();

    if flags.format != OutputFormat::Table {
        return output(&AdminView { stats, users, logs, errors }, flags.format);
    }

    // One table per part so a failed part does not hide the others.
    if let Some(stats) = &stats {
        output(stats, flags.format)?;
    }
    if let Some(users) = &users {
        println!("\nUsers");
        output(users, flags.format)?;
    }
    if let Some(logs) = &logs {
        println!("\nActivity");
        output(logs, flags.format)?;
    }
    for (part, error) in &errors {
        eprintln!("{part}: {error}");
    }
    Ok(())
}
