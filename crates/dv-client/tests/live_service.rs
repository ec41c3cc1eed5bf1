//! Live tests against a running processing service.
//!
//! Run with: `DATVIZ_LIVE_URL=http://localhost:8000 cargo test -p dv-client -- --ignored`
//! Optional credentials: `DATVIZ_LIVE_USER`, `DATVIZ_LIVE_PASSWORD`.

use dv_client::{ApiClient, ClientError};
use dv_config::ServerConfig;

fn live_client() -> Option<ApiClient> {
    let base_url = std::env::var("DATVIZ_LIVE_URL").ok()?;
    let config = ServerConfig {
        base_url,
        ..ServerConfig::default()
    };
    Some(ApiClient::new(&config).expect("client builds"))
}

#[tokio::test]
#[ignore = "requires a running processing service"]
async fn catalog_and_defaults_are_public() {
    let Some(client) = live_client() else {
        eprintln!("DATVIZ_LIVE_URL not set, skipping");
        return;
    };
    let checks = client.available_checks().await.expect("catalog");
    assert!(!checks.is_empty());
    let defaults = client.default_config().await.expect("defaults");
    assert!(defaults.contains_key("mandatory_columns"));
}

#[tokio::test]
#[ignore = "requires a running processing service"]
async fn me_without_token_is_an_auth_failure() {
    let Some(client) = live_client() else {
        eprintln!("DATVIZ_LIVE_URL not set, skipping");
        return;
    };
    let err = client.me().await.expect_err("anonymous /me must fail");
    assert!(err.is_auth_failure(), "{err}");
}

#[tokio::test]
#[ignore = "requires a running processing service and an admin account"]
async fn admin_overview_resolves_every_part() {
    let Some(client) = live_client() else {
        eprintln!("DATVIZ_LIVE_URL not set, skipping");
        return;
    };
    let (Ok(user), Ok(password)) = (
        std::env::var("DATVIZ_LIVE_USER"),
        std::env::var("DATVIZ_LIVE_PASSWORD"),
    ) else {
        eprintln!("DATVIZ_LIVE_USER / DATVIZ_LIVE_PASSWORD not set, skipping");
        return;
    };
    let token = client.login(&user, &password).await.expect("login");
    let client = client.with_token(Some(token.access_token));

    let overview = client.admin_overview_independent().await;
    let failures: Vec<&ClientError> = [
        overview.stats.as_ref().err(),
        overview.users.as_ref().err(),
        overview.logs.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    .collect();
    assert!(failures.is_empty(), "{failures:?}");
}
