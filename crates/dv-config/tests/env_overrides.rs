//! Environment variables override every file layer.

use dv_config::DatvizConfig;
use figment::Jail;

fn load() -> figment::Result<DatvizConfig> {
    DatvizConfig::load().map_err(|e| figment::Error::from(e.to_string()))
}

#[test]
fn env_sets_nested_server_values() {
    Jail::expect_with(|jail| {
        jail.set_env("DATVIZ_SERVER__BASE_URL", "https://dq.example.org");
        jail.set_env("DATVIZ_SERVER__TIMEOUT_SECS", "90");

        let config = load()?;
        assert_eq!(config.server.base_url, "https://dq.example.org");
        assert_eq!(config.server.timeout_secs, 90);
        assert_eq!(config.server.user_agent, "datviz/0.1");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".datviz")?;
        jail.create_file(
            ".datviz/config.toml",
            r#"
[general]
download_dir = "reports"
preview_rows = 10
"#,
        )?;
        jail.set_env("DATVIZ_GENERAL__DOWNLOAD_DIR", "/tmp/out");

        let config = load()?;
        assert_eq!(config.general.download_dir, "/tmp/out");
        assert_eq!(config.general.preview_rows, 10);
        Ok(())
    });
}

#[test]
fn auth_token_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("DATVIZ_AUTH__TOKEN", "eyJ.ci.token");
        let config = load()?;
        assert_eq!(config.auth.token(), Some("eyJ.ci.token"));
        Ok(())
    });
}

#[test]
fn malformed_env_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("DATVIZ_SERVER__TIMEOUT_SECS", "soon");
        assert!(DatvizConfig::load().is_err());
        Ok(())
    });
}
