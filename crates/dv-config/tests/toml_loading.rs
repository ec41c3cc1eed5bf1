//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env manipulation.

use dv_config::{ConfigError, DatvizConfig};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

fn load() -> figment::Result<DatvizConfig> {
    DatvizConfig::load().map_err(|e| figment::Error::from(e.to_string()))
}

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
base_url = "https://dq.example.org/"
timeout_secs = 45
user_agent = "datviz-ci"

[general]
download_dir = "out"
preview_rows = 3

[auth]
token = "from-file"
"#,
        )?;

        let config: DatvizConfig = Figment::from(Serialized::defaults(DatvizConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.base(), "https://dq.example.org");
        assert_eq!(config.server.timeout_secs, 45);
        assert_eq!(config.server.user_agent, "datviz-ci");
        assert_eq!(config.general.download_dir, "out");
        assert_eq!(config.general.preview_rows, 3);
        assert_eq!(config.auth.token(), Some("from-file"));
        Ok(())
    });
}

#[test]
fn partial_file_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".datviz")?;
        jail.create_file(".datviz/config.toml", "[server]\ntimeout_secs = 5\n")?;

        let config = load()?;
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.timeout_secs, 5);
        assert_eq!(config.general.download_dir, ".");
        Ok(())
    });
}

#[test]
fn invalid_base_url_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_dir(".datviz")?;
        jail.create_file(".datviz/config.toml", "[server]\nbase_url = \"localhost\"\n")?;

        let config = load()?;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.base_url"));
        Ok(())
    });
}
