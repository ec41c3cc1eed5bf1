//! # dv-client
//!
//! Async HTTP client for the datviz processing service.
//!
//! One method per remote endpoint, grouped by concern:
//! - [`accounts`]: login, registration, current user
//! - [`projects`]: project CRUD
//! - [`dataset`]: upload and preview
//! - [`checks`]: default configuration, check catalog, submission, execution
//! - [`reports`]: issues report and summary downloads
//! - [`admin`]: stats, users, activity logs
//!
//! Every failure is classified into [`ClientError`]; a rejected token is
//! reported as [`ClientError::Unauthorized`] so callers can force a logout.

pub mod accounts;
pub mod admin;
pub mod checks;
pub mod dataset;
pub mod projects;
pub mod reports;

mod error;
mod http;

pub use admin::{AdminOverview, AdminSnapshot};
pub use error::ClientError;

use std::sync::Arc;
use std::time::Duration;

use dv_config::ServerConfig;
use dv_schema::SchemaRegistry;
use reqwest::Method;
use serde::de::DeserializeOwned;

/// HTTP client bound to one service base URL and, once logged in, one
/// bearer token.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    schemas: Arc<SchemaRegistry>,
}

impl ApiClient {
    /// Build a client from the `server` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the TLS backend cannot initialise and
    /// [`ClientError::Schema`] if payload schemas cannot be generated.
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base().to_string(),
            token: None,
            schemas: Arc::new(SchemaRegistry::new()?),
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, attaching the bearer token when there is one.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let resp = builder.send().await?;
        http::check_response(resp).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.send(self.request(Method::GET, path)).await?;
        http::decode(resp).await
    }

    /// Fetch and validate a JSON body against a named payload schema.
    async fn checked<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        schema: &str,
    ) -> Result<T, ClientError> {
        let bytes = resp.bytes().await?;
        Ok(self.schemas.parse_slice(schema, &bytes)?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> ApiClient {
        let config = ServerConfig {
            base_url: "http://dq.local:8000/".to_string(),
            ..ServerConfig::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let client = client();
        assert_eq!(client.base_url(), "http://dq.local:8000");
        assert_eq!(client.url("/projects"), "http://dq.local:8000/projects");
        assert_eq!(client.url("me"), "http://dq.local:8000/me");
    }

    #[test]
    fn bearer_token_is_attached_only_when_set() {
        let anonymous = client().request(Method::GET, "/me").build().unwrap();
        assert!(anonymous.headers().get(reqwest::header::AUTHORIZATION).is_none());

        let authed = client()
            .with_token(Some("abc".into()))
            .request(Method::GET, "/me")
            .build()
            .unwrap();
        assert_eq!(
            authed.headers()[reqwest::header::AUTHORIZATION],
            "Bearer abc"
        );
    }

    #[test]
    fn debug_output_hides_the_token() {
        let client = client().with_token(Some("secret-token".into()));
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("authenticated: true"));
    }
}
