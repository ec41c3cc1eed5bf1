//! Check catalog, configuration, and execution.

use dv_core::responses::{CheckCatalogEntry, MessageResponse, RunChecksResponse};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::{ApiClient, http};

impl ApiClient {
    /// The service's full default configuration (`GET /config/default`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Parse`] if the body is not a JSON object.
    pub async fn default_config(&self) -> Result<Map<String, Value>, ClientError> {
        self.get_json("/config/default").await
    }

    /// Catalog of available checks (`GET /config/available-checks`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the catalog is malformed.
    pub async fn available_checks(&self) -> Result<Vec<CheckCatalogEntry>, ClientError> {
        let resp = self
            .send(self.request(Method::GET, "/config/available-checks"))
            .await?;
        self.checked(resp, "check_catalog").await
    }

    /// Submit a configuration (`POST /configure-checks`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the service rejects the configuration.
    pub async fn configure_checks(
        &self,
        config: &Map<String, Value>,
    ) -> Result<MessageResponse, ClientError> {
        let resp = self
            .send(self.request(Method::POST, "/configure-checks").json(config))
            .await?;
        http::decode(resp).await
    }

    /// Run the configured checks on the uploaded data (`POST /identify-issues`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if execution fails; a run that finds zero
    /// issues is a success.
    pub async fn identify_issues(&self) -> Result<RunChecksResponse, ClientError> {
        let resp = self
            .send(self.request(Method::POST, "/identify-issues"))
            .await?;
        self.checked(resp, "run_checks_response").await
    }
}
