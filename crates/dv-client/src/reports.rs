//! Report downloads.

use dv_core::entities::SummaryPayload;
use dv_core::enums::ReportKind;
use dv_core::responses::ReportFile;
use reqwest::Method;

use crate::error::ClientError;
use crate::{ApiClient, http};

const fn endpoint(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Issues => "/download-issues",
        ReportKind::Summary => "/download-issues-summary",
    }
}

impl ApiClient {
    /// Download a report as raw bytes with the filename the service suggests.
    ///
    /// Falls back to the kind's default filename when the response has no
    /// usable `Content-Disposition`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when no report has been generated.
    pub async fn download_report(&self, kind: ReportKind) -> Result<ReportFile, ClientError> {
        let resp = self
            .send(self.request(Method::GET, endpoint(kind)))
            .await?;
        let filename = http::content_disposition_filename(&resp)
            .unwrap_or_else(|| kind.fallback_filename().to_string());
        let bytes = resp.bytes().await?.to_vec();
        tracing::debug!(%kind, %filename, size = bytes.len(), "report downloaded");
        Ok(ReportFile { filename, bytes })
    }

    /// Fetch and parse the run summary for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Schema`] if the summary does not match its schema.
    pub async fn summary(&self) -> Result<SummaryPayload, ClientError> {
        let resp = self
            .send(self.request(Method::GET, endpoint(ReportKind::Summary)))
            .await?;
        self.checked(resp, "summary_payload").await
    }
}
