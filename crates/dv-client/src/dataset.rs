//! Dataset upload and preview.

use dv_core::entities::{DataPreview, UploadResult};
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use crate::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Upload a dataset file (`POST /upload`, multipart field `file`).
    ///
    /// When the service does not return a preview inline, it is fetched from
    /// `GET /fetch-data`. A failed follow-up keeps the columns and yields an
    /// empty preview, so the returned `preview` is always `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the upload itself fails or is rejected.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadResult, ClientError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("file", part);
        let resp = self
            .send(self.request(Method::POST, "/upload").multipart(form))
            .await?;
        let mut result: UploadResult = self.checked(resp, "upload_result").await?;

        if result.preview.is_none() {
            let preview = match self.fetch_data().await {
                Ok(data) => data.preview,
                Err(error) => {
                    tracing::warn!(%error, "preview fetch failed; continuing without preview");
                    Vec::new()
                }
            };
            result.preview = Some(preview);
        }
        Ok(result)
    }

    /// Columns and preview rows of the last upload (`GET /fetch-data`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or nothing was uploaded.
    pub async fn fetch_data(&self) -> Result<DataPreview, ClientError> {
        let resp = self.send(self.request(Method::GET, "/fetch-data")).await?;
        self.checked(resp, "data_preview").await
    }
}
