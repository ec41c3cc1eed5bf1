//! Client error types.

use thiserror::Error;

/// Errors from calls to the processing service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The bearer token is missing, expired, or rejected (401).
    #[error("not authorized ({status}): {detail}")]
    Unauthorized { status: u16, detail: String },

    /// The resource does not exist (404), e.g. no report generated yet.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service returned another non-success status, including 403 for
    /// a valid token that lacks permission.
    #[error("{detail} (status {status})")]
    Api { status: u16, detail: String },

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response body did not match its payload schema.
    #[error(transparent)]
    Schema(#[from] dv_schema::SchemaError),
}

impl ClientError {
    /// Whether this failure means the session's token is no longer usable.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The message a user should see: the service's `detail` when it sent one.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Unauthorized { detail, .. } | Self::Api { detail, .. } | Self::NotFound(detail) => {
                detail.clone()
            }
            other => other.to_string(),
        }
    }
}
