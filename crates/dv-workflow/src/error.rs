//! Workflow error types.

use dv_checks::FieldError;
use dv_client::ClientError;
use dv_core::CoreError;
use dv_core::enums::ReportKind;
use thiserror::Error;

use crate::machine::Section;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("no project selected")]
    NoProject,

    #[error("{section} is locked: {reason}")]
    Locked {
        section: Section,
        reason: &'static str,
    },

    #[error("'{0}' is empty")]
    EmptyFile(String),

    #[error("unsupported file type '{0}' (expected .csv, .xlsx or .parquet)")]
    UnsupportedFormat(String),

    #[error("the {0} report is not available yet")]
    ReportUnavailable(ReportKind),

    /// A response arrived for a session that has since been replaced.
    #[error("response belongs to a superseded session")]
    StaleResponse,

    /// The service rejected the token; the session has been cleared.
    #[error("session expired, log in again")]
    AuthLost,

    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
