//! Cross-cutting error types for datviz.
//!
//! Crate-specific errors (`ClientError`, `WorkflowError`, ...) live in their
//! own crates. The CLI converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any datviz crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
