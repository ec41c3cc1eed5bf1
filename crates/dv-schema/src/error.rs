//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("payload does not match schema '{schema}': {}", errors.join("; "))]
    ValidationFailed {
        schema: String,
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("schema generation error: {0}")]
    Generation(String),

    /// Payload passed validation but could not be read into its Rust type.
    #[error("payload could not be decoded as '{schema}': {source}")]
    Decode {
        schema: String,
        #[source]
        source: serde_json::Error,
    },
}
