//! Schema registry for remote payload types.
//!
//! The `SchemaRegistry` builds JSON Schemas from dv-core types at construction
//! time using [`schemars::schema_for!`] and validates via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Named JSON Schemas for every payload the remote service sends.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty))
                .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?,
        );
    };
}

impl SchemaRegistry {
    /// Build the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Generation`] if a generated schema cannot be
    /// converted to JSON.
    pub fn new() -> Result<Self, SchemaError> {
        use dv_core::entities::{
            ActivityLog, AdminStats, DataPreview, Project, SummaryPayload, UploadResult, User,
        };
        use dv_core::responses::{
            CheckCatalogEntry, MessageResponse, RunChecksResponse, TokenResponse,
        };

        let mut schemas = HashMap::new();

        // --- Session payloads ---
        register!(schemas, "summary_payload", SummaryPayload);
        register!(schemas, "upload_result", UploadResult);
        register!(schemas, "data_preview", DataPreview);
        register!(schemas, "check_catalog", Vec<CheckCatalogEntry>);

        // --- Entities ---
        register!(schemas, "project", Project);
        register!(schemas, "project_list", Vec<Project>);
        register!(schemas, "user", User);
        register!(schemas, "admin_stats", AdminStats);
        register!(schemas, "activity_log", ActivityLog);

        // --- Envelopes ---
        register!(schemas, "token_response", TokenResponse);
        register!(schemas, "message_response", MessageResponse);
        register!(schemas, "run_checks_response", RunChecksResponse);

        Ok(Self { schemas })
    }

    /// Get a schema by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema: name.to_string(),
                errors,
            })
        }
    }

    /// Validate, then decode into the payload type.
    ///
    /// # Errors
    ///
    /// Returns the validation error, or `SchemaError::Decode` if the value
    /// validates but does not deserialize.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, &instance)?;
        serde_json::from_value(instance).map_err(|source| SchemaError::Decode {
            schema: name.to_string(),
            source,
        })
    }

    /// Parse raw bytes as JSON, then validate and decode.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Decode` for bytes that are not JSON, otherwise
    /// as [`parse`](Self::parse).
    pub fn parse_slice<T: DeserializeOwned>(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> Result<T, SchemaError> {
        let instance = serde_json::from_slice(bytes).map_err(|source| SchemaError::Decode {
            schema: name.to_string(),
            source,
        })?;
        self.parse(name, instance)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::entities::SummaryPayload;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new().unwrap()
    }

    #[test]
    fn registry_lists_every_payload() {
        let reg = registry();
        assert_eq!(reg.schema_count(), 12);
        let names = reg.list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"summary_payload"));
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let err = registry().validate("nonexistent", &json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::NotFound(name) if name == "nonexistent"));
    }

    #[test]
    fn summary_with_text_issue_count_fails_validation() {
        let err = registry()
            .validate(
                "summary_payload",
                &json!({"timestamp": "t", "columns": [], "checks": [{"check": "a", "issues": "many"}]}),
            )
            .unwrap_err();
        let SchemaError::ValidationFailed { schema, errors } = err else {
            panic!("expected validation failure");
        };
        assert_eq!(schema, "summary_payload");
        assert!(!errors.is_empty());
    }

    #[test]
    fn parse_decodes_valid_summary() {
        let summary: SummaryPayload = registry()
            .parse_slice(
                "summary_payload",
                br#"{"timestamp": "2025-06-01 10:00:00", "columns": ["id"], "checks": [{"check": "mandatory_columns", "issues": 0}]}"#,
            )
            .unwrap();
        assert_eq!(summary.checks.len(), 1);
        assert_eq!(summary.total_issues(), 0);
    }

    #[test]
    fn parse_slice_rejects_non_json() {
        let err = registry()
            .parse_slice::<SummaryPayload>("summary_payload", b"PK\x03\x04")
            .unwrap_err();
        assert!(matches!(err, SchemaError::Decode { .. }));
    }
}
