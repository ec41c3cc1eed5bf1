//! Session catalog of available checks.

use std::collections::HashSet;
use std::future::Future;

use dv_core::responses::CheckCatalogEntry;
use serde::Serialize;

use crate::catalog::{builtin_field, check_structure};
use crate::error::CatalogError;
use crate::field::FieldSpec;

/// A check type with its configuration fields resolved to typed specs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckDescriptor {
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldSpec>,
    /// Configuration keys the client has no field for. Accepted, not rendered.
    pub unknown_fields: Vec<String>,
}

/// The available checks for one session.
///
/// Loaded once per session; there is no refresh path. Configuration keys
/// are shared between checks (several checks read `text_columns`), so
/// [`field`](Self::field) resolves a key regardless of which check listed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckSchemaRegistry {
    checks: Vec<CheckDescriptor>,
}

impl CheckSchemaRegistry {
    /// An empty registry ("no checks available").
    #[must_use]
    pub const fn empty() -> Self {
        Self { checks: Vec::new() }
    }

    /// Resolve catalog entries into descriptors.
    ///
    /// Repeated check names are dropped after the first. A field that breaks
    /// the catalog's structural rules is moved to `unknown_fields`.
    #[must_use]
    pub fn from_catalog(entries: Vec<CheckCatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut checks = Vec::with_capacity(entries.len());

        for entry in entries {
            if !seen.insert(entry.name.clone()) {
                let error = CatalogError::DuplicateCheck(entry.name);
                tracing::warn!(%error, "skipping catalog entry");
                continue;
            }

            let mut fields = Vec::new();
            let mut unknown_fields = Vec::new();
            for key in entry.config_fields {
                match builtin_field(&key).map(|spec| check_structure(&spec).map(|()| spec)) {
                    Some(Ok(spec)) => fields.push(spec),
                    Some(Err(error)) => {
                        tracing::warn!(check = %entry.name, %error, "field rejected");
                        unknown_fields.push(key);
                    }
                    None => {
                        tracing::debug!(check = %entry.name, field = %key, "unknown config field");
                        unknown_fields.push(key);
                    }
                }
            }

            checks.push(CheckDescriptor {
                name: entry.name,
                description: entry.description,
                fields,
                unknown_fields,
            });
        }

        Self { checks }
    }

    /// Build from a fetch result, failing soft to an empty registry.
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<CheckCatalogEntry>, E>) -> Self {
        match result {
            Ok(entries) => Self::from_catalog(entries),
            Err(error) => {
                tracing::warn!(%error, "check catalog unavailable, continuing with no checks");
                Self::empty()
            }
        }
    }

    /// Await a catalog fetch and build the registry. Never fails.
    pub async fn load<F, E>(fetch: F) -> Self
    where
        F: Future<Output = Result<Vec<CheckCatalogEntry>, E>>,
        E: std::fmt::Display,
    {
        Self::from_result(fetch.await)
    }

    #[must_use]
    pub fn checks(&self) -> &[CheckDescriptor] {
        &self.checks
    }

    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckDescriptor> {
        self.checks.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// The typed field for a configuration key, from whichever check lists it.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.checks
            .iter()
            .flat_map(|c| c.fields.iter())
            .find(|f| f.key == key)
    }

    /// Every distinct field, in first-listed order.
    #[must_use]
    pub fn fields(&self) -> Vec<&FieldSpec> {
        let mut seen = HashSet::new();
        self.checks
            .iter()
            .flat_map(|c| c.fields.iter())
            .filter(|f| seen.insert(f.key.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str, fields: &[&str]) -> CheckCatalogEntry {
        CheckCatalogEntry {
            name: name.to_string(),
            description: format!("{name} check"),
            config_fields: fields.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn resolves_known_keys_and_keeps_unknown_ones() {
        let registry = CheckSchemaRegistry::from_catalog(vec![entry(
            "WhitespaceCaseCleaner",
            &["text_columns", "case_standardization", "emoji_policy"],
        )]);
        let check = registry.check("WhitespaceCaseCleaner").unwrap();
        let keys: Vec<&str> = check.fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["text_columns", "case_standardization"]);
        assert_eq!(check.unknown_fields, vec!["emoji_policy".to_string()]);
        assert!(registry.field("emoji_policy").is_none());
    }

    #[test]
    fn shared_keys_resolve_once() {
        let registry = CheckSchemaRegistry::from_catalog(vec![
            entry("MissingValuesDetector", &["text_columns", "numeric_columns"]),
            entry("NumericConverter", &["numeric_columns"]),
        ]);
        let keys: Vec<&str> = registry.fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["text_columns", "numeric_columns"]);
    }

    #[test]
    fn duplicate_check_names_keep_first() {
        let registry = CheckSchemaRegistry::from_catalog(vec![
            entry("IDValidator", &["id_column"]),
            entry("IDValidator", &["mandatory_columns"]),
        ]);
        assert_eq!(registry.checks().len(), 1);
        assert_eq!(registry.checks()[0].fields[0].key, "id_column");
    }

    #[test]
    fn failed_fetch_yields_empty_registry() {
        let registry = CheckSchemaRegistry::from_result::<String>(Err("connection refused".into()));
        assert!(registry.is_empty());
        assert!(registry.field("mandatory_columns").is_none());
    }

    #[tokio::test]
    async fn load_awaits_the_fetch() {
        let registry = CheckSchemaRegistry::load(async {
            Ok::<_, String>(vec![entry("ColumnFilter", &["columns_to_keep"])])
        })
        .await;
        assert_eq!(registry.checks()[0].name, "ColumnFilter");
    }
}
