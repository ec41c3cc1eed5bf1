use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A single preview row keyed by column name.
pub type PreviewRow = serde_json::Map<String, serde_json::Value>;

/// Ordered column names produced by a successful upload.
///
/// Immutable until the next successful upload replaces it. Every
/// configuration field that references columns is validated against the
/// current set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct ColumnSet(Vec<String>);

impl ColumnSet {
    /// Build a column set, rejecting blank or duplicated names.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if a name is empty or appears twice.
    pub fn new(columns: Vec<String>) -> Result<Self, CoreError> {
        for (index, column) in columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "column {index} has an empty name"
                )));
            }
            if columns[..index].contains(column) {
                return Err(CoreError::Validation(format!(
                    "column '{column}' appears more than once"
                )));
            }
        }
        Ok(Self(columns))
    }

    /// The empty column set (no upload yet).
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| c == column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Column names as an owned vector, in upload order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Response of `POST /upload`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UploadResult {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub columns: Vec<String>,
    /// Some servers return the preview inline; others require `GET /fetch-data`.
    #[serde(default)]
    pub preview: Option<Vec<PreviewRow>>,
}

/// Response of `GET /fetch-data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DataPreview {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub preview: Vec<PreviewRow>,
}
