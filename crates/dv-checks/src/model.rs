//! Immutable check configuration model.
//!
//! Every mutation returns a new [`CheckConfigModel`] and writes exactly one
//! top-level key. Nested writes merge one level deep into the group object,
//! keeping sibling children.

use std::fmt;

use dv_core::entities::ColumnSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::FieldSpec;

/// Address of a configuration value: a top-level key, or one child of a
/// nested group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Top(String),
    Nested { group: String, child: String },
}

impl FieldPath {
    #[must_use]
    pub fn top(key: &str) -> Self {
        Self::Top(key.to_string())
    }

    #[must_use]
    pub fn nested(group: &str, child: &str) -> Self {
        Self::Nested {
            group: group.to_string(),
            child: child.to_string(),
        }
    }

    /// Parse `key` or `group.child`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.split_once('.') {
            Some((group, child)) => Self::nested(group, child),
            None => Self::top(text),
        }
    }

    /// The top-level key this path writes to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Top(key) => key,
            Self::Nested { group, .. } => group,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top(key) => f.write_str(key),
            Self::Nested { group, child } => write!(f, "{group}.{child}"),
        }
    }
}

/// Field key → configuration value.
///
/// Keys the registry does not know are kept as-is. The model never checks
/// cross-field consistency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckConfigModel {
    values: Map<String, Value>,
}

impl CheckConfigModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// The stored value for a top-level key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The stored value for a field, or its kind's neutral default.
    #[must_use]
    pub fn resolved(&self, spec: &FieldSpec) -> Value {
        self.get(&spec.key)
            .cloned()
            .unwrap_or_else(|| spec.kind.neutral_value())
    }

    #[must_use]
    pub fn read(&self, path: &FieldPath) -> Option<&Value> {
        match path {
            FieldPath::Top(key) => self.get(key),
            FieldPath::Nested { group, child } => self.get(group)?.as_object()?.get(child),
        }
    }

    /// The string entries of an array value; missing or non-array reads as empty.
    #[must_use]
    pub fn array_strings(&self, path: &FieldPath) -> Vec<String> {
        self.read(path)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace a top-level value.
    #[must_use]
    pub fn set_scalar(&self, key: &str, value: Value) -> Self {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value);
        Self { values }
    }

    /// Merge one child into a group object, keeping its siblings.
    ///
    /// A group value that is not an object is replaced by a fresh one.
    #[must_use]
    pub fn set_nested(&self, group: &str, child: &str, value: Value) -> Self {
        let mut parent = self
            .get(group)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        parent.insert(child.to_string(), value);
        self.set_scalar(group, Value::Object(parent))
    }

    /// Replace an array value wholesale.
    #[must_use]
    pub fn set_array(&self, key: &str, values: Vec<Value>) -> Self {
        self.set_scalar(key, Value::Array(values))
    }

    /// Write a value at any path.
    #[must_use]
    pub fn write(&self, path: &FieldPath, value: Value) -> Self {
        match path {
            FieldPath::Top(key) => self.set_scalar(key, value),
            FieldPath::Nested { group, child } => self.set_nested(group, child, value),
        }
    }

    /// Add or remove one column from a top-level column list.
    #[must_use]
    pub fn toggle_column(&self, key: &str, column: &str, included: bool) -> Self {
        self.toggle_column_at(&FieldPath::top(key), column, included)
    }

    /// Add or remove one column, keeping the order of the others.
    ///
    /// Adding a column that is already present leaves the list unchanged.
    #[must_use]
    pub fn toggle_column_at(&self, path: &FieldPath, column: &str, included: bool) -> Self {
        let mut current = self.array_strings(path);
        let present = current.iter().any(|c| c == column);
        match (included, present) {
            (true, false) => current.push(column.to_string()),
            (false, true) => current.retain(|c| c != column),
            _ => return self.clone(),
        }
        self.write(path, string_array(current))
    }

    /// Set a top-level column list to every uploaded column, in upload order.
    #[must_use]
    pub fn select_all(&self, key: &str, columns: &ColumnSet) -> Self {
        self.select_all_at(&FieldPath::top(key), columns)
    }

    #[must_use]
    pub fn select_all_at(&self, path: &FieldPath, columns: &ColumnSet) -> Self {
        self.write(path, string_array(columns.to_vec()))
    }

    /// Set a top-level column list to empty.
    #[must_use]
    pub fn select_none(&self, key: &str) -> Self {
        self.select_none_at(&FieldPath::top(key))
    }

    #[must_use]
    pub fn select_none_at(&self, path: &FieldPath) -> Self {
        self.write(path, Value::Array(Vec::new()))
    }
}

fn string_array(items: Vec<String>) -> Value {
    Value::Array(items.into_iter().map(Value::String).collect())
}
