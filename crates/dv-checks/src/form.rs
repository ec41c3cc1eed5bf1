//! Validated edits over [`CheckConfigModel`].

use dv_core::entities::ColumnSet;
use serde_json::Value;

use crate::error::FieldError;
use crate::field::{FieldKind, FieldSpec};
use crate::model::{CheckConfigModel, FieldPath};
use crate::registry::CheckSchemaRegistry;

/// One user edit to the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    SetScalar { key: String, value: Value },
    SetNested { group: String, child: String, value: Value },
    SetArray { key: String, values: Vec<Value> },
    ToggleColumn { path: FieldPath, column: String, included: bool },
    SelectAll { path: FieldPath },
    SelectNone { path: FieldPath },
}

impl FieldEdit {
    #[must_use]
    pub fn path(&self) -> FieldPath {
        match self {
            Self::SetScalar { key, .. } | Self::SetArray { key, .. } => FieldPath::top(key),
            Self::SetNested { group, child, .. } => FieldPath::nested(group, child),
            Self::ToggleColumn { path, .. } | Self::SelectAll { path } | Self::SelectNone { path } => {
                path.clone()
            }
        }
    }
}

/// Applies [`FieldEdit`]s against the session's registry and uploaded columns.
#[derive(Debug, Clone, Copy)]
pub struct ConfigForm<'a> {
    registry: &'a CheckSchemaRegistry,
    columns: &'a ColumnSet,
}

impl<'a> ConfigForm<'a> {
    #[must_use]
    pub const fn new(registry: &'a CheckSchemaRegistry, columns: &'a ColumnSet) -> Self {
        Self { registry, columns }
    }

    /// The field addressed by `path`.
    ///
    /// `Ok(None)` means the key is unknown and edits pass through unchecked.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NotAGroup`] or [`FieldError::UnknownChild`] when a
    /// nested path does not match a group the registry declares.
    pub fn field_at(&self, path: &FieldPath) -> Result<Option<&'a FieldSpec>, FieldError> {
        match path {
            FieldPath::Top(key) => Ok(self.registry.field(key)),
            FieldPath::Nested { group, child } => {
                let Some(spec) = self.registry.field(group) else {
                    return Ok(None);
                };
                if !matches!(spec.kind, FieldKind::NestedGroup { .. }) {
                    return Err(FieldError::NotAGroup { key: group.clone() });
                }
                spec.child(child)
                    .map(Some)
                    .ok_or_else(|| FieldError::UnknownChild {
                        group: group.clone(),
                        child: child.clone(),
                    })
            }
        }
    }

    /// Parse text typed for `path` into a value of the right shape.
    ///
    /// Unknown keys take JSON when it parses and a plain string otherwise.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldError`] of the addressed field's parser.
    pub fn parse(&self, path: &FieldPath, text: &str) -> Result<Value, FieldError> {
        match self.field_at(path)? {
            Some(spec) => spec.parse_input(text),
            None => Ok(serde_json::from_str(text.trim())
                .unwrap_or_else(|_| Value::String(text.trim().to_string()))),
        }
    }

    /// Apply one edit, returning the new model.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] if the edit does not fit the addressed field.
    /// The input model is never changed.
    pub fn apply(
        &self,
        model: &CheckConfigModel,
        edit: &FieldEdit,
    ) -> Result<CheckConfigModel, FieldError> {
        let path = edit.path();
        let spec = self.field_at(&path)?;

        match edit {
            FieldEdit::ToggleColumn {
                column, included, ..
            } => {
                require_column_list(spec, &path)?;
                if *included && spec.is_some() && !self.columns.contains(column) {
                    return Err(FieldError::UnknownColumn {
                        key: path.to_string(),
                        column: column.clone(),
                    });
                }
                Ok(model.toggle_column_at(&path, column, *included))
            }
            FieldEdit::SelectAll { .. } => {
                require_column_list(spec, &path)?;
                Ok(model.select_all_at(&path, self.columns))
            }
            FieldEdit::SelectNone { .. } => {
                require_column_list(spec, &path)?;
                Ok(model.select_none_at(&path))
            }
            FieldEdit::SetScalar { value, .. } | FieldEdit::SetNested { value, .. } => {
                self.write_checked(model, &path, spec, value.clone())
            }
            FieldEdit::SetArray { values, .. } => {
                self.write_checked(model, &path, spec, Value::Array(values.clone()))
            }
        }
    }

    fn write_checked(
        &self,
        model: &CheckConfigModel,
        path: &FieldPath,
        spec: Option<&FieldSpec>,
        value: Value,
    ) -> Result<CheckConfigModel, FieldError> {
        let next = model.write(path, value);
        if let Some(spec) = spec {
            let container = match path {
                FieldPath::Top(_) => next.as_map().clone(),
                FieldPath::Nested { group, .. } => next
                    .get(group)
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
            };
            spec.validate_in(&container, self.columns)?;
        }
        Ok(next)
    }
}

fn require_column_list(spec: Option<&FieldSpec>, path: &FieldPath) -> Result<(), FieldError> {
    match spec {
        Some(spec) if !spec.kind.is_column_list() => Err(FieldError::NotAColumnList {
            key: path.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Split rule text into entries, one per line, dropping blank lines.
#[must_use]
pub fn parse_rules(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parse a JSON object typed into a map editor.
///
/// # Errors
///
/// Returns [`FieldError::InvalidJson`] when the text is not JSON and
/// [`FieldError::TypeMismatch`] when it is JSON but not an object.
pub fn parse_json_map(key: &str, text: &str) -> Result<Value, FieldError> {
    let value: Value = serde_json::from_str(text).map_err(|e| FieldError::InvalidJson {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(FieldError::TypeMismatch {
            key: key.to_string(),
            expected: "a JSON object",
        })
    }
}
