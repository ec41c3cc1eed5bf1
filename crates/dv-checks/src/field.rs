//! Typed configuration fields.
//!
//! A [`FieldSpec`] binds a configuration key to a [`FieldKind`]. The kind
//! decides the field's neutral default, how a stored value is validated, and
//! how raw text input is parsed into a value.

use dv_core::entities::ColumnSet;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CatalogError, FieldError};

/// One selectable value of an enum field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

impl EnumOption {
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Shape of a configuration field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Ordered subset of the uploaded columns.
    ColumnMultiSelect,
    /// One uploaded column, or none (`""`).
    ColumnSingleSelect,
    /// One of a fixed set of string options.
    EnumSelect { options: Vec<EnumOption> },
    /// A free number within bounds.
    Numeric { min: f64, max: f64, step: f64 },
    /// A lower/upper number pair stored under two sibling keys of its group.
    NumericRangePair {
        start_key: String,
        end_key: String,
        min: f64,
        max: f64,
    },
    /// A number picked on a slider within bounds.
    BoundedSlider { min: f64, max: f64, step: f64 },
    /// A plain string.
    FreeText,
    /// A list of free-text entries, one per line.
    FreeTextRules,
    /// A JSON object edited as text.
    JsonMap,
    /// A named sub-object with its own fields. Children are never groups.
    NestedGroup { fields: Vec<FieldSpec> },
}

impl FieldKind {
    /// Build a nested group, rejecting groups nested inside groups.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NestingTooDeep`] if a child is itself a group.
    pub fn nested_group(group: &str, fields: Vec<FieldSpec>) -> Result<Self, CatalogError> {
        if let Some(child) = fields
            .iter()
            .find(|f| matches!(f.kind, Self::NestedGroup { .. }))
        {
            return Err(CatalogError::NestingTooDeep {
                group: group.to_string(),
                child: child.key.clone(),
            });
        }
        Ok(Self::NestedGroup { fields })
    }

    /// The empty/no-op value for this kind.
    #[must_use]
    pub fn neutral_value(&self) -> Value {
        match self {
            Self::ColumnMultiSelect | Self::FreeTextRules => Value::Array(Vec::new()),
            Self::ColumnSingleSelect | Self::EnumSelect { .. } | Self::FreeText => {
                Value::String(String::new())
            }
            Self::Numeric { .. } | Self::BoundedSlider { .. } | Self::NumericRangePair { .. } => {
                Value::Null
            }
            Self::JsonMap | Self::NestedGroup { .. } => Value::Object(Map::new()),
        }
    }

    /// Whether the kind holds an ordered list of column names.
    #[must_use]
    pub const fn is_column_list(&self) -> bool {
        matches!(self, Self::ColumnMultiSelect)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ColumnMultiSelect => "column-multi-select",
            Self::ColumnSingleSelect => "column-single-select",
            Self::EnumSelect { .. } => "enum-select",
            Self::Numeric { .. } => "numeric",
            Self::NumericRangePair { .. } => "numeric-range-pair",
            Self::BoundedSlider { .. } => "bounded-slider",
            Self::FreeText => "free-text",
            Self::FreeTextRules => "free-text-rules",
            Self::JsonMap => "json-map",
            Self::NestedGroup { .. } => "nested-group",
        }
    }
}

/// A configuration key bound to its kind and display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    #[must_use]
    pub fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Keys this field occupies in its container object.
    #[must_use]
    pub fn storage_keys(&self) -> Vec<&str> {
        match &self.kind {
            FieldKind::NumericRangePair {
                start_key, end_key, ..
            } => vec![start_key.as_str(), end_key.as_str()],
            _ => vec![self.key.as_str()],
        }
    }

    /// Children of a nested group (empty for other kinds).
    #[must_use]
    pub fn children(&self) -> &[FieldSpec] {
        match &self.kind {
            FieldKind::NestedGroup { fields } => fields,
            _ => &[],
        }
    }

    /// The child owning `storage_key`, if this is a group that declares it.
    #[must_use]
    pub fn child(&self, storage_key: &str) -> Option<&FieldSpec> {
        self.children()
            .iter()
            .find(|c| c.storage_keys().contains(&storage_key))
    }

    /// Validate a value stored under one of this field's storage keys.
    ///
    /// `container` is the object that holds the value, so a range pair can
    /// check its sibling bound.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] describing the first violation found.
    pub fn validate_in(
        &self,
        container: &Map<String, Value>,
        columns: &ColumnSet,
    ) -> Result<(), FieldError> {
        match &self.kind {
            FieldKind::NumericRangePair {
                start_key,
                end_key,
                min,
                max,
            } => {
                let start = container.get(start_key).unwrap_or(&Value::Null);
                let end = container.get(end_key).unwrap_or(&Value::Null);
                let start = bounded_number(start_key, start, *min, *max)?;
                let end = bounded_number(end_key, end, *min, *max)?;
                match (start, end) {
                    (Some(start), Some(end)) if start > end => Err(FieldError::InvertedRange {
                        key: self.key.clone(),
                        start,
                        end,
                    }),
                    _ => Ok(()),
                }
            }
            _ => match container.get(&self.key) {
                Some(value) => self.validate(value, columns),
                None => Ok(()),
            },
        }
    }

    /// Validate a value for this field's own key.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] describing the first violation found.
    pub fn validate(&self, value: &Value, columns: &ColumnSet) -> Result<(), FieldError> {
        let key = self.key.as_str();
        match &self.kind {
            FieldKind::ColumnMultiSelect => {
                let names = string_array(key, value, "a list of column names")?;
                for (index, name) in names.iter().enumerate() {
                    if !columns.contains(name) {
                        return Err(unknown_column(key, name));
                    }
                    if names[..index].contains(name) {
                        return Err(FieldError::DuplicateColumn {
                            key: key.to_string(),
                            column: (*name).to_string(),
                        });
                    }
                }
                Ok(())
            }
            FieldKind::ColumnSingleSelect => {
                let name = value.as_str().ok_or_else(|| mismatch(key, "a column name"))?;
                if name.is_empty() || columns.contains(name) {
                    Ok(())
                } else {
                    Err(unknown_column(key, name))
                }
            }
            FieldKind::EnumSelect { options } => {
                let chosen = value.as_str().ok_or_else(|| mismatch(key, "a string option"))?;
                if chosen.is_empty() || options.iter().any(|o| o.value == chosen) {
                    Ok(())
                } else {
                    Err(FieldError::InvalidOption {
                        key: key.to_string(),
                        value: chosen.to_string(),
                        options: options
                            .iter()
                            .map(|o| o.value.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
                }
            }
            FieldKind::Numeric { min, max, .. } | FieldKind::BoundedSlider { min, max, .. } => {
                bounded_number(key, value, *min, *max).map(|_| ())
            }
            // Its bounds live under two sibling keys; see `validate_in`.
            FieldKind::NumericRangePair { .. } => {
                Err(mismatch(key, "start and end bounds inside a group"))
            }
            FieldKind::FreeText => value
                .as_str()
                .map(|_| ())
                .ok_or_else(|| mismatch(key, "a string")),
            FieldKind::FreeTextRules => {
                string_array(key, value, "a list of strings").map(|_| ())
            }
            FieldKind::JsonMap => {
                let object = value
                    .as_object()
                    .ok_or_else(|| mismatch(key, "a JSON object"))?;
                for entry in object.values() {
                    string_array(key, entry, "an object of string lists")?;
                }
                Ok(())
            }
            FieldKind::NestedGroup { fields } => {
                let object = value
                    .as_object()
                    .ok_or_else(|| mismatch(key, "an object of group fields"))?;
                for child_key in object.keys() {
                    if self.child(child_key).is_none() {
                        return Err(FieldError::UnknownChild {
                            group: key.to_string(),
                            child: child_key.clone(),
                        });
                    }
                }
                for child in fields {
                    child.validate_in(object, columns)?;
                }
                Ok(())
            }
        }
    }

    /// Parse raw text input (as typed on a command line) into a value.
    ///
    /// JSON literals are accepted for every kind; otherwise the text is read
    /// the way the kind's widget would read it.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidJson`] or [`FieldError::TypeMismatch`]
    /// when the text cannot be read as this kind.
    pub fn parse_input(&self, text: &str) -> Result<Value, FieldError> {
        let key = self.key.as_str();
        let trimmed = text.trim();
        match &self.kind {
            FieldKind::ColumnMultiSelect => {
                if trimmed.starts_with('[') {
                    return parse_json(key, trimmed);
                }
                Ok(Value::Array(
                    trimmed
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| Value::String(s.to_string()))
                        .collect(),
                ))
            }
            FieldKind::FreeTextRules => {
                if trimmed.starts_with('[') {
                    return parse_json(key, trimmed);
                }
                Ok(Value::Array(
                    crate::form::parse_rules(text)
                        .into_iter()
                        .map(Value::String)
                        .collect(),
                ))
            }
            FieldKind::ColumnSingleSelect | FieldKind::EnumSelect { .. } | FieldKind::FreeText => {
                if trimmed.starts_with('"') {
                    return parse_json(key, trimmed);
                }
                Ok(Value::String(trimmed.to_string()))
            }
            FieldKind::Numeric { .. }
            | FieldKind::BoundedSlider { .. }
            | FieldKind::NumericRangePair { .. } => {
                if trimmed.is_empty() || trimmed == "null" {
                    return Ok(Value::Null);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(number_value)
                    .ok_or_else(|| mismatch(key, "a number"))
            }
            FieldKind::JsonMap => crate::form::parse_json_map(key, text),
            FieldKind::NestedGroup { .. } => {
                let value = parse_json(key, trimmed)?;
                if value.is_object() {
                    Ok(value)
                } else {
                    Err(mismatch(key, "a JSON object of group fields"))
                }
            }
        }
    }
}

/// Convert a float to a JSON number, keeping whole numbers integral.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn number_value(value: f64) -> Option<Value> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Some(Value::from(value as i64));
    }
    serde_json::Number::from_f64(value).map(Value::Number)
}

fn bounded_number(key: &str, value: &Value, min: f64, max: f64) -> Result<Option<f64>, FieldError> {
    if value.is_null() {
        return Ok(None);
    }
    let number = value.as_f64().ok_or_else(|| mismatch(key, "a number"))?;
    if number < min || number > max {
        return Err(FieldError::OutOfRange {
            key: key.to_string(),
            value: number,
            min,
            max,
        });
    }
    Ok(Some(number))
}

fn string_array<'v>(
    key: &str,
    value: &'v Value,
    expected: &'static str,
) -> Result<Vec<&'v str>, FieldError> {
    value
        .as_array()
        .ok_or_else(|| mismatch(key, expected))?
        .iter()
        .map(|item| item.as_str().ok_or_else(|| mismatch(key, expected)))
        .collect()
}

fn parse_json(key: &str, text: &str) -> Result<Value, FieldError> {
    serde_json::from_str(text).map_err(|e| FieldError::InvalidJson {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn mismatch(key: &str, expected: &'static str) -> FieldError {
    FieldError::TypeMismatch {
        key: key.to_string(),
        expected,
    }
}

fn unknown_column(key: &str, column: &str) -> FieldError {
    FieldError::UnknownColumn {
        key: key.to_string(),
        column: column.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn columns() -> ColumnSet {
        ColumnSet::new(vec!["id".into(), "name".into(), "dob".into()]).unwrap()
    }

    fn year_group() -> FieldSpec {
        FieldSpec::new(
            "year_filter",
            "Year Filter",
            FieldKind::nested_group(
                "year_filter",
                vec![
                    FieldSpec::new("date_column", "Date Column", FieldKind::ColumnSingleSelect),
                    FieldSpec::new(
                        "year_range",
                        "Years",
                        FieldKind::NumericRangePair {
                            start_key: "start_year".into(),
                            end_key: "end_year".into(),
                            min: 1900.0,
                            max: 2100.0,
                        },
                    ),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn range_pair_has_no_single_value() {
        let range = year_group().child("start_year").cloned().unwrap();
        assert!(matches!(
            range.validate(&json!(1990), &columns()),
            Err(FieldError::TypeMismatch { ref key, .. }) if key == "year_range"
        ));

        let mut bounds = Map::new();
        bounds.insert("start_year".into(), json!(2000));
        bounds.insert("end_year".into(), json!(1990));
        assert!(matches!(
            range.validate_in(&bounds, &columns()),
            Err(FieldError::InvertedRange { .. })
        ));
    }

    #[test]
    fn neutral_values_follow_kind() {
        assert_eq!(FieldKind::ColumnMultiSelect.neutral_value(), json!([]));
        assert_eq!(FieldKind::FreeTextRules.neutral_value(), json!([]));
        assert_eq!(FieldKind::ColumnSingleSelect.neutral_value(), json!(""));
        assert_eq!(FieldKind::FreeText.neutral_value(), json!(""));
        assert_eq!(FieldKind::JsonMap.neutral_value(), json!({}));
        assert_eq!(year_group().kind.neutral_value(), json!({}));
        assert_eq!(
            FieldKind::BoundedSlider {
                min: 0.0,
                max: 1.0,
                step: 0.01
            }
            .neutral_value(),
            Value::Null
        );
    }

    #[test]
    fn nested_groups_cannot_nest() {
        let inner = year_group();
        let err = FieldKind::nested_group("outer", vec![inner]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::NestingTooDeep {
                group: "outer".into(),
                child: "year_filter".into()
            }
        );
    }

    #[test]
    fn multi_select_rejects_foreign_and_repeated_columns() {
        let spec = FieldSpec::new("mandatory_columns", "Mandatory", FieldKind::ColumnMultiSelect);
        assert!(spec.validate(&json!(["id", "dob"]), &columns()).is_ok());
        assert!(matches!(
            spec.validate(&json!(["zip"]), &columns()),
            Err(FieldError::UnknownColumn { .. })
        ));
        assert!(matches!(
            spec.validate(&json!(["id", "id"]), &columns()),
            Err(FieldError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn single_select_allows_none() {
        let spec = FieldSpec::new("id_column", "ID", FieldKind::ColumnSingleSelect);
        assert!(spec.validate(&json!(""), &columns()).is_ok());
        assert!(spec.validate(&json!("id"), &columns()).is_ok());
        assert!(spec.validate(&json!("zip"), &columns()).is_err());
    }

    #[test]
    fn group_rejects_undeclared_children() {
        let err = year_group()
            .validate(&json!({"columns": ["id"]}), &columns())
            .unwrap_err();
        assert_eq!(
            err,
            FieldError::UnknownChild {
                group: "year_filter".into(),
                child: "columns".into()
            }
        );
    }

    #[test]
    fn range_pair_checks_bounds_and_order() {
        let group = year_group();
        assert!(group
            .validate(&json!({"start_year": 1990, "end_year": 2000}), &columns())
            .is_ok());
        assert!(group
            .validate(&json!({"start_year": 1990, "end_year": null}), &columns())
            .is_ok());
        assert!(matches!(
            group.validate(&json!({"start_year": 2010, "end_year": 2000}), &columns()),
            Err(FieldError::InvertedRange { .. })
        ));
        assert!(matches!(
            group.validate(&json!({"start_year": 1800}), &columns()),
            Err(FieldError::OutOfRange { .. })
        ));
    }

    #[test]
    fn child_lookup_resolves_range_storage_keys() {
        let group = year_group();
        assert_eq!(group.child("end_year").map(|c| c.key.as_str()), Some("year_range"));
        assert_eq!(group.child("date_column").map(|c| c.key.as_str()), Some("date_column"));
        assert!(group.child("year_range").is_none());
    }

    #[test]
    fn parse_input_reads_text_per_kind() {
        let multi = FieldSpec::new("text_columns", "Text", FieldKind::ColumnMultiSelect);
        assert_eq!(multi.parse_input("name, dob").unwrap(), json!(["name", "dob"]));
        assert_eq!(multi.parse_input(r#"["id"]"#).unwrap(), json!(["id"]));

        let number = FieldSpec::new(
            "threshold",
            "Threshold",
            FieldKind::Numeric {
                min: 0.1,
                max: 5.0,
                step: 0.1,
            },
        );
        assert_eq!(number.parse_input("1.5").unwrap(), json!(1.5));
        assert_eq!(number.parse_input("2").unwrap(), json!(2));
        assert_eq!(number.parse_input("").unwrap(), Value::Null);
        assert!(number.parse_input("lots").is_err());
    }
}
