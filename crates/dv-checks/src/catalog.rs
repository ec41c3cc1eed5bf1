//! Built-in field catalog.
//!
//! The remote service lists configuration keys per check; this catalog maps
//! each known key to its typed [`FieldSpec`].

use crate::error::CatalogError;
use crate::field::{EnumOption, FieldKind, FieldSpec};

const COLUMN_LISTS: &[&str] = &[
    "mandatory_columns",
    "text_columns",
    "numeric_columns",
    "date_columns",
    "duplicate_key_columns",
    "columns_to_keep",
];

/// Resolve a configuration key to its built-in field, if the catalog knows it.
#[must_use]
pub fn builtin_field(key: &str) -> Option<FieldSpec> {
    if COLUMN_LISTS.contains(&key) {
        return Some(field(key, FieldKind::ColumnMultiSelect));
    }

    let kind = match key {
        "id_column" => FieldKind::ColumnSingleSelect,
        "case_standardization" => FieldKind::EnumSelect {
            options: vec![
                EnumOption::new("upper", "UPPERCASE"),
                EnumOption::new("lower", "lowercase"),
                EnumOption::new("title", "Title Case"),
            ],
        },
        "constant_value_threshold" => FieldKind::BoundedSlider {
            min: 0.0,
            max: 1.0,
            step: 0.01,
        },
        "unwanted_characters" | "cross_field_rules" => FieldKind::FreeTextRules,
        "category_validation" => FieldKind::JsonMap,
        "year_filter" => FieldKind::NestedGroup {
            fields: vec![
                field("date_column", FieldKind::ColumnSingleSelect),
                FieldSpec::new(
                    "year_range",
                    "Year Range",
                    FieldKind::NumericRangePair {
                        start_key: "start_year".to_string(),
                        end_key: "end_year".to_string(),
                        min: 1900.0,
                        max: 2100.0,
                    },
                ),
            ],
        },
        "start_end_year" => FieldKind::NestedGroup {
            fields: vec![
                field("start_year_column", FieldKind::ColumnSingleSelect),
                field("end_year_column", FieldKind::ColumnSingleSelect),
            ],
        },
        "outlier_detection" => FieldKind::NestedGroup {
            fields: vec![
                field("columns", FieldKind::ColumnMultiSelect),
                field(
                    "method",
                    FieldKind::EnumSelect {
                        options: vec![
                            EnumOption::new("iqr", "IQR"),
                            EnumOption::new("zscore", "Z-Score"),
                        ],
                    },
                ),
                field(
                    "threshold",
                    FieldKind::Numeric {
                        min: 0.1,
                        max: 5.0,
                        step: 0.1,
                    },
                ),
            ],
        },
        "unique_id_generation" => FieldKind::NestedGroup {
            fields: vec![
                FieldSpec::new("id_column", "New ID Column Name", FieldKind::FreeText),
                FieldSpec::new(
                    "columns_to_concat",
                    "Columns to Concatenate",
                    FieldKind::ColumnMultiSelect,
                ),
            ],
        },
        _ => return None,
    };
    Some(field(key, kind))
}

/// Check the structural rules every catalog field must satisfy: groups hold
/// no groups, and range pairs only appear inside a group.
///
/// # Errors
///
/// Returns the first [`CatalogError`] found.
pub fn check_structure(spec: &FieldSpec) -> Result<(), CatalogError> {
    match &spec.kind {
        FieldKind::NumericRangePair { .. } => Err(CatalogError::RangeOutsideGroup {
            key: spec.key.clone(),
        }),
        FieldKind::NestedGroup { fields } => {
            FieldKind::nested_group(&spec.key, fields.clone()).map(|_| ())
        }
        _ => Ok(()),
    }
}

/// `snake_case` key → title-cased label.
#[must_use]
pub fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn field(key: &str, kind: FieldKind) -> FieldSpec {
    FieldSpec::new(key, &humanize(key), kind)
}
