//! Presentation-neutral render strategy for configuration fields.

use dv_core::entities::ColumnSet;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::field::{EnumOption, FieldKind, FieldSpec};
use crate::model::CheckConfigModel;
use crate::registry::CheckSchemaRegistry;

/// One uploaded column as offered by a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnOption {
    pub name: String,
    pub selected: bool,
}

/// What a front end should draw for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum FieldView {
    ColumnChecklist {
        key: String,
        label: String,
        options: Vec<ColumnOption>,
        /// Selected columns in the order the user picked them.
        order: Vec<String>,
    },
    ColumnDropdown {
        key: String,
        label: String,
        options: Vec<String>,
        selected: Option<String>,
        allow_none: bool,
    },
    Choice {
        key: String,
        label: String,
        options: Vec<EnumOption>,
        selected: Option<String>,
    },
    NumberInput {
        key: String,
        label: String,
        value: Option<f64>,
        min: f64,
        max: f64,
        step: f64,
    },
    RangeInputs {
        key: String,
        label: String,
        start_key: String,
        end_key: String,
        start: Option<f64>,
        end: Option<f64>,
        min: f64,
        max: f64,
    },
    Slider {
        key: String,
        label: String,
        value: Option<f64>,
        min: f64,
        max: f64,
        step: f64,
    },
    TextLines {
        key: String,
        label: String,
        lines: Vec<String>,
    },
    JsonEditor {
        key: String,
        label: String,
        text: String,
    },
    TextInput {
        key: String,
        label: String,
        value: String,
    },
    Group {
        key: String,
        label: String,
        children: Vec<FieldView>,
    },
}

impl FieldView {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::ColumnChecklist { key, .. }
            | Self::ColumnDropdown { key, .. }
            | Self::Choice { key, .. }
            | Self::NumberInput { key, .. }
            | Self::RangeInputs { key, .. }
            | Self::Slider { key, .. }
            | Self::TextLines { key, .. }
            | Self::JsonEditor { key, .. }
            | Self::TextInput { key, .. }
            | Self::Group { key, .. } => key,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::ColumnChecklist { label, .. }
            | Self::ColumnDropdown { label, .. }
            | Self::Choice { label, .. }
            | Self::NumberInput { label, .. }
            | Self::RangeInputs { label, .. }
            | Self::Slider { label, .. }
            | Self::TextLines { label, .. }
            | Self::JsonEditor { label, .. }
            | Self::TextInput { label, .. }
            | Self::Group { label, .. } => label,
        }
    }
}

impl FieldSpec {
    /// Describe this field's widget given the object that holds its value.
    #[must_use]
    pub fn render(&self, container: &Map<String, Value>, columns: &ColumnSet) -> FieldView {
        let key = self.key.clone();
        let label = self.label.clone();
        let value = container
            .get(&self.key)
            .cloned()
            .unwrap_or_else(|| self.kind.neutral_value());

        match &self.kind {
            FieldKind::ColumnMultiSelect => {
                let order = strings(&value);
                let options = columns
                    .iter()
                    .map(|name| ColumnOption {
                        name: name.clone(),
                        selected: order.contains(name),
                    })
                    .collect();
                FieldView::ColumnChecklist {
                    key,
                    label,
                    options,
                    order,
                }
            }
            FieldKind::ColumnSingleSelect => FieldView::ColumnDropdown {
                key,
                label,
                options: columns.to_vec(),
                selected: non_empty(&value),
                allow_none: true,
            },
            FieldKind::EnumSelect { options } => FieldView::Choice {
                key,
                label,
                options: options.clone(),
                selected: non_empty(&value),
            },
            FieldKind::Numeric { min, max, step } => FieldView::NumberInput {
                key,
                label,
                value: value.as_f64(),
                min: *min,
                max: *max,
                step: *step,
            },
            FieldKind::NumericRangePair {
                start_key,
                end_key,
                min,
                max,
            } => FieldView::RangeInputs {
                key,
                label,
                start_key: start_key.clone(),
                end_key: end_key.clone(),
                start: container.get(start_key).and_then(Value::as_f64),
                end: container.get(end_key).and_then(Value::as_f64),
                min: *min,
                max: *max,
            },
            FieldKind::BoundedSlider { min, max, step } => FieldView::Slider {
                key,
                label,
                value: value.as_f64(),
                min: *min,
                max: *max,
                step: *step,
            },
            FieldKind::FreeText => FieldView::TextInput {
                key,
                label,
                value: value.as_str().unwrap_or_default().to_string(),
            },
            FieldKind::FreeTextRules => FieldView::TextLines {
                key,
                label,
                lines: strings(&value),
            },
            FieldKind::JsonMap => FieldView::JsonEditor {
                key,
                label,
                text: serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
            },
            FieldKind::NestedGroup { fields } => {
                let inner = value.as_object().cloned().unwrap_or_default();
                FieldView::Group {
                    key,
                    label,
                    children: fields.iter().map(|f| f.render(&inner, columns)).collect(),
                }
            }
        }
    }
}

impl CheckConfigModel {
    /// Views for every field the registry knows, in catalog order.
    ///
    /// Unknown keys in the model are not rendered.
    #[must_use]
    pub fn render(&self, registry: &CheckSchemaRegistry, columns: &ColumnSet) -> Vec<FieldView> {
        registry
            .fields()
            .into_iter()
            .map(|spec| spec.render(self.as_map(), columns))
            .collect()
    }
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn non_empty(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_field;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn columns() -> ColumnSet {
        ColumnSet::new(vec!["id".into(), "name".into(), "dob".into()]).unwrap()
    }

    #[test]
    fn checklist_marks_selected_columns_in_upload_order() {
        let spec = builtin_field("mandatory_columns").unwrap();
        let model = CheckConfigModel::new().set_array("mandatory_columns", vec![json!("dob"), json!("id")]);
        let view = spec.render(model.as_map(), &columns());
        let FieldView::ColumnChecklist { options, order, .. } = view else {
            panic!("expected checklist, got {view:?}");
        };
        let selected: Vec<bool> = options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, vec![true, false, true]);
        assert_eq!(order, vec!["dob".to_string(), "id".to_string()]);
    }

    #[test]
    fn empty_single_select_renders_as_none() {
        let spec = builtin_field("id_column").unwrap();
        let view = spec.render(&Map::new(), &columns());
        assert_eq!(
            view,
            FieldView::ColumnDropdown {
                key: "id_column".into(),
                label: "Id Column".into(),
                options: columns().to_vec(),
                selected: None,
                allow_none: true,
            }
        );
    }

    #[test]
    fn group_renders_children_from_its_own_object() {
        let spec = builtin_field("year_filter").unwrap();
        let model = CheckConfigModel::new()
            .set_scalar("date_column", json!("name"))
            .set_nested("year_filter", "date_column", json!("dob"))
            .set_nested("year_filter", "start_year", json!(1990));
        let FieldView::Group { children, .. } = spec.render(model.as_map(), &columns()) else {
            panic!("expected group");
        };
        match &children[0] {
            FieldView::ColumnDropdown { selected, .. } => {
                assert_eq!(selected.as_deref(), Some("dob"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &children[1] {
            FieldView::RangeInputs { start, end, .. } => {
                assert_eq!((*start, *end), (Some(1990.0), None));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn model_render_skips_unknown_keys() {
        let registry = CheckSchemaRegistry::from_catalog(vec![dv_core::responses::CheckCatalogEntry {
            name: "CrossFieldLogicChecker".into(),
            description: String::new(),
            config_fields: vec!["cross_field_rules".into()],
        }]);
        let model = CheckConfigModel::new()
            .set_scalar("emoji_policy", json!("strict"))
            .set_array("cross_field_rules", vec![json!("start <= end")]);
        let views = model.render(&registry, &columns());
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0],
            FieldView::TextLines {
                key: "cross_field_rules".into(),
                label: "Cross Field Rules".into(),
                lines: vec!["start <= end".into()],
            }
        );
    }
}
