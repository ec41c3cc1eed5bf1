//! Editing a configuration end to end through the public API: catalog load,
//! validated edits, rendering, and the wire format.

use dv_checks::{
    CheckConfigModel, CheckSchemaRegistry, ConfigForm, FieldEdit, FieldPath, FieldView,
    WireConfig,
};
use dv_core::entities::ColumnSet;
use dv_core::responses::CheckCatalogEntry;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn catalog() -> Vec<CheckCatalogEntry> {
    serde_json::from_value(json!([
        {"name": "MandatoryColumnsChecker", "description": "Detects missing required columns",
         "config_fields": ["mandatory_columns"]},
        {"name": "WhitespaceCaseCleaner", "description": "Trims whitespace and unifies case",
         "config_fields": ["text_columns", "case_standardization"]},
        {"name": "IDValidator", "description": "Checks for missing IDs",
         "config_fields": ["id_column"]},
        {"name": "OutlierDetector", "description": "Finds statistical outliers",
         "config_fields": ["outlier_detection"]},
        {"name": "UniqueIDGenerator", "description": "Creates a unique ID column",
         "config_fields": ["unique_id_generation"]},
        {"name": "DuplicatesFromtheData", "description": "Flags fully duplicated rows",
         "config_fields": []},
        {"name": "SentimentScorer", "description": "Not known to this client",
         "config_fields": ["sentiment_columns"]}
    ]))
    .unwrap()
}

fn columns() -> ColumnSet {
    ColumnSet::new(vec!["id".into(), "name".into(), "dob".into()]).unwrap()
}

#[tokio::test]
async fn catalog_loads_and_unknown_fields_are_kept_aside() {
    let registry = CheckSchemaRegistry::load(async { Ok::<_, String>(catalog()) }).await;
    assert_eq!(registry.checks().len(), 7);

    let scorer = registry.check("SentimentScorer").unwrap();
    assert!(scorer.fields.is_empty());
    assert_eq!(scorer.unknown_fields, vec!["sentiment_columns".to_string()]);

    let failed = CheckSchemaRegistry::load(async { Err::<Vec<CheckCatalogEntry>, _>("timeout") }).await;
    assert!(failed.is_empty());
}

#[test]
fn edits_serialize_without_neutral_values_and_rehydrate() {
    let registry = CheckSchemaRegistry::from_catalog(catalog());
    let columns = columns();
    let form = ConfigForm::new(&registry, &columns);
    let concat = FieldPath::nested("unique_id_generation", "columns_to_concat");

    let edits = [
        FieldEdit::ToggleColumn { path: FieldPath::top("mandatory_columns"), column: "id".into(), included: true },
        FieldEdit::SelectAll { path: FieldPath::top("text_columns") },
        FieldEdit::SelectNone { path: FieldPath::top("text_columns") },
        FieldEdit::SetScalar { key: "id_column".into(), value: json!("") },
        FieldEdit::SetNested { group: "outlier_detection".into(), child: "method".into(), value: json!("zscore") },
        FieldEdit::SetNested { group: "unique_id_generation".into(), child: "id_column".into(), value: json!("uid") },
        FieldEdit::ToggleColumn { path: concat.clone(), column: "dob".into(), included: true },
        FieldEdit::ToggleColumn { path: concat.clone(), column: "id".into(), included: true },
        FieldEdit::SetScalar { key: "sentiment_columns".into(), value: json!(["name"]) },
    ];
    let model = edits
        .iter()
        .try_fold(CheckConfigModel::new(), |model, edit| form.apply(&model, edit))
        .unwrap();

    let wire = model.to_wire_format(&registry);
    assert_eq!(
        Value::Object(wire.clone()),
        json!({
            "mandatory_columns": ["id"],
            "outlier_detection": {"method": "zscore"},
            "unique_id_generation": {"id_column": "uid", "columns_to_concat": ["dob", "id"]},
            "sentiment_columns": ["name"],
        })
    );

    let rehydrated = CheckConfigModel::from_wire_format(&wire);
    assert_eq!(rehydrated.to_wire_format(&registry), wire);
    assert_eq!(
        rehydrated.array_strings(&concat),
        vec!["dob".to_string(), "id".to_string()]
    );
}

#[test]
fn rejected_edit_keeps_previous_model() {
    let registry = CheckSchemaRegistry::from_catalog(catalog());
    let columns = columns();
    let form = ConfigForm::new(&registry, &columns);
    let model = CheckConfigModel::new().set_scalar("case_standardization", json!("upper"));

    let result = form.apply(
        &model,
        &FieldEdit::SetScalar { key: "case_standardization".into(), value: json!("shouting") },
    );
    assert!(result.is_err());
    assert_eq!(model.get("case_standardization"), Some(&json!("upper")));
}

#[test]
fn defaults_hydrate_and_render() {
    let registry = CheckSchemaRegistry::from_catalog(catalog());
    let defaults: WireConfig = serde_json::from_value(json!({
        "mandatory_columns": [],
        "id_column": "",
        "outlier_detection": {"columns": [], "method": "iqr", "threshold": 1.5},
        "case_standardization": "upper"
    }))
    .unwrap();
    let model = CheckConfigModel::from_wire_format(&defaults);

    let views = model.render(&registry, &columns());
    let labels: Vec<&str> = views.iter().map(FieldView::label).collect();
    assert_eq!(
        labels,
        vec![
            "Mandatory Columns",
            "Text Columns",
            "Case Standardization",
            "Id Column",
            "Outlier Detection",
            "Unique Id Generation",
        ]
    );
    match &views[2] {
        FieldView::Choice { selected, .. } => assert_eq!(selected.as_deref(), Some("upper")),
        other => panic!("unexpected {other:?}"),
    }
}
