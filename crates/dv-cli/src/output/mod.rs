use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod dashboard;
pub mod form;
pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print pending workflow notifications to stderr.
pub fn notifications(notes: &[dv_workflow::Notification], quiet: bool) {
    for note in notes {
        if quiet && note.severity != dv_workflow::Severity::Error {
            continue;
        }
        eprintln!("[{}] {}", note.severity, note.message);
    }
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    Ok(match serde_json::to_value(value)? {
        Value::Array(items) => render_rows(&items, options),
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect();
            table::render(&["field", "value"], &rows, options)
        }
        scalar => cell(&scalar),
    })
}

/// Arrays of objects become one row per object, with columns in
/// first-seen key order.
fn render_rows(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(none)");
    }
    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![cell(item)]).collect();
        return table::render(&["value"], &rows, options);
    }

    let mut headers: Vec<&str> = Vec::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| "-".to_string(), cell))
                .collect()
        })
        .collect();
    table::render(&headers, &rows, options)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        nested => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&Row { id: 7, name: "Census" }, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["id"], 7);
    }

    #[test]
    fn raw_render_is_single_line() {
        let out = render(&Row { id: 7, name: "Census" }, OutputFormat::Raw).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn arrays_render_one_row_per_item_in_key_order() {
        let rows = vec![Row { id: 1, name: "a" }, Row { id: 22, name: "bb" }];
        let out = render(&rows, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("id"));
        assert!(lines[0].contains("name"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn empty_arrays_say_so() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(none)");
    }
}
