//! Text rendering of configuration field views.

use std::fmt::Write as _;

use dv_checks::FieldView;

/// One block per field; group children are indented under their group.
#[must_use]
pub fn render(views: &[FieldView]) -> String {
    let mut out = String::new();
    for view in views {
        write_view(&mut out, view, 0);
    }
    if out.is_empty() {
        out.push_str("No checks available.\n");
    }
    out
}

fn write_view(out: &mut String, view: &FieldView, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{} [{}]: ", view.label(), view.key());
    match view {
        FieldView::ColumnChecklist { options, order, .. } => {
            let marks: Vec<String> = options
                .iter()
                .map(|o| format!("[{}] {}", if o.selected { 'x' } else { ' ' }, o.name))
                .collect();
            let _ = writeln!(out, "{}", marks.join("  "));
            if order.len() > 1 {
                let _ = writeln!(out, "{indent}  order: {}", order.join(" → "));
            }
        }
        FieldView::ColumnDropdown {
            options, selected, ..
        } => {
            let _ = writeln!(
                out,
                "{} (from: {})",
                selected.as_deref().unwrap_or("(none)"),
                options.join(", ")
            );
        }
        FieldView::Choice {
            options, selected, ..
        } => {
            let choices: Vec<String> = options
                .iter()
                .map(|o| {
                    if selected.as_deref() == Some(o.value.as_str()) {
                        format!("({}) {}", o.value, o.label)
                    } else {
                        o.value.clone()
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", choices.join(" | "));
        }
        FieldView::NumberInput { value, min, max, .. } | FieldView::Slider { value, min, max, .. } => {
            let _ = writeln!(out, "{} ({min}..{max})", number(*value));
        }
        FieldView::RangeInputs {
            start_key,
            end_key,
            start,
            end,
            min,
            max,
            ..
        } => {
            let _ = writeln!(
                out,
                "{start_key}={} {end_key}={} ({min}..{max})",
                number(*start),
                number(*end)
            );
        }
        FieldView::TextLines { lines, .. } => {
            if lines.is_empty() {
                let _ = writeln!(out, "(none)");
            } else {
                let _ = writeln!(out);
                for line in lines {
                    let _ = writeln!(out, "{indent}  - {line:?}");
                }
            }
        }
        FieldView::JsonEditor { text, .. } => {
            let _ = writeln!(out, "{text}");
        }
        FieldView::TextInput { value, .. } => {
            let _ = writeln!(out, "{}", if value.is_empty() { "(empty)" } else { value.as_str() });
        }
        FieldView::Group { children, .. } => {
            let _ = writeln!(out);
            for child in children {
                write_view(out, child, depth + 1);
            }
        }
    }
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_checks::ColumnOption;

    #[test]
    fn checklists_mark_selected_columns() {
        let view = FieldView::ColumnChecklist {
            key: "mandatory_columns".into(),
            label: "Mandatory Columns".into(),
            options: vec![
                ColumnOption { name: "id".into(), selected: true },
                ColumnOption { name: "name".into(), selected: false },
            ],
            order: vec!["id".into()],
        };
        let out = render(&[view]);
        assert_eq!(out, "Mandatory Columns [mandatory_columns]: [x] id  [ ] name\n");
    }

    #[test]
    fn groups_indent_children() {
        let view = FieldView::Group {
            key: "unique_id_generation".into(),
            label: "Unique Id Generation".into(),
            children: vec![FieldView::TextInput {
                key: "id_column".into(),
                label: "New ID Column Name".into(),
                value: String::new(),
            }],
        };
        let out = render(&[view]);
        assert!(out.contains("\n  New ID Column Name [id_column]: (empty)\n"));
    }

    #[test]
    fn empty_registry_says_so() {
        assert_eq!(render(&[]), "No checks available.\n");
    }
}
