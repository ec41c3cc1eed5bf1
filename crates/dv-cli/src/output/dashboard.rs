//! Text rendering of the run summary dashboard.

use std::fmt::Write as _;

use dv_workflow::SummaryView;

/// Full bar length in characters at 100%.
const BAR_CELLS: usize = 40;

#[must_use]
pub fn render(view: &SummaryView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Run at {}", view.timestamp);
    let _ = writeln!(
        out,
        "{} columns, {} preview rows, {} issues",
        view.column_count, view.preview_row_count, view.total_issues
    );

    let name_width = view.rows.iter().map(|r| r.check.chars().count()).max().unwrap_or(0);
    for row in &view.rows {
        let cells = usize::from(row.bar_width) * BAR_CELLS / 100;
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>6}  {}",
            row.check,
            row.issues,
            "█".repeat(cells)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_workflow::SummaryRow;

    #[test]
    fn bars_scale_to_the_widest_check() {
        let view = SummaryView {
            timestamp: "2025-05-01T12:00:00Z".into(),
            column_count: 3,
            preview_row_count: 5,
            total_issues: 15,
            rows: vec![
                SummaryRow { check: "a".into(), issues: 5, bar_width: 50 },
                SummaryRow { check: "bb".into(), issues: 10, bar_width: 100 },
            ],
        };
        let out = render(&view);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "3 columns, 5 preview rows, 15 issues");
        assert_eq!(lines[2].matches('█').count(), 20);
        assert_eq!(lines[3].matches('█').count(), 40);
    }
}
