//! Dashboard aggregates derived from a summary payload.

use dv_core::entities::SummaryPayload;
use serde::Serialize;

/// One bar of the per-check chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub check: String,
    pub issues: u64,
    /// Percentage of the widest bar, `0..=100`.
    pub bar_width: u8,
}

/// Everything the dashboard shows for one run.
///
/// Recomputed from scratch for every payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub timestamp: String,
    pub column_count: usize,
    pub preview_row_count: usize,
    pub total_issues: u64,
    pub rows: Vec<SummaryRow>,
}

impl SummaryView {
    #[must_use]
    pub fn derive(payload: &SummaryPayload, preview_rows: usize) -> Self {
        let counts: Vec<u64> = payload.checks.iter().map(|c| c.issues).collect();
        let rows = payload
            .checks
            .iter()
            .zip(bar_widths(&counts))
            .map(|(check, bar_width)| SummaryRow {
                check: check.check.clone(),
                issues: check.issues,
                bar_width,
            })
            .collect();
        Self {
            timestamp: payload.timestamp.clone(),
            column_count: payload.columns.len(),
            preview_row_count: preview_rows,
            total_issues: payload.total_issues(),
            rows,
        }
    }
}

/// `round(issues / max(1, max_issues) * 100)` for each count.
///
/// Halves round up. Every count equal to the maximum gets 100.
#[must_use]
pub fn bar_widths(issues: &[u64]) -> Vec<u8> {
    let max = u128::from(issues.iter().copied().max().unwrap_or(0).max(1));
    issues
        .iter()
        .map(|&count| {
            let width = (u128::from(count) * 200 + max) / (2 * max);
            u8::try_from(width.min(100)).unwrap_or(100)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::entities::CheckIssueCount;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&[5, 10, 0], &[50, 100, 0])]
    #[case(&[0, 0], &[0, 0])]
    #[case(&[7, 7, 3], &[100, 100, 43])]
    #[case(&[1, 3], &[33, 100])]
    #[case(&[1, 200], &[1, 100])]
    #[case(&[], &[])]
    fn widths(#[case] issues: &[u64], #[case] expected: &[u8]) {
        assert_eq!(bar_widths(issues), expected);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        assert_eq!(bar_widths(&[u64::MAX, u64::MAX / 2]), vec![100, 50]);

        let payload = SummaryPayload {
            checks: vec![
                CheckIssueCount { check: "duplicates".into(), issues: u64::MAX },
                CheckIssueCount { check: "outliers".into(), issues: 1 },
            ],
            ..SummaryPayload::default()
        };
        let view = SummaryView::derive(&payload, 0);
        assert_eq!(view.total_issues, u64::MAX);
        assert_eq!(
            view.rows.iter().map(|r| r.bar_width).collect::<Vec<_>>(),
            vec![100, 0]
        );
    }

    #[test]
    fn view_carries_payload_totals() {
        let payload = SummaryPayload {
            timestamp: "2025-05-01T12:00:00Z".into(),
            columns: vec!["id".into(), "name".into(), "dob".into()],
            checks: vec![
                CheckIssueCount { check: "mandatory_columns".into(), issues: 4 },
                CheckIssueCount { check: "special_characters".into(), issues: 8 },
            ],
        };
        let view = SummaryView::derive(&payload, 5);
        assert_eq!(view.column_count, 3);
        assert_eq!(view.preview_row_count, 5);
        assert_eq!(view.total_issues, 12);
        assert_eq!(
            view.rows.iter().map(|r| r.bar_width).collect::<Vec<_>>(),
            vec![50, 100]
        );
    }
}
