//! Whitelist filtering of the final wide table.

use crate::config::CriticalMetrics;
use crate::core::WideReportTable;

/// Keep only rows whose `full_name` is in the whitelist. Exact membership,
/// and idempotent: filtering an already-filtered table is a no-op.
pub fn filter_critical(mut table: WideReportTable, critical: &CriticalMetrics) -> WideReportTable {
    table.rows.retain(|row| critical.contains(&row.full_name));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MetricKey, WideRow};
    use pretty_assertions::assert_eq;

    fn row(name: &str, metadata: &str, summary: &str) -> WideRow {
        let key = MetricKey {
            metric_name: name.to_string(),
            metric_metadata: metadata.to_string(),
            slicer_name: "UniSlicer".to_string(),
        };
        WideRow {
            full_name: key.full_name(summary),
            key,
            summary_name: summary.to_string(),
            baseline_value: 1.0,
            values: vec![2.0],
            percent_diffs: vec![Some(50.0)],
        }
    }

    fn table(rows: Vec<WideRow>) -> WideReportTable {
        WideReportTable {
            baseline_run: "base".to_string(),
            runs: vec!["run_a".to_string()],
            rows,
        }
    }

    #[test]
    fn keeps_only_whitelisted_full_names() {
        let t = table(vec![
            row("NVisits", "All Visits", "Count"),
            row("Slewtime", "All Visits", "Median"),
        ]);
        let filtered = filter_critical(t, &CriticalMetrics::default());
        assert_eq!(filtered.rows.len(), 1);
        assert_eq!(filtered.rows[0].full_name, "NVisits All Visits Count");
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = table(vec![
            row("NVisits", "All Visits", "Count"),
            row("NVisits", "Per night", "Median"),
            row("Slewtime", "All Visits", "Median"),
        ]);
        let critical = CriticalMetrics::default();
        let once = filter_critical(t, &critical);
        let twice = filter_critical(once.clone(), &critical);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_partial_matching() {
        // substring of a whitelisted name must not match
        let t = table(vec![row("NVisits", "All Visits", "Coun")]);
        let filtered = filter_critical(t, &CriticalMetrics::default());
        assert!(filtered.rows.is_empty());
    }
}
