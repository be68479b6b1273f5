//! Diff computation for aligned metrics and the cross-run merge.
//!
//! Summary values are paired within each run by (metric id, summary name).
//! The upstream generator zipped multi-valued metrics positionally, which
//! silently misattributes values when the two stores list a metric's summary
//! stats in different orders; the explicit key join removes that dependency
//! on row order.

use crate::core::{
    percent_diff, DiffRow, MetricKey, RunDiffTable, SummaryStatRecord, WideReportTable, WideRow,
};
use crate::core::AlignedMetricPair;
use anyhow::Result;
use std::collections::HashMap;

/// Compute one [`DiffRow`] per (aligned pair, shared summary name).
///
/// Baseline summary names with no counterpart under the comparison metric are
/// skipped; a pair with no surviving baseline summary rows contributes
/// nothing.
pub fn compute_diffs(
    run: &str,
    pairs: &[AlignedMetricPair],
    baseline_stats: &[SummaryStatRecord],
    comparison_stats: &[SummaryStatRecord],
) -> RunDiffTable {
    let baseline_by_id = index_by_metric_id(baseline_stats);
    let comparison_by_id = index_by_metric_id(comparison_stats);

    let mut rows = Vec::new();
    for pair in pairs {
        let Some(base_rows) = baseline_by_id.get(&pair.baseline_id) else {
            continue;
        };
        let comp_rows: &[&SummaryStatRecord] = comparison_by_id
            .get(&pair.comparison_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        for base in base_rows {
            let Some(comp) = comp_rows
                .iter()
                .find(|c| c.summary_name == base.summary_name)
            else {
                continue;
            };

            let pct = percent_diff(base.summary_value, comp.summary_value);
            if pct.is_none() {
                log::warn!(
                    "percent diff undefined for `{}` in {}: comparison value is zero",
                    pair.key.full_name(&base.summary_name),
                    run
                );
            }

            rows.push(DiffRow {
                key: pair.key.clone(),
                summary_name: base.summary_name.clone(),
                baseline_value: base.summary_value,
                comparison_value: comp.summary_value,
                percent_diff: pct,
            });
        }
    }

    RunDiffTable {
        run: run.to_string(),
        rows,
    }
}

fn index_by_metric_id(stats: &[SummaryStatRecord]) -> HashMap<i64, Vec<&SummaryStatRecord>> {
    let mut by_id: HashMap<i64, Vec<&SummaryStatRecord>> = HashMap::new();
    for s in stats {
        by_id.entry(s.metric_id).or_default().push(s);
    }
    by_id
}

/// Keep only rows whose percent diff is defined and at or above `threshold`.
pub fn apply_threshold(mut table: RunDiffTable, threshold: f64) -> RunDiffTable {
    table
        .rows
        .retain(|r| r.percent_diff.is_some_and(|p| p >= threshold));
    table
}

#[derive(Hash, PartialEq, Eq)]
struct MergeKey {
    key: MetricKey,
    summary_name: String,
    // bit pattern, so the baseline value participates in an exact equi-join
    baseline_bits: u64,
}

/// Fold per-run diff tables into one wide table with an inner join on
/// (identity, summary name, baseline value), so only combinations present and
/// value-matched in every comparison run survive. Computes `full_name` on the
/// result. Row order follows the first run's table.
pub fn merge_runs(baseline_run: &str, tables: Vec<RunDiffTable>) -> Result<WideReportTable> {
    anyhow::ensure!(!tables.is_empty(), "no comparison runs to merge");

    let mut runs: Vec<String> = Vec::with_capacity(tables.len());
    let mut rows: Vec<WideRow> = Vec::new();

    for (i, table) in tables.into_iter().enumerate() {
        let RunDiffTable { run, rows: diff_rows } = table;

        if i == 0 {
            rows = diff_rows
                .into_iter()
                .map(|r| WideRow {
                    full_name: String::new(),
                    key: r.key,
                    summary_name: r.summary_name,
                    baseline_value: r.baseline_value,
                    values: vec![r.comparison_value],
                    percent_diffs: vec![r.percent_diff],
                })
                .collect();
        } else {
            let mut index: HashMap<MergeKey, (f64, Option<f64>)> =
                HashMap::with_capacity(diff_rows.len());
            for r in diff_rows {
                index.insert(
                    MergeKey {
                        key: r.key,
                        summary_name: r.summary_name,
                        baseline_bits: r.baseline_value.to_bits(),
                    },
                    (r.comparison_value, r.percent_diff),
                );
            }

            rows = rows
                .into_iter()
                .filter_map(|mut row| {
                    let lookup = MergeKey {
                        key: row.key.clone(),
                        summary_name: row.summary_name.clone(),
                        baseline_bits: row.baseline_value.to_bits(),
                    };
                    index.get(&lookup).map(|&(value, pct)| {
                        row.values.push(value);
                        row.percent_diffs.push(pct);
                        row
                    })
                })
                .collect();
        }

        runs.push(run);
    }

    for row in &mut rows {
        row.full_name = row.key.full_name(&row.summary_name);
    }

    Ok(WideReportTable {
        baseline_run: baseline_run.to_string(),
        runs,
        rows,
    })
}
