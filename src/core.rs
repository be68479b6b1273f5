//! Domain types shared across the comparison pipeline.
//!
//! A metric is identified across runs by the triple (name, metadata, slicer).
//! The integer ids stored in each run's results database are local foreign
//! keys between the `metrics` and `summarystats` tables and are never
//! compared between runs.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Cross-run identity of a metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricKey {
    pub metric_name: String,
    pub metric_metadata: String,
    pub slicer_name: String,
}

impl MetricKey {
    /// Display name used by the report and the critical-metric whitelist:
    /// `"{metricName} {metricMetadata} {summaryName}"`.
    pub fn full_name(&self, summary_name: &str) -> String {
        format!(
            "{} {} {}",
            self.metric_name, self.metric_metadata, summary_name
        )
    }
}

/// One row of a run's `metrics` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    /// Run-local id, foreign key into that run's `summarystats` table.
    pub metric_id: i64,
    pub metric_name: String,
    pub metric_metadata: String,
    pub slicer_name: String,
}

impl MetricRecord {
    pub fn key(&self) -> MetricKey {
        MetricKey {
            metric_name: self.metric_name.clone(),
            metric_metadata: self.metric_metadata.clone(),
            slicer_name: self.slicer_name.clone(),
        }
    }
}

/// One row of a run's `summarystats` table: a scalar reduction of a metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatRecord {
    pub metric_id: i64,
    pub summary_name: String,
    pub summary_value: f64,
}

/// A baseline metric matched with a comparison-run metric sharing its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedMetricPair {
    pub key: MetricKey,
    pub baseline_id: i64,
    pub comparison_id: i64,
}

/// One output row of the diff for a single comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRow {
    pub key: MetricKey,
    pub summary_name: String,
    pub baseline_value: f64,
    pub comparison_value: f64,
    /// `None` when the comparison value is zero (see [`percent_diff`]).
    pub percent_diff: Option<f64>,
}

/// All diff rows for one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDiffTable {
    pub run: String,
    pub rows: Vec<DiffRow>,
}

/// Absolute percent difference between a baseline and a comparison value.
///
/// The denominator is the *comparison* run's value, matching the behavior of
/// the upstream report generator (its documentation claims a baseline
/// denominator; the computation has always divided by the comparison value,
/// and we preserve the computation). Returns `None` when the comparison value
/// is zero instead of producing an infinity.
pub fn percent_diff(baseline: f64, comparison: f64) -> Option<f64> {
    if comparison == 0.0 {
        None
    } else {
        Some(((comparison - baseline) / comparison * 100.0).abs())
    }
}

/// Column names shared by every report, in output order.
pub const IDENTITY_COLUMNS: [&str; 5] = [
    "metricName",
    "metricMetadata",
    "summaryName",
    "slicerName",
    "fullName",
];

/// One row of the final wide table: a metric/summary identity plus its value
/// in the baseline and in every comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    pub key: MetricKey,
    pub summary_name: String,
    pub full_name: String,
    pub baseline_value: f64,
    /// Comparison values, parallel to [`WideReportTable::runs`].
    pub values: Vec<f64>,
    /// Percent diffs, parallel to [`WideReportTable::runs`].
    pub percent_diffs: Vec<Option<f64>>,
}

/// The merged report table: one row per (identity, summary name) combination
/// present and value-matched in the baseline and every comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct WideReportTable {
    pub baseline_run: String,
    pub runs: Vec<String>,
    pub rows: Vec<WideRow>,
}

impl WideReportTable {
    /// Output column order: identity columns, baseline value, one value
    /// column per run, then one `%_<run>` column per run.
    pub fn column_names(&self) -> Vec<String> {
        let mut cols: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
        cols.push(self.baseline_run.clone());
        for run in &self.runs {
            cols.push(run.clone());
        }
        for run in &self.runs {
            cols.push(format!("%_{run}"));
        }
        cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stack another table's rows under this one (`--combine`). Both tables
    /// must carry the same baseline and comparison run columns.
    pub fn append(&mut self, other: WideReportTable) -> Result<()> {
        anyhow::ensure!(
            self.baseline_run == other.baseline_run && self.runs == other.runs,
            "cannot combine tables with different run columns ({} vs {})",
            self.runs.join(","),
            other.runs.join(",")
        );
        self.rows.extend(other.rows);
        Ok(())
    }
}
