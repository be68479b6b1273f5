//! Metric alignment between a baseline run and a comparison run.
//!
//! Alignment is intersection-only: a baseline metric with no identity match
//! in the comparison run is dropped from that run's diff (and therefore from
//! the final merged report). Nothing is fabricated for partial matches.

use crate::config::FilterConfig;
use crate::core::{AlignedMetricPair, MetricKey, MetricRecord, SummaryStatRecord};
use std::collections::{HashMap, HashSet};

/// The filtered `metrics` and `summarystats` tables for one run.
#[derive(Debug, Clone)]
pub struct RunTables {
    pub run: String,
    pub metrics: Vec<MetricRecord>,
    pub summary_stats: Vec<SummaryStatRecord>,
}

impl RunTables {
    /// Apply the category denylists, then drop metrics with no surviving
    /// summary value.
    pub fn filtered(
        run: String,
        metrics: Vec<MetricRecord>,
        summary_stats: Vec<SummaryStatRecord>,
        config: &FilterConfig,
    ) -> Self {
        let summary_stats: Vec<SummaryStatRecord> = summary_stats
            .into_iter()
            .filter(|s| config.keep_summary(&s.summary_name))
            .collect();

        let with_stats: HashSet<i64> = summary_stats.iter().map(|s| s.metric_id).collect();

        let metrics: Vec<MetricRecord> = metrics
            .into_iter()
            .filter(|m| config.keep_metric(&m.metric_name))
            .filter(|m| with_stats.contains(&m.metric_id))
            .collect();

        Self {
            run,
            metrics,
            summary_stats,
        }
    }
}

/// Inner-join baseline metrics to comparison metrics on identity
/// (name, metadata, slicer). Row order follows the baseline table.
pub fn align_metrics(baseline: &RunTables, comparison: &RunTables) -> Vec<AlignedMetricPair> {
    let mut by_key: HashMap<MetricKey, Vec<i64>> = HashMap::new();
    for m in &comparison.metrics {
        by_key.entry(m.key()).or_default().push(m.metric_id);
    }

    let mut pairs = Vec::new();
    let mut unmatched = 0usize;
    for m in &baseline.metrics {
        match by_key.get(&m.key()) {
            Some(ids) => {
                for &comparison_id in ids {
                    pairs.push(AlignedMetricPair {
                        key: m.key(),
                        baseline_id: m.metric_id,
                        comparison_id,
                    });
                }
            }
            None => unmatched += 1,
        }
    }

    if unmatched > 0 {
        log::info!(
            "{} baseline metrics in {} have no identity match in {} and were excluded",
            unmatched,
            baseline.run,
            comparison.run
        );
    }

    pairs
}
