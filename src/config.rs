//! Explicit configuration for the comparison pipeline.
//!
//! The upstream report generator kept its excluded metric families and its
//! curated "critical" metric list as function-local constants. Here they are
//! configuration structs with the same lists as documented defaults, so
//! callers can substitute their own.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Metric and summary-stat categories excluded from comparison.
///
/// Matching is case-sensitive substring containment on the metric or summary
/// name. The defaults remove high-cardinality or noisy families (histograms,
/// extreme-value and spread statistics) that are not meaningful in a
/// side-by-side diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_metric_denylist")]
    pub metric_denylist: Vec<String>,
    #[serde(default = "default_summary_denylist")]
    pub summary_denylist: Vec<String>,
}

fn default_metric_denylist() -> Vec<String> {
    ["Histogram", "3Sigma", "%ile", "Rms", "Min", "Max"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_summary_denylist() -> Vec<String> {
    ["3Sigma", "Rms", "Min", "Max", "RobustRms", "%ile"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            metric_denylist: default_metric_denylist(),
            summary_denylist: default_summary_denylist(),
        }
    }
}

impl FilterConfig {
    pub fn keep_metric(&self, metric_name: &str) -> bool {
        !self
            .metric_denylist
            .iter()
            .any(|s| metric_name.contains(s.as_str()))
    }

    pub fn keep_summary(&self, summary_name: &str) -> bool {
        !self
            .summary_denylist
            .iter()
            .any(|s| summary_name.contains(s.as_str()))
    }
}

/// Whitelist of metrics considered critical for survey performance, keyed by
/// full metric name (`"{metricName} {metricMetadata} {summaryName}"`).
///
/// Membership is exact: no partial or fuzzy matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalMetrics {
    names: HashSet<String>,
}

impl Default for CriticalMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_METRICS.iter().map(|s| s.to_string()))
    }
}

/// The built-in curated list: the "astronomer's eye" metrics used when no
/// explicit whitelist is supplied.
pub const DEFAULT_CRITICAL_METRICS: [&str; 15] = [
    "NVisits All Visits Count",
    "NVisits Per night Median",
    "Nights with observations All Visits (days)",
    "Total effective time of survey All Visits (days)",
    "fO All Visits (non-dithered) fOArea: Nvisits (#)",
    "fO All Visits (non-dithered) fONv: Area (sqdeg)",
    "OpenShutterFraction Per night Median",
    "Median slewTime All Visits Identity",
    "Median normairmass all band, all props Identity",
    "NVisits WFD Fraction of total",
    "Filter Changes Per night Mean",
    "Median airmass r band, WFD Median",
    "Median airmass i band, WFD Median",
    "Fraction of revisits faster than 30.0 minutes All Visits (non-dithered) Area (sq deg)",
    "Fraction of revisits faster than 30.0 minutes All Visits (non-dithered) Median",
];

impl CriticalMetrics {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.names.contains(full_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_denylist_drops_noisy_metric_families() {
        let config = FilterConfig::default();
        assert!(!config.keep_metric("NVisits Histogram"));
        assert!(!config.keep_metric("3Sigma depth"));
        assert!(!config.keep_metric("Coadded m5 25%ile"));
        assert!(!config.keep_metric("Rms airmass"));
        assert!(!config.keep_metric("Min seeing"));
        assert!(!config.keep_metric("Max altitude"));
        assert!(config.keep_metric("NVisits"));
        assert!(config.keep_metric("Median airmass"));
    }

    #[test]
    fn denylist_matching_is_case_sensitive() {
        let config = FilterConfig::default();
        // lowercase "min" is not in the denylist
        assert!(config.keep_metric("Median normairmass"));
        assert!(config.keep_summary("minutes"));
    }

    #[test]
    fn default_summary_denylist_includes_robust_rms() {
        let config = FilterConfig::default();
        assert!(!config.keep_summary("RobustRms"));
        assert!(!config.keep_summary("Rms"));
        assert!(config.keep_summary("Median"));
        assert!(config.keep_summary("Count"));
    }

    #[test]
    fn critical_metrics_membership_is_exact() {
        let critical = CriticalMetrics::default();
        assert_eq!(critical.len(), 15);
        assert!(critical.contains("NVisits All Visits Count"));
        // prefix of a listed name is not a match
        assert!(!critical.contains("NVisits All Visits"));
        assert!(!critical.contains("NVisits All Visits Count "));
    }

    #[test]
    fn custom_whitelist_replaces_default() {
        let critical = CriticalMetrics::new(vec!["A B C".to_string()]);
        assert!(critical.contains("A B C"));
        assert!(!critical.contains("NVisits All Visits Count"));
    }
}
