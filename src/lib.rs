// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod output;
pub mod store;

// Re-export commonly used types
pub use crate::comparison::{
    align_metrics, apply_threshold, compute_diffs, filter_critical, merge_runs, RunTables,
};
pub use crate::config::{CriticalMetrics, FilterConfig, DEFAULT_CRITICAL_METRICS};
pub use crate::core::{
    percent_diff, AlignedMetricPair, DiffRow, MetricKey, MetricRecord, RunDiffTable,
    SummaryStatRecord, WideReportTable, WideRow, IDENTITY_COLUMNS,
};
pub use crate::output::{write_csv, HtmlReportWriter};
pub use crate::store::{ResultsDb, StoreError, RESULTS_DB_FILENAME};
