//! Cross-run metric alignment, diff computation, and metric filtering.

pub mod aligner;
pub mod diff;
pub mod filter;

pub use aligner::{align_metrics, RunTables};
pub use diff::{apply_threshold, compute_diffs, merge_runs};
pub use filter::filter_critical;
