//! CLI command implementations.
//!
//! The tool has a single operation: build the cross-run summary-stat diff and
//! render it. `report` holds the I/O shell; the pure table transformations
//! live in `crate::comparison`.

pub mod report;

pub use report::{handle_report, summary_diff_report, ReportConfig};
