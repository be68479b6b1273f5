//! Read-only access to a run's MAF results database.
//!
//! Each run keeps its results in an SQLite store at
//! `<run>/<outDir>/resultsDb_sqlite.db` with (at least) a `metrics` table and
//! a `summarystats` table. The store is opened, both tables are read, and the
//! connection is released; nothing is written back.

use crate::core::{MetricRecord, SummaryStatRecord};
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the results database inside a run's output subdirectory.
pub const RESULTS_DB_FILENAME: &str = "resultsDb_sqlite.db";

/// Errors raised by the result-store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("results store not found at {path}")]
    Missing { path: PathBuf },
    #[error("results store {path} has no `{table}` table")]
    MissingTable { table: &'static str, path: PathBuf },
}

/// Handle on one run's results database.
#[derive(Debug)]
pub struct ResultsDb {
    path: PathBuf,
    conn: Connection,
}

impl ResultsDb {
    /// Resolve the store path for a run and output subdirectory.
    pub fn locate(run: &str, out_dir: &str) -> PathBuf {
        Path::new(run).join(out_dir).join(RESULTS_DB_FILENAME)
    }

    /// Open an existing store read-only. A missing file is fatal: the report
    /// cannot be produced without both of the store's tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(StoreError::Missing { path }.into());
        }
        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("failed to open results store {}", path.display()))?;
        Ok(Self { path, conn })
    }

    /// Load the `metrics` table.
    pub fn load_metrics(&self) -> Result<Vec<MetricRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT metricId, metricName, metricMetadata, slicerName FROM metrics")
            .map_err(|e| self.table_error("metrics", e))?;
        let rows = stmt.query_map([], |row| {
            // metricMetadata is NULL for unqualified metrics
            let metadata: Option<String> = row.get(2)?;
            Ok(MetricRecord {
                metric_id: row.get(0)?,
                metric_name: row.get(1)?,
                metric_metadata: metadata.unwrap_or_default(),
                slicer_name: row.get(3)?,
            })
        })?;

        let mut metrics = Vec::new();
        for row in rows {
            metrics.push(row.with_context(|| {
                format!("bad row in metrics table of {}", self.path.display())
            })?);
        }
        Ok(metrics)
    }

    /// Load the `summarystats` table.
    pub fn load_summary_stats(&self) -> Result<Vec<SummaryStatRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT metricId, summaryName, summaryValue FROM summarystats")
            .map_err(|e| self.table_error("summarystats", e))?;
        let rows = stmt.query_map([], |row| {
            Ok(SummaryStatRecord {
                metric_id: row.get(0)?,
                summary_name: row.get(1)?,
                summary_value: row.get(2)?,
            })
        })?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row.with_context(|| {
                format!("bad row in summarystats table of {}", self.path.display())
            })?);
        }
        Ok(stats)
    }

    fn table_error(&self, table: &'static str, e: rusqlite::Error) -> anyhow::Error {
        match &e {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("no such table") => {
                StoreError::MissingTable {
                    table,
                    path: self.path.clone(),
                }
                .into()
            }
            _ => anyhow::Error::new(e)
                .context(format!("failed to read {} from {}", table, self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture_db(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE metrics (
                 metricId INTEGER PRIMARY KEY,
                 metricName TEXT,
                 metricMetadata TEXT,
                 slicerName TEXT,
                 sqlConstraint TEXT
             );
             CREATE TABLE summarystats (
                 statId INTEGER PRIMARY KEY,
                 metricId INTEGER,
                 summaryName TEXT,
                 summaryValue REAL
             );
             INSERT INTO metrics (metricId, metricName, metricMetadata, slicerName)
                 VALUES (1, 'NVisits', 'All Visits', 'UniSlicer');
             INSERT INTO metrics (metricId, metricName, metricMetadata, slicerName)
                 VALUES (2, 'Median airmass', NULL, 'UniSlicer');
             INSERT INTO summarystats (metricId, summaryName, summaryValue)
                 VALUES (1, 'Count', 1000.0);",
        )
        .unwrap();
    }

    #[test]
    fn locate_joins_run_outdir_and_store_name() {
        let path = ResultsDb::locate("baseline2018a", "sci_perf");
        assert_eq!(
            path,
            Path::new("baseline2018a")
                .join("sci_perf")
                .join("resultsDb_sqlite.db")
        );
    }

    #[test]
    fn open_missing_store_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResultsDb::open(dir.path().join("nope.db")).unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());
    }

    #[test]
    fn loads_metrics_with_null_metadata_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RESULTS_DB_FILENAME);
        fixture_db(&path);

        let db = ResultsDb::open(&path).unwrap();
        let metrics = db.load_metrics().unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].metric_name, "NVisits");
        assert_eq!(metrics[1].metric_metadata, "");
    }

    #[test]
    fn loads_summary_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RESULTS_DB_FILENAME);
        fixture_db(&path);

        let db = ResultsDb::open(&path).unwrap();
        let stats = db.load_summary_stats().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].summary_name, "Count");
        assert_eq!(stats[0].summary_value, 1000.0);
    }

    #[test]
    fn missing_table_reports_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE other (x INTEGER);")
            .unwrap();

        let db = ResultsDb::open(&path).unwrap();
        let err = db.load_metrics().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::MissingTable { table: "metrics", .. })
        ));
    }
}
