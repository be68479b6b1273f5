//! Orchestration of one report invocation.
//!
//! I/O shell around the pure comparison pipeline: opens the per-run result
//! stores, runs alignment and diff computation, and hands the final table to
//! the HTML and CSV writers.

use crate::comparison::{
    align_metrics, apply_threshold, compute_diffs, filter_critical, merge_runs, RunTables,
};
use crate::config::{CriticalMetrics, FilterConfig};
use crate::core::WideReportTable;
use crate::output::{write_csv, HtmlReportWriter};
use crate::store::ResultsDb;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Inputs for one report invocation, mirroring the CLI surface.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub baseline_run: String,
    pub out_dirs: Vec<String>,
    pub html_out: Vec<String>,
    pub runlist: Vec<String>,
    pub show_page: bool,
    pub combine: bool,
    pub combo_html: Option<String>,
    pub filter: bool,
    pub savedf: Option<PathBuf>,
    pub percent_threshold: Option<f64>,
    pub filter_config: FilterConfig,
    pub critical_metrics: CriticalMetrics,
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.runlist.is_empty(), "--runlist must name at least one run");
        anyhow::ensure!(
            !self.out_dirs.is_empty(),
            "--out-dirs must name at least one subdirectory"
        );
        if self.combine {
            anyhow::ensure!(
                self.combo_html.is_some(),
                "--combo-html is required with --combine"
            );
        } else {
            anyhow::ensure!(
                self.html_out.len() == self.out_dirs.len(),
                "--html-out must name one file per --out-dirs entry ({} given, {} needed)",
                self.html_out.len(),
                self.out_dirs.len()
            );
        }
        Ok(())
    }
}

/// Run the whole invocation: one table per out-dir, optionally combined,
/// rendered to HTML and optionally exported as CSV.
pub fn handle_report(config: ReportConfig) -> Result<()> {
    config.validate()?;

    let mut tables = Vec::with_capacity(config.out_dirs.len());
    for out_dir in &config.out_dirs {
        let mut table = summary_diff_report(
            &config.baseline_run,
            out_dir,
            &config.runlist,
            &config.filter_config,
            config.percent_threshold,
        )?;
        if config.filter {
            table = filter_critical(table, &config.critical_metrics);
        }
        log::info!("{}: {} rows after merge", out_dir, table.rows.len());
        tables.push(table);
    }

    if config.combine {
        let combo_html = config
            .combo_html
            .as_deref()
            .context("--combo-html is required with --combine")?;

        let mut tables = tables.into_iter();
        let mut combined = tables
            .next()
            .context("no out-dirs produced a table to combine")?;
        for table in tables {
            combined.append(table)?;
        }

        write_html_report(&combined, Path::new(combo_html))?;
        if let Some(path) = &config.savedf {
            export_csv(&combined, path)?;
        }
        if config.show_page {
            open_in_browser(Path::new(combo_html));
        }
    } else {
        for ((table, html_out), out_dir) in
            tables.iter().zip(&config.html_out).zip(&config.out_dirs)
        {
            write_html_report(table, Path::new(html_out))?;
            if let Some(path) = &config.savedf {
                export_csv(table, &savedf_path(path, out_dir, config.out_dirs.len()))?;
            }
            if config.show_page {
                open_in_browser(Path::new(html_out));
            }
        }
    }

    Ok(())
}

/// Build the wide diff table for one output subdirectory: load and filter the
/// baseline tables once, then align and diff each comparison run against them
/// and merge the per-run results.
pub fn summary_diff_report(
    baseline_run: &str,
    out_dir: &str,
    runlist: &[String],
    filter_config: &FilterConfig,
    percent_threshold: Option<f64>,
) -> Result<WideReportTable> {
    let baseline = load_run_tables(baseline_run, out_dir, filter_config)?;

    let mut per_run = Vec::with_capacity(runlist.len());
    for run in runlist {
        let comparison = load_run_tables(run, out_dir, filter_config)?;
        let pairs = align_metrics(&baseline, &comparison);
        let mut diff = compute_diffs(run, &pairs, &baseline.summary_stats, &comparison.summary_stats);
        if let Some(threshold) = percent_threshold {
            diff = apply_threshold(diff, threshold);
        }
        per_run.push(diff);
    }

    merge_runs(baseline_run, per_run)
}

fn load_run_tables(run: &str, out_dir: &str, config: &FilterConfig) -> Result<RunTables> {
    let path = ResultsDb::locate(run, out_dir);
    let db = ResultsDb::open(&path)?;
    let metrics = db.load_metrics()?;
    let summary_stats = db.load_summary_stats()?;
    // db dropped here; the store is released once its tables are read
    Ok(RunTables::filtered(
        run.to_string(),
        metrics,
        summary_stats,
        config,
    ))
}

fn write_html_report(table: &WideReportTable, path: &Path) -> Result<()> {
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "summary diff report".to_string());

    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    let mut writer = HtmlReportWriter::new(BufWriter::new(file));
    writer.write_report(table, &title)?;
    log::info!("wrote report to {}", path.display());
    Ok(())
}

fn export_csv(table: &WideReportTable, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create CSV file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, table)?;
    log::info!("saved table to {}", path.display());
    Ok(())
}

/// CSV destination for one out-dir's table. With several out-dirs and no
/// `--combine`, the out-dir name is suffixed to the path stem so the exports
/// do not clobber each other.
fn savedf_path(path: &Path, out_dir: &str, out_dir_count: usize) -> PathBuf {
    if out_dir_count == 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_{out_dir}{extension}"))
}

/// Best-effort launch of the platform's default browser; a failure is logged,
/// never fatal.
fn open_in_browser(path: &Path) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let opener = "xdg-open";

    match std::process::Command::new(opener).arg(path).spawn() {
        Ok(_) => log::debug!("opened {} with {}", path.display(), opener),
        Err(e) => log::warn!("could not open {} in a browser: {}", path.display(), e),
    }
}
