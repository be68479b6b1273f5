use clap::Parser;
use std::path::PathBuf;

/// Create an interactive HTML table comparing the MAF summary statistics of a
/// list of runs against a baseline run.
#[derive(Parser, Debug)]
#[command(name = "maf-compare")]
#[command(
    about = "Compare MAF summary statistics across survey simulation runs",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Baseline run for comparison
    pub baseline_run: String,

    /// Subdirectories containing the MAF results database
    #[arg(long = "out-dirs", visible_alias = "outDirs", num_args = 1.., required = true)]
    pub out_dirs: Vec<String>,

    /// Output HTML file names, one per out-dir (ignored with --combine)
    #[arg(long = "html-out", visible_alias = "htmlOut", num_args = 1..)]
    pub html_out: Vec<String>,

    /// Comparison run identifiers, separated by spaces
    #[arg(long, num_args = 1.., required = true)]
    pub runlist: Vec<String>,

    /// Automatically open each rendered report in the default browser
    #[arg(long = "show-page", visible_alias = "show_page")]
    pub show_page: bool,

    /// Merge all out-dir results into a single report
    #[arg(long)]
    pub combine: bool,

    /// Output HTML file name when --combine is set
    #[arg(long = "combo-html", visible_alias = "comboHtml")]
    pub combo_html: Option<String>,

    /// Restrict the report to the curated list of critical metrics
    #[arg(long)]
    pub filter: bool,

    /// Also export the final table as CSV to this path
    #[arg(long)]
    pub savedf: Option<PathBuf>,

    /// Keep only rows whose percent difference (relative to the comparison
    /// run's value) is at or above this threshold
    #[arg(long = "percent-threshold")]
    pub percent_threshold: Option<f64>,

    /// Increase verbosity (-v: info, -vv: debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
