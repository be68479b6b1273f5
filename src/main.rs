use anyhow::Result;
use clap::Parser;
use maf_compare::cli::Cli;
use maf_compare::commands::report::{handle_report, ReportConfig};
use maf_compare::config::{CriticalMetrics, FilterConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    handle_report(build_report_config(cli))
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::from_default_env()
        .filter_level(log_level(verbosity))
        .init();
}

// Pure function to map -v occurrences to a log level
fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

// Pure function to build the report configuration from CLI arguments
fn build_report_config(cli: Cli) -> ReportConfig {
    ReportConfig {
        baseline_run: cli.baseline_run,
        out_dirs: cli.out_dirs,
        html_out: cli.html_out,
        runlist: cli.runlist,
        show_page: cli.show_page,
        combine: cli.combine,
        combo_html: cli.combo_html,
        filter: cli.filter,
        savedf: cli.savedf,
        percent_threshold: cli.percent_threshold,
        filter_config: FilterConfig::default(),
        critical_metrics: CriticalMetrics::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_maps_verbosity() {
        assert_eq!(log_level(0), log::LevelFilter::Warn);
        assert_eq!(log_level(1), log::LevelFilter::Info);
        assert_eq!(log_level(2), log::LevelFilter::Debug);
        assert_eq!(log_level(5), log::LevelFilter::Debug);
    }

    #[test]
    fn report_config_carries_cli_fields() {
        let cli = Cli::parse_from([
            "maf-compare",
            "base",
            "--out-dirs",
            "sci_perf",
            "--html-out",
            "diff.html",
            "--runlist",
            "run_a",
        ]);
        let config = build_report_config(cli);
        assert_eq!(config.baseline_run, "base");
        assert_eq!(config.out_dirs, vec!["sci_perf"]);
        assert_eq!(config.runlist, vec!["run_a"]);
    }
}
