//! Command implementation for the Metasys meter CLI
//!
//! Orchestrates the run: argument validation, logging, parsing the export,
//! optional summarization, staged output and the final report.

use crate::app::services::csv_writer::CsvOutputWriter;
use crate::app::services::metasys_parser::{MetasysParser, ParseStats};
use crate::app::services::summarizer::Summarizer;
use crate::cli::args::Args;
use crate::config::SummaryWindow;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Statistics for one run, reported after the output is written
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    /// Counters from building the measurement table
    pub parse: ParseStats,
    /// Days in the summary, `None` when no summary was requested
    pub summary_days: Option<usize>,
    /// Data rows written to the output file
    pub rows_written: usize,
    pub processing_time: Duration,
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags. A subscriber that is
/// already installed is left in place.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metasys_meter={}", log_level)));

    let installed = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// CLI entry point: logging, then [`execute`], then the report
pub fn run(args: Args) -> Result<RunStats> {
    setup_logging(&args);

    let show_progress = args.show_progress();
    let stats = execute(args)?;

    if show_progress {
        print_report(&stats);
    }
    Ok(stats)
}

/// Run the pipeline without touching global logging state
///
/// Every argument is checked before the input is opened, so a configuration
/// error never leaves an output file behind.
pub fn execute(args: Args) -> Result<RunStats> {
    let start_time = Instant::now();
    debug!("Command line arguments: {:?}", args);

    args.validate().context("Invalid arguments")?;
    let window = args.summary_window()?;
    let site = args.site_config().with_context(|| match &args.config_file {
        Some(path) => format!("Failed to load site configuration {}", path.display()),
        None => "Invalid built-in site configuration".to_string(),
    })?;
    info!("Using site configuration '{}'", site.name);

    let spinner = create_spinner(args.show_progress(), "Reading export...");

    let parser = MetasysParser::new(&site).with_unparsed_columns(args.unparsed_columns());
    let parsed = parser
        .parse_file(&args.input_file)
        .with_context(|| format!("Failed to parse {}", args.input_file.display()))?;
    info!(
        "Built table with {} rows and {} columns",
        parsed.stats.rows, parsed.stats.columns
    );

    let writer = CsvOutputWriter::new(&args.output_file);
    let (rows_written, summary_days) = if args.summarize {
        spinner.set_message("Summarizing daily usage...");
        let summary = Summarizer::new(site.meters.clone(), args.cost)
            .with_window(window)
            .summarize(&parsed.table)
            .context("Failed to summarize meter readings")?;

        spinner.set_message("Writing summary...");
        let rows = writer
            .write_summary(&summary, &window)
            .with_context(|| format!("Failed to write {}", args.output_file.display()))?;
        (rows, Some(summary.rows().len()))
    } else {
        if window != SummaryWindow::all_day() {
            debug!("Time window ({}) only applies to summaries", window);
        }

        spinner.set_message("Writing measurements...");
        let rows = writer
            .write_measurements(&parsed.table)
            .with_context(|| format!("Failed to write {}", args.output_file.display()))?;
        (rows, None)
    };
    spinner.finish_and_clear();

    info!("Wrote {} rows to {}", rows_written, args.output_file.display());

    Ok(RunStats {
        input_file: args.input_file,
        output_file: args.output_file,
        parse: parsed.stats,
        summary_days,
        rows_written,
        processing_time: start_time.elapsed(),
    })
}

/// Spinner for indeterminate stages, hidden in quiet mode
fn create_spinner(visible: bool, message: &str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_report(stats: &RunStats) {
    println!("\n{}", "Metasys export processed".bright_green().bold());
    println!(
        "  {} {}",
        "Input:".bright_cyan(),
        stats.input_file.display()
    );
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        stats.output_file.display()
    );
    println!(
        "  {} {} rows x {} columns",
        "Measurements:".bright_cyan(),
        stats.parse.rows.to_string().bright_white().bold(),
        stats.parse.columns.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Duplicates dropped:".bright_cyan(),
        stats.parse.duplicates_dropped.to_string().bright_white()
    );
    if stats.parse.malformed_values > 0 {
        println!(
            "  {} {} ({:.1}% of readings usable)",
            "Malformed values:".bright_yellow(),
            stats.parse.malformed_values.to_string().bright_yellow().bold(),
            stats.parse.valid_value_rate()
        );
    }
    if stats.parse.unparsed_variables > 0 {
        println!(
            "  {} {}",
            "Unparsed variable names:".bright_yellow(),
            stats.parse.unparsed_variables.to_string().bright_yellow().bold()
        );
    }
    if let Some(days) = stats.summary_days {
        println!(
            "  {} {}",
            "Summary days:".bright_cyan(),
            days.to_string().bright_white().bold()
        );
    }
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.processing_time)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const EXPORT: &str = "\
Date / Time,Object Name,Object Value
3/4/2020 10:00,Town Of Andover:AHS-NAE1/FEC Bus2.ENERGY-A,100 kWh
3/4/2020 10:00,Town Of Andover:AHS-NAE1/FEC Bus2.ENERGY-A,101 kWh
3/4/2020 10:15,Town Of Andover:AHS-NAE1/FEC Bus2.ENERGY-A,104 kWh
";

    fn args_for(dir: &TempDir, extra: &[&str]) -> Args {
        let input = dir.path().join("export.csv");
        fs::write(&input, EXPORT).unwrap();
        let output = dir.path().join("out.csv");

        let mut argv = vec![
            "metasys-meter".to_string(),
            "-q".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|arg| arg.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_execute_writes_measurements() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir, &[]);

        let stats = execute(args).unwrap();

        assert_eq!(stats.parse.records_read, 3);
        assert_eq!(stats.parse.duplicates_dropped, 1);
        assert_eq!(stats.rows_written, 2);
        assert_eq!(stats.summary_days, None);

        let content = fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert!(content.starts_with("Timestamp,ENERGY-A\n"));
    }

    #[test]
    fn test_execute_missing_summary_meters_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir, &["-s"]);

        let error = execute(args).unwrap_err();

        assert!(format!("{:#}", error).contains("Required meter columns missing"));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_execute_rejects_end_without_start() {
        let dir = TempDir::new().unwrap();
        let args = args_for(&dir, &["-s", "--end", "06:00"]);

        assert!(execute(args).is_err());
        assert!(!dir.path().join("out.csv").exists());
    }
}
