//! Command-line argument definitions for the Metasys meter processor
//!
//! Defines the CLI using the clap derive API and converts the raw arguments
//! into validated configuration before any input is read.

use crate::config::{SiteConfig, SummaryWindow, UnparsedColumns};
use crate::constants::DEFAULT_COST_PER_KWH;
use crate::error::{MeterError, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the Metasys meter processor
///
/// Parses an energy-meter export from a Metasys building-automation system
/// into a wide CSV table, or into a daily energy-usage and cost summary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "metasys-meter",
    version,
    about = "Parse Metasys energy-meter exports into wide tables or daily usage summaries",
    long_about = "Reads a Metasys export (timestamp, variable name, '<number> <unit>' value), \
                  strips units and the site prefix, keeps the latest reading for every \
                  timestamp and variable, and writes one row per timestamp. With --summarize \
                  the cumulative energy meters are reduced to daily kWh usage and cost instead."
)]
pub struct Args {
    /// Metasys export file to read
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Name of input file"
    )]
    pub input_file: PathBuf,

    /// CSV file to write
    ///
    /// Written in full or not at all: the table is staged next to the
    /// destination and renamed into place once complete.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Name of output file"
    )]
    pub output_file: PathBuf,

    /// Write a daily usage summary instead of the full table
    #[arg(
        short = 's',
        long = "summarize",
        help = "Output file should be a daily usage summary"
    )]
    pub summarize: bool,

    /// Start of the daily time window (HH:MM)
    ///
    /// Alone, it moves the start of each summary day to this time. With
    /// --end, only readings between the two times are summarized.
    #[arg(long = "start", value_name = "HH:MM", help = "Start time for summary table")]
    pub start_time: Option<String>,

    /// End of the daily time window (HH:MM), requires --start
    #[arg(long = "end", value_name = "HH:MM", help = "End time for summary table")]
    pub end_time: Option<String>,

    /// Cost of electricity in $/kWh
    #[arg(
        long = "cost",
        value_name = "DOLLARS",
        default_value_t = DEFAULT_COST_PER_KWH,
        help = "Cost of electricity, in $/kWh"
    )]
    pub cost: f64,

    /// Site configuration file (TOML)
    ///
    /// Overrides the variable-name prefix, value column and summarized meters.
    /// Defaults to the Andover site when omitted.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to site configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Drop variables whose names lack the site prefix
    ///
    /// By default they are grouped into a single "(unparsed)" column.
    #[arg(
        long = "drop-unparsed",
        help = "Drop variables whose names lack the site prefix"
    )]
    pub drop_unparsed: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(MeterError::configuration(format!(
                "Cost must be a non-negative number of dollars per kWh, got {}",
                self.cost
            )));
        }

        if self.input_file == self.output_file {
            return Err(MeterError::configuration(format!(
                "Output file must differ from input file: {}",
                self.input_file.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(MeterError::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        self.summary_window()?;
        Ok(())
    }

    /// The daily time window described by --start and --end
    pub fn summary_window(&self) -> Result<SummaryWindow> {
        SummaryWindow::from_strs(self.start_time.as_deref(), self.end_time.as_deref())
    }

    /// Site configuration from --config, or the Andover defaults
    pub fn site_config(&self) -> Result<SiteConfig> {
        match &self.config_file {
            Some(path) => SiteConfig::from_toml_file(path),
            None => Ok(SiteConfig::default()),
        }
    }

    pub fn unparsed_columns(&self) -> UnparsedColumns {
        if self.drop_unparsed {
            UnparsedColumns::Drop
        } else {
            UnparsedColumns::Keep
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress and the final report
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
