//! Configuration management and validation.
//!
//! Provides the site configuration (variable-name prefix, value column and the
//! meters to summarize), the optional daily time window used by the
//! summarizer, and the policy for variables that do not carry the site prefix.

use crate::constants::{
    DEFAULT_METERS, DEFAULT_SITE_NAME, DEFAULT_SITE_PREFIX, DEFAULT_VALUE_COLUMN,
    TIME_OF_DAY_FORMAT,
};
use crate::error::{MeterError, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A cumulative energy meter included in the daily summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterSpec {
    /// Column name in the measurement table (prefix already stripped)
    pub column: String,
    /// Short label used for summary column headers
    pub label: String,
}

impl MeterSpec {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// Site-specific settings for reading an export and summarizing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Human readable site name, used only for reporting
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Prefix every well-formed variable name starts with
    pub prefix: String,

    /// Header of the column holding `<number> <unit>` readings
    #[serde(default = "default_value_column")]
    pub value_column: String,

    /// Meters to summarize, in output order
    pub meters: Vec<MeterSpec>,
}

fn default_site_name() -> String {
    "custom site".to_string()
}

fn default_value_column() -> String {
    DEFAULT_VALUE_COLUMN.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SITE_NAME.to_string(),
            prefix: DEFAULT_SITE_PREFIX.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            meters: DEFAULT_METERS
                .iter()
                .map(|(column, label)| MeterSpec::new(*column, *label))
                .collect(),
        }
    }
}

impl SiteConfig {
    /// Load a site configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            "Loaded site configuration '{}' from {} ({} meters)",
            config.name,
            path.display(),
            config.meters.len()
        );
        Ok(config)
    }

    /// Parse and validate a site configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.value_column.trim().is_empty() {
            return Err(MeterError::configuration("value_column cannot be empty"));
        }

        if self.meters.is_empty() {
            return Err(MeterError::configuration(
                "At least one meter must be configured",
            ));
        }

        let mut labels = HashSet::new();
        for meter in &self.meters {
            if meter.column.trim().is_empty() || meter.label.trim().is_empty() {
                return Err(MeterError::configuration(format!(
                    "Meter entries need both a column and a label (got column '{}', label '{}')",
                    meter.column, meter.label
                )));
            }
            if !labels.insert(meter.label.as_str()) {
                return Err(MeterError::configuration(format!(
                    "Duplicate meter label '{}'",
                    meter.label
                )));
            }
        }

        Ok(())
    }
}

/// What to do with variables whose names lack the site prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnparsedColumns {
    /// Group them into a single placeholder column
    #[default]
    Keep,
    /// Leave them out of the table entirely
    Drop,
}

/// Optional daily time window for the summary
///
/// `end` is only meaningful together with `start`; [`SummaryWindow::new`]
/// rejects the combination of an end time without a start time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryWindow {
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
}

impl SummaryWindow {
    pub fn new(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Result<Self> {
        if end.is_some() && start.is_none() {
            return Err(MeterError::configuration(
                "end time should not be specified unless start time is specified",
            ));
        }
        Ok(Self { start, end })
    }

    /// Build a window from optional `HH:MM` strings
    pub fn from_strs(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = start.map(parse_time_of_day).transpose()?;
        let end = end.map(parse_time_of_day).transpose()?;
        Self::new(start, end)
    }

    /// Window covering all hours of every calendar day
    pub fn all_day() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveTime> {
        self.end
    }

    /// Both bounds, when a full window was given
    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        self.start.zip(self.end)
    }

    /// Whether a time of day passes the window's row filter.
    ///
    /// Only a window with both bounds filters rows. The interval is
    /// `[start, end)`, wrapping past midnight when `start > end`. Equal bounds
    /// keep only readings stamped exactly at that time.
    pub fn contains(&self, time: NaiveTime) -> bool {
        match self.bounds() {
            None => true,
            Some((start, end)) if start < end => time >= start && time < end,
            Some((start, end)) if start > end => time >= start || time < end,
            Some((start, _)) => time == start,
        }
    }
}

impl fmt::Display for SummaryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (None, _) => write!(f, "all hours"),
            (Some(start), None) => write!(f, "from {}", start.format(TIME_OF_DAY_FORMAT)),
            (Some(start), Some(end)) => write!(
                f,
                "{}-{}",
                start.format(TIME_OF_DAY_FORMAT),
                end.format(TIME_OF_DAY_FORMAT)
            ),
        }
    }
}

/// Parse an `HH:MM` time of day
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT).map_err(|e| {
        MeterError::configuration(format!(
            "Invalid time of day '{}' (expected HH:MM): {}",
            value, e
        ))
    })
}

/// Seconds elapsed since midnight for a time of day
pub fn seconds_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}
