//! Error handling for Metasys export processing.
//!
//! Malformed cells are not errors: they become missing values. The variants
//! here cover the fatal cases, namely unreadable input, configuration
//! mistakes and output failures.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid site configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No data rows found in {source_name}")]
    EmptyInput { source_name: String },

    #[error("Invalid Metasys export format in {source_name} - {reason}")]
    InvalidFormat { source_name: String, reason: String },

    #[error("Could not parse timestamp '{value}'")]
    TimestampParsing { value: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Row at {timestamp} has {cells} cells for {columns} columns")]
    RowWidthMismatch {
        timestamp: NaiveDateTime,
        cells: usize,
        columns: usize,
    },

    #[error("Required meter columns missing from table: {}", .missing.join(", "))]
    MissingMeterColumns { missing: Vec<String> },

    #[error("Failed to persist output file {path}: {source}")]
    OutputPersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MeterError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an input format error
    pub fn invalid_format(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a timestamp parsing error
    pub fn timestamp_parsing(value: impl Into<String>) -> Self {
        Self::TimestampParsing {
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MeterError>;
