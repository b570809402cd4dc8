//! Metasys Energy Meter Library
//!
//! A Rust library for turning energy-meter exports from a Metasys
//! building-automation system into analysis-ready CSV tables.
//!
//! This library provides tools for:
//! - Reading exports of `(timestamp, variable name, "<number> <unit>")` rows
//! - Stripping units from readings and the site prefix from variable names
//! - Keeping the latest reading per timestamp and variable, one row per timestamp
//! - Bucketing cumulative meter readings into days, optionally around a
//!   night-time window that crosses midnight
//! - Daily kWh usage and cost summaries
//! - Writing CSV output that appears whole or not at all

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Core application modules
pub mod app {
    pub mod services {
        pub mod csv_writer;
        pub mod metasys_parser;
        pub mod summarizer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{MeterSpec, SiteConfig, SummaryWindow, UnparsedColumns};
pub use error::{MeterError, Result};
pub use models::{MeasurementTable, RawRecord, SummaryRow, SummaryTable};
