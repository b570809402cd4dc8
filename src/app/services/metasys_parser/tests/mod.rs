//! Test utilities for the Metasys parser
//!
//! Helpers for building raw records and CSV exports with the Andover prefix.

use crate::constants::DEFAULT_SITE_PREFIX;
use crate::models::RawRecord;


/// Full variable name for a column label at the default site
pub fn prefixed(name: &str) -> String {
    format!("{}{}", DEFAULT_SITE_PREFIX, name)
}

/// Raw record for a variable at the default site
pub fn record(timestamp: &str, name: &str, value: &str) -> RawRecord {
    RawRecord::new(timestamp, prefixed(name), value)
}

/// CSV export text with the standard Metasys header
pub fn export_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut csv = String::from("Date / Time,Object Name,Object Value\n");
    for (timestamp, name, value) in rows {
        csv.push_str(&format!("{},{},{}\n", timestamp, name, value));
    }
    csv
}
