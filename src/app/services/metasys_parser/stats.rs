//! Table building statistics and result structures

use crate::models::MeasurementTable;

/// Counters collected while turning raw records into a measurement table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Raw records read from the source
    pub records_read: usize,
    /// Records superseded by a later record with the same key
    pub duplicates_dropped: usize,
    /// Surviving records whose value could not be read as a number
    pub malformed_values: usize,
    /// Distinct variable names without the site prefix
    pub unparsed_variables: usize,
    /// Rows in the finished table
    pub rows: usize,
    /// Columns in the finished table
    pub columns: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of surviving records that carried a readable value
    pub fn valid_value_rate(&self) -> f64 {
        let kept = self.records_read - self.duplicates_dropped;
        if kept == 0 {
            0.0
        } else {
            (kept - self.malformed_values) as f64 / kept as f64 * 100.0
        }
    }
}

/// Output of the table builder
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: MeasurementTable,
    pub stats: ParseStats,
}
