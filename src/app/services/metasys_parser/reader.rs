//! Raw record extraction from Metasys CSV exports
//!
//! The export is comma-delimited with a header row. The first column holds
//! the timestamp, the second the variable name, and the reading lives in the
//! column whose header matches the configured value column.

use crate::error::{MeterError, Result};
use crate::models::RawRecord;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Positions of the fields a raw record is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub timestamp_index: usize,
    pub variable_index: usize,
    pub value_index: usize,
}

impl RecordLayout {
    /// Locate the key columns and the value column in the header row
    pub fn from_headers(
        headers: &StringRecord,
        value_column: &str,
        source_name: &str,
    ) -> Result<Self> {
        if headers.len() < 2 {
            return Err(MeterError::invalid_format(
                source_name,
                format!(
                    "expected at least timestamp and variable columns, found {} column(s)",
                    headers.len()
                ),
            ));
        }

        let value_index = headers
            .iter()
            .position(|header| header.trim() == value_column)
            .ok_or_else(|| {
                MeterError::invalid_format(
                    source_name,
                    format!("missing '{}' column", value_column),
                )
            })?;

        if value_index < 2 {
            return Err(MeterError::invalid_format(
                source_name,
                format!(
                    "'{}' cannot be one of the two key columns",
                    value_column
                ),
            ));
        }

        Ok(Self {
            timestamp_index: 0,
            variable_index: 1,
            value_index,
        })
    }

    fn extract(&self, record: &StringRecord) -> Option<RawRecord> {
        Some(RawRecord::new(
            record.get(self.timestamp_index)?.trim(),
            record.get(self.variable_index)?,
            record.get(self.value_index)?,
        ))
    }
}

/// Read every raw record from a CSV source, in file order
///
/// `source_name` is only used in error messages.
pub fn read_raw_records<R: Read>(
    reader: R,
    value_column: &str,
    source_name: &str,
) -> Result<Vec<RawRecord>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let layout = RecordLayout::from_headers(&headers, value_column, source_name)?;
    debug!("Record layout for {}: {:?}", source_name, layout);

    let mut records = Vec::new();
    for (row_index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let raw = layout.extract(&record).ok_or_else(|| {
            MeterError::invalid_format(
                source_name,
                format!("row {} has only {} field(s)", row_index + 2, record.len()),
            )
        })?;
        records.push(raw);
    }

    if records.is_empty() {
        return Err(MeterError::EmptyInput {
            source_name: source_name.to_string(),
        });
    }

    debug!("Read {} raw records from {}", records.len(), source_name);
    Ok(records)
}

/// Read every raw record from an export file
pub fn read_raw_records_from_path(path: &Path, value_column: &str) -> Result<Vec<RawRecord>> {
    let file = File::open(path)?;
    read_raw_records(file, value_column, &path.display().to_string())
}
