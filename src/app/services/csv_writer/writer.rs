//! Delimited output for measurement and summary tables
//!
//! Tables are converted to polars DataFrames and serialized with polars'
//! CSV writer. Output is staged in a temporary file next to the destination
//! and only renamed into place once it is complete, so a failed run never
//! leaves a truncated file behind.

use super::header::summary_header;
use crate::config::SummaryWindow;
use crate::constants::{DATE_COLUMN, OUTPUT_DATE_FORMAT, OUTPUT_TIMESTAMP_FORMAT, TIMESTAMP_COLUMN};
use crate::error::{MeterError, Result};
use crate::models::{MeasurementTable, SummaryTable};
use polars::prelude::{Column, CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes tables to a single CSV output file
#[derive(Debug, Clone)]
pub struct CsvOutputWriter {
    output_path: PathBuf,
}

impl CsvOutputWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the wide measurement table with no header line.
    ///
    /// Returns the number of data rows written.
    pub fn write_measurements(&self, table: &MeasurementTable) -> Result<usize> {
        let mut df = measurements_to_dataframe(table)?;
        self.write_atomically(|writer| {
            CsvWriter::new(writer).include_header(true).finish(&mut df)?;
            Ok(())
        })?;

        debug!(
            "Wrote {} measurement rows to {}",
            table.row_count(),
            self.output_path.display()
        );
        Ok(table.row_count())
    }

    /// Write the window description line followed by the summary table.
    ///
    /// Returns the number of data rows written.
    pub fn write_summary(&self, summary: &SummaryTable, window: &SummaryWindow) -> Result<usize> {
        let mut df = summary_to_dataframe(summary)?;
        let header = summary_header(window);
        self.write_atomically(|writer| {
            writeln!(writer, "{}", header)?;
            CsvWriter::new(writer).include_header(true).finish(&mut df)?;
            Ok(())
        })?;

        debug!(
            "Wrote {} summary rows to {}",
            summary.rows().len(),
            self.output_path.display()
        );
        Ok(summary.rows().len())
    }

    fn write_atomically<F>(&self, write: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
    {
        let directory = match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(directory)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            write(&mut writer)?;
            writer.flush()?;
        }

        staged
            .persist(&self.output_path)
            .map_err(|e| MeterError::OutputPersist {
                path: self.output_path.clone(),
                source: e.error,
            })?;
        Ok(())
    }
}

/// Measurement table as a DataFrame: a `Timestamp` column, then one
/// `Float64` column per variable with nulls for missing readings
pub fn measurements_to_dataframe(table: &MeasurementTable) -> Result<DataFrame> {
    let timestamps: Vec<String> = table
        .timestamps()
        .iter()
        .map(|timestamp| timestamp.format(OUTPUT_TIMESTAMP_FORMAT).to_string())
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(table.column_count() + 1);
    columns.push(Series::new(TIMESTAMP_COLUMN.into(), timestamps).into());

    for (index, name) in table.columns().iter().enumerate() {
        let values: Vec<Option<f64>> = table.rows().iter().map(|row| row[index]).collect();
        columns.push(Series::new(name.as_str().into(), values).into());
    }

    Ok(DataFrame::new(columns)?)
}

/// Summary table as a DataFrame: a `Date` column, the `(kWh)` columns, then
/// the `($)` columns
pub fn summary_to_dataframe(summary: &SummaryTable) -> Result<DataFrame> {
    let dates: Vec<String> = summary
        .rows()
        .iter()
        .map(|row| row.date.format(OUTPUT_DATE_FORMAT).to_string())
        .collect();
    let values: Vec<Vec<Option<f64>>> = summary
        .rows()
        .iter()
        .map(SummaryTable::row_values)
        .collect();

    let names = summary.column_names();
    let mut columns: Vec<Column> = Vec::with_capacity(names.len() + 1);
    columns.push(Series::new(DATE_COLUMN.into(), dates).into());

    for (index, name) in names.iter().enumerate() {
        let column: Vec<Option<f64>> = values.iter().map(|row| row[index]).collect();
        columns.push(Series::new(name.as_str().into(), column).into());
    }

    Ok(DataFrame::new(columns)?)
}
