//! Core data structures for Metasys export processing.
//!
//! Defines the raw long-format record, the wide measurement table built from
//! it, and the daily summary table derived from the measurement table.

use crate::constants::{COST_SUFFIX, ENERGY_SUFFIX};
use crate::error::{MeterError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// One observation as read from the export, before any normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub timestamp: String,
    pub variable: String,
    pub value: String,
}

impl RawRecord {
    pub fn new(
        timestamp: impl Into<String>,
        variable: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            variable: variable.into(),
            value: value.into(),
        }
    }
}

/// Wide table of readings: one row per timestamp, one column per variable.
///
/// Rows are sorted by ascending timestamp and timestamps are unique. Every row
/// holds exactly one cell per column; `None` marks a missing reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    columns: Vec<String>,
    timestamps: Vec<NaiveDateTime>,
    rows: Vec<Vec<Option<f64>>>,
}

impl MeasurementTable {
    /// Assemble a table from parts, sorting rows by timestamp.
    ///
    /// Every row must hold exactly one cell per column.
    pub fn new(
        columns: Vec<String>,
        mut rows: Vec<(NaiveDateTime, Vec<Option<f64>>)>,
    ) -> Result<Self> {
        if let Some((timestamp, cells)) = rows.iter().find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(MeterError::RowWidthMismatch {
                timestamp: *timestamp,
                cells: cells.len(),
                columns: columns.len(),
            });
        }
        rows.sort_by_key(|(timestamp, _)| *timestamp);
        let (timestamps, rows) = rows.into_iter().unzip();
        Ok(Self {
            columns,
            timestamps,
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// All cells of a column in row order
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Cell lookup by timestamp and column name
    pub fn value(&self, timestamp: NaiveDateTime, column: &str) -> Option<f64> {
        let column_index = self.column_index(column)?;
        let row_index = self.timestamps.binary_search(&timestamp).ok()?;
        self.rows[row_index][column_index]
    }

    /// Keep only the rows whose timestamp satisfies the predicate
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(NaiveDateTime) -> bool,
    {
        let (timestamps, rows) = self
            .timestamps
            .iter()
            .zip(&self.rows)
            .filter(|(timestamp, _)| keep(**timestamp))
            .map(|(timestamp, row)| (*timestamp, row.clone()))
            .unzip();
        Self {
            columns: self.columns.clone(),
            timestamps,
            rows,
        }
    }

    /// Count of cells holding a reading
    pub fn present_cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_some()).count())
            .sum()
    }
}

/// Energy use and cost of every summarized meter for one bucket day
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub date: NaiveDate,
    /// kWh per meter, in label order
    pub energy_kwh: Vec<Option<f64>>,
    /// Dollars per meter, in label order
    pub cost_dollars: Vec<Option<f64>>,
}

/// Daily energy-usage and cost table, one row per bucket date
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    labels: Vec<String>,
    cost_per_kwh: f64,
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn new(labels: Vec<String>, cost_per_kwh: f64, rows: Vec<SummaryRow>) -> Self {
        Self {
            labels,
            cost_per_kwh,
            rows,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn cost_per_kwh(&self) -> f64 {
        self.cost_per_kwh
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn row(&self, date: NaiveDate) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.date == date)
    }

    /// Data column headers: all `(kWh)` columns, then all `($)` columns
    pub fn column_names(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|label| format!("{}{}", label, ENERGY_SUFFIX))
            .chain(
                self.labels
                    .iter()
                    .map(|label| format!("{}{}", label, COST_SUFFIX)),
            )
            .collect()
    }

    /// Row values laid out like [`SummaryTable::column_names`]
    pub fn row_values(row: &SummaryRow) -> Vec<Option<f64>> {
        row.energy_kwh
            .iter()
            .chain(&row.cost_dollars)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_measurement_table_sorts_rows() {
        let table = MeasurementTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                (ts(2, 0), vec![Some(2.0), None]),
                (ts(1, 0), vec![Some(1.0), Some(10.0)]),
            ],
        )
        .unwrap();

        assert_eq!(table.timestamps(), &[ts(1, 0), ts(2, 0)]);
        assert_eq!(table.column("a").unwrap(), vec![Some(1.0), Some(2.0)]);
        assert_eq!(table.value(ts(1, 0), "b"), Some(10.0));
        assert_eq!(table.value(ts(2, 0), "b"), None);
        assert_eq!(table.present_cell_count(), 3);
        assert!(table.column("c").is_none());
    }

    #[test]
    fn test_filter_rows_keeps_columns() {
        let table = MeasurementTable::new(
            vec!["a".to_string()],
            vec![(ts(1, 3), vec![Some(1.0)]), (ts(1, 12), vec![Some(2.0)])],
        )
        .unwrap();
        let filtered = table.filter_rows(|t| t == ts(1, 12));

        assert_eq!(filtered.columns(), table.columns());
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.column("a").unwrap(), vec![Some(2.0)]);
    }

    #[test]
    fn test_row_width_mismatch_is_an_error() {
        let result = MeasurementTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                (ts(1, 0), vec![Some(1.0), Some(2.0)]),
                (ts(1, 1), vec![Some(3.0)]),
            ],
        );

        assert!(matches!(
            result,
            Err(MeterError::RowWidthMismatch {
                cells: 1,
                columns: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_summary_column_names_order() {
        let summary = SummaryTable::new(vec!["Main".to_string(), "DL".to_string()], 0.16, vec![]);
        assert_eq!(
            summary.column_names(),
            vec!["Main (kWh)", "DL (kWh)", "Main ($)", "DL ($)"]
        );
    }
}
