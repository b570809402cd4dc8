//! Daily energy-usage and cost summaries
//!
//! Meters report monotonically increasing cumulative energy, so the usage in a
//! bucket is the spread between its largest and smallest reading.

use super::bucketing::DayBucketer;
use crate::config::{MeterSpec, SummaryWindow};
use crate::error::{MeterError, Result};
use crate::models::{MeasurementTable, SummaryRow, SummaryTable};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Running minimum and maximum of the readings seen in one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadingRange {
    bounds: Option<(f64, f64)>,
}

impl ReadingRange {
    pub fn observe(&mut self, reading: f64) {
        self.bounds = Some(match self.bounds {
            None => (reading, reading),
            Some((min, max)) => (min.min(reading), max.max(reading)),
        });
    }

    /// `max - min`, or `None` when no reading was observed
    pub fn spread(&self) -> Option<f64> {
        self.bounds.map(|(min, max)| max - min)
    }
}

/// Computes daily summaries for a fixed list of meters
#[derive(Debug, Clone)]
pub struct Summarizer {
    meters: Vec<MeterSpec>,
    cost_per_kwh: f64,
    window: SummaryWindow,
}

impl Summarizer {
    pub fn new(meters: Vec<MeterSpec>, cost_per_kwh: f64) -> Self {
        Self {
            meters,
            cost_per_kwh,
            window: SummaryWindow::all_day(),
        }
    }

    /// Restrict and bucket readings by a daily time window
    pub fn with_window(mut self, window: SummaryWindow) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> &SummaryWindow {
        &self.window
    }

    /// Summarize a measurement table into one row per bucket date.
    ///
    /// Fails with [`MeterError::MissingMeterColumns`] when any configured meter
    /// column is absent from the table.
    pub fn summarize(&self, table: &MeasurementTable) -> Result<SummaryTable> {
        let indices = self.meter_indices(table)?;

        let filtered;
        let table = if self.window.bounds().is_some() {
            filtered = table.filter_rows(|timestamp| self.window.contains(timestamp.time()));
            debug!(
                "Time window {} kept {} of {} rows",
                self.window,
                filtered.row_count(),
                table.row_count()
            );
            &filtered
        } else {
            table
        };

        let bucketer = DayBucketer::new(&self.window);
        let mut buckets: BTreeMap<NaiveDate, Vec<ReadingRange>> = BTreeMap::new();

        for (timestamp, row) in table.timestamps().iter().zip(table.rows()) {
            let ranges = buckets
                .entry(bucketer.bucket_key(*timestamp))
                .or_insert_with(|| vec![ReadingRange::default(); indices.len()]);

            for (range, &index) in ranges.iter_mut().zip(&indices) {
                // Zero readings are sensor glitches, not meter resets
                if let Some(reading) = row[index].filter(|reading| *reading != 0.0) {
                    range.observe(reading);
                }
            }
        }

        let rows: Vec<SummaryRow> = buckets
            .into_iter()
            .map(|(date, ranges)| {
                let energy_kwh: Vec<Option<f64>> =
                    ranges.iter().map(ReadingRange::spread).collect();
                let cost_dollars = energy_kwh
                    .iter()
                    .map(|kwh| kwh.map(|kwh| kwh * self.cost_per_kwh))
                    .collect();
                SummaryRow {
                    date,
                    energy_kwh,
                    cost_dollars,
                }
            })
            .collect();

        let empty_cells = rows
            .iter()
            .flat_map(|row| &row.energy_kwh)
            .filter(|kwh| kwh.is_none())
            .count();
        if empty_cells > 0 {
            warn!(
                "{} meter-day(s) had no usable readings and are left missing",
                empty_cells
            );
        }

        info!(
            "Summarized {} day(s) for {} meter(s) at ${}/kWh",
            rows.len(),
            self.meters.len(),
            self.cost_per_kwh
        );

        let labels = self.meters.iter().map(|meter| meter.label.clone()).collect();
        Ok(SummaryTable::new(labels, self.cost_per_kwh, rows))
    }

    fn meter_indices(&self, table: &MeasurementTable) -> Result<Vec<usize>> {
        let mut indices = Vec::with_capacity(self.meters.len());
        let mut missing = Vec::new();

        for meter in &self.meters {
            match table.column_index(&meter.column) {
                Some(index) => indices.push(index),
                None => missing.push(meter.column.clone()),
            }
        }

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(MeterError::MissingMeterColumns { missing })
        }
    }
}
