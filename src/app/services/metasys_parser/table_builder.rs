//! Long-to-wide reshaping of Metasys exports
//!
//! Raw records are deduplicated on their (timestamp, variable) key, values are
//! stripped of units, variable names are stripped of the site prefix, and the
//! result is pivoted into a [`MeasurementTable`] with one row per timestamp.

use super::normalizers::{NameNormalizer, drop_units};
use super::reader::{read_raw_records, read_raw_records_from_path};
use super::stats::{ParseResult, ParseStats};
use super::timestamp::parse_timestamp;
use crate::config::{SiteConfig, UnparsedColumns};
use crate::constants::UNPARSED_COLUMN_LABEL;
use crate::error::Result;
use crate::models::{MeasurementTable, RawRecord};
use chrono::NaiveDateTime;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Builds measurement tables from Metasys exports
#[derive(Debug, Clone)]
pub struct MetasysParser {
    names: NameNormalizer,
    value_column: String,
    unparsed: UnparsedColumns,
}

impl MetasysParser {
    pub fn new(site: &SiteConfig) -> Self {
        Self {
            names: NameNormalizer::new(&site.prefix),
            value_column: site.value_column.clone(),
            unparsed: UnparsedColumns::default(),
        }
    }

    /// Choose how variables without the site prefix are handled
    pub fn with_unparsed_columns(mut self, policy: UnparsedColumns) -> Self {
        self.unparsed = policy;
        self
    }

    /// Read and reshape an export file
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        debug!("Parsing Metasys export {}", path.display());
        let records = read_raw_records_from_path(path, &self.value_column)?;
        self.build_table(records)
    }

    /// Read and reshape an export from any reader
    pub fn parse_reader<R: Read>(&self, reader: R, source_name: &str) -> Result<ParseResult> {
        let records = read_raw_records(reader, &self.value_column, source_name)?;
        self.build_table(records)
    }

    /// Reshape raw records, in file order, into a measurement table
    pub fn build_table(&self, records: Vec<RawRecord>) -> Result<ParseResult> {
        let mut stats = ParseStats::new();
        stats.records_read = records.len();

        let survivors = keep_last_readings(&records);
        stats.duplicates_dropped = records.len() - survivors.len();
        if stats.duplicates_dropped > 0 {
            debug!(
                "Dropped {} superseded duplicate records",
                stats.duplicates_dropped
            );
        }

        let columns = self.column_layout(&survivors);
        stats.unparsed_variables = columns.unparsed_variables;
        if columns.unparsed_variables > 0 {
            warn!(
                "{} variable name(s) lack the prefix '{}' ({})",
                columns.unparsed_variables,
                self.names.prefix(),
                match self.unparsed {
                    UnparsedColumns::Keep => "grouped into placeholder column",
                    UnparsedColumns::Drop => "dropped",
                }
            );
        }

        let mut parsed_timestamps: HashMap<&str, NaiveDateTime> = HashMap::new();
        let mut rows: BTreeMap<NaiveDateTime, Vec<Option<f64>>> = BTreeMap::new();
        let width = columns.labels.len();

        for record in survivors {
            let timestamp = match parsed_timestamps.get(record.timestamp.as_str()) {
                Some(timestamp) => *timestamp,
                None => {
                    let timestamp = parse_timestamp(&record.timestamp)?;
                    parsed_timestamps.insert(record.timestamp.as_str(), timestamp);
                    timestamp
                }
            };

            let value = drop_units(&record.value);
            if value.is_none() {
                stats.malformed_values += 1;
            }

            let row = rows.entry(timestamp).or_insert_with(|| vec![None; width]);
            if let Some(&index) = columns.slots.get(record.variable.as_str()) {
                // Cells shared by several keys keep the latest reading present
                if value.is_some() || row[index].is_none() {
                    row[index] = value;
                }
            }
        }

        if stats.malformed_values > 0 {
            warn!(
                "{} value(s) could not be read as numbers and were left missing",
                stats.malformed_values
            );
        }

        let table = MeasurementTable::new(columns.labels, rows.into_iter().collect())?;
        stats.rows = table.row_count();
        stats.columns = table.column_count();

        info!(
            "Built measurement table: {} rows x {} columns from {} records",
            stats.rows, stats.columns, stats.records_read
        );

        Ok(ParseResult { table, stats })
    }

    fn column_layout<'a>(&self, records: &[&'a RawRecord]) -> ColumnLayout<'a> {
        let mut normalized: HashMap<&'a str, Option<String>> = HashMap::new();
        for record in records {
            normalized
                .entry(record.variable.as_str())
                .or_insert_with(|| self.names.drop_prefix(&record.variable));
        }

        let named: BTreeSet<&str> = normalized.values().flatten().map(String::as_str).collect();
        let mut labels: Vec<String> = named.into_iter().map(str::to_string).collect();

        let unparsed_variables = normalized.values().filter(|name| name.is_none()).count();
        let unparsed_index = match self.unparsed {
            UnparsedColumns::Keep if unparsed_variables > 0 => {
                labels.push(UNPARSED_COLUMN_LABEL.to_string());
                Some(labels.len() - 1)
            }
            _ => None,
        };

        let slots = normalized
            .iter()
            .filter_map(|(variable, name)| {
                let index = match name {
                    Some(name) => labels.iter().position(|label| label == name),
                    None => unparsed_index,
                };
                index.map(|index| (*variable, index))
            })
            .collect();

        ColumnLayout {
            labels,
            slots,
            unparsed_variables,
        }
    }
}

/// Output column labels and the column each raw variable feeds
struct ColumnLayout<'a> {
    labels: Vec<String>,
    slots: HashMap<&'a str, usize>,
    unparsed_variables: usize,
}

/// Records that survive deduplication, in file order
///
/// For every (timestamp, variable) key the last record carrying a readable
/// value wins. A key whose records are all malformed keeps its last record.
pub fn keep_last_readings(records: &[RawRecord]) -> Vec<&RawRecord> {
    let mut chosen: HashMap<(&str, &str), (usize, bool)> = HashMap::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let readable = drop_units(&record.value).is_some();
        let key = (record.timestamp.as_str(), record.variable.as_str());
        match chosen.get(&key) {
            Some(&(_, true)) if !readable => {}
            _ => {
                chosen.insert(key, (index, readable));
            }
        }
    }

    let mut kept: Vec<usize> = chosen.into_values().map(|(index, _)| index).collect();
    kept.sort_unstable();
    kept.into_iter().map(|index| &records[index]).collect()
}
