//! Test utilities for CSV output

use crate::models::{MeasurementTable, SummaryRow, SummaryTable};
use chrono::NaiveDate;


pub fn sample_table() -> MeasurementTable {
    let day = NaiveDate::from_ymd_opt(2020, 4, 3).unwrap();
    MeasurementTable::new(
        vec!["METER.A".to_string(), "METER.B".to_string()],
        vec![
            (day.and_hms_opt(10, 15, 0).unwrap(), vec![Some(2.5), None]),
            (day.and_hms_opt(10, 0, 0).unwrap(), vec![Some(1.0), Some(7.0)]),
        ],
    )
    .unwrap()
}

pub fn sample_summary() -> SummaryTable {
    SummaryTable::new(
        vec!["Main".to_string(), "DL".to_string()],
        0.5,
        vec![
            SummaryRow {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                energy_kwh: vec![Some(10.0), None],
                cost_dollars: vec![Some(5.0), None],
            },
            SummaryRow {
                date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
                energy_kwh: vec![Some(4.0), Some(2.0)],
                cost_dollars: vec![Some(2.0), Some(1.0)],
            },
        ],
    )
}

/// Split a CSV line and parse every field after the first as an optional float
pub fn parse_values(line: &str) -> (String, Vec<Option<f64>>) {
    let mut fields = line.split(',');
    let key = fields.next().unwrap_or_default().to_string();
    let values = fields
        .map(|field| {
            if field.is_empty() {
                None
            } else {
                Some(field.parse::<f64>().unwrap())
            }
        })
        .collect();
    (key, values)
}
