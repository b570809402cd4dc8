//! Test utilities for summaries
//!
//! Builds measurement tables holding the configured meter columns.

use crate::config::{MeterSpec, SummaryWindow};
use crate::models::MeasurementTable;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

mod summary_tests;

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn window(start: Option<(u32, u32)>, end: Option<(u32, u32)>) -> SummaryWindow {
    SummaryWindow::new(
        start.map(|(h, m)| hm(h, m)),
        end.map(|(h, m)| hm(h, m)),
    )
    .unwrap()
}

/// Two meters, "A.Energy" (label A) and "B.Energy" (label B)
pub fn two_meters() -> Vec<MeterSpec> {
    vec![
        MeterSpec::new("A.Energy", "A"),
        MeterSpec::new("B.Energy", "B"),
    ]
}

/// Table with columns "A.Energy", "B.Energy" and an unrelated "Temp" column
pub fn meter_table(rows: Vec<(NaiveDateTime, Option<f64>, Option<f64>)>) -> MeasurementTable {
    MeasurementTable::new(
        vec![
            "A.Energy".to_string(),
            "B.Energy".to_string(),
            "Temp".to_string(),
        ],
        rows.into_iter()
            .map(|(timestamp, a, b)| (timestamp, vec![a, b, Some(20.0)]))
            .collect(),
    )
    .unwrap()
}
