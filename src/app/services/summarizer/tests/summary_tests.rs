//! Tests for daily summaries

use super::{at, date, meter_table, two_meters, window};
use crate::app::services::summarizer::summary::{ReadingRange, Summarizer};
use crate::config::{MeterSpec, SiteConfig};
use crate::error::MeterError;
use crate::models::MeasurementTable;

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a value, found missing");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_reading_range_spread() {
    let mut range = ReadingRange::default();
    assert_eq!(range.spread(), None);

    range.observe(120.0);
    assert_eq!(range.spread(), Some(0.0));

    range.observe(100.0);
    range.observe(150.0);
    assert_eq!(range.spread(), Some(50.0));
}

#[test]
fn test_zero_readings_are_ignored() {
    let table = meter_table(vec![
        (at(2020, 1, 1, 0, 0), Some(100.0), Some(10.0)),
        (at(2020, 1, 1, 8, 0), Some(0.0), Some(12.0)),
        (at(2020, 1, 1, 16, 0), Some(150.0), Some(15.0)),
    ]);

    let summary = Summarizer::new(two_meters(), 0.16).summarize(&table).unwrap();

    let row = summary.row(date(2020, 1, 1)).unwrap();
    assert_close(row.energy_kwh[0], 50.0);
    assert_close(row.cost_dollars[0], 50.0 * 0.16);
    assert_close(row.energy_kwh[1], 5.0);
}

#[test]
fn test_one_row_per_calendar_day() {
    let table = meter_table(vec![
        (at(2020, 1, 1, 0, 0), Some(100.0), Some(1.0)),
        (at(2020, 1, 1, 23, 59), Some(110.0), Some(2.0)),
        (at(2020, 1, 2, 0, 1), Some(111.0), Some(3.0)),
        (at(2020, 1, 2, 12, 0), Some(131.0), Some(7.0)),
    ]);

    let summary = Summarizer::new(two_meters(), 0.2).summarize(&table).unwrap();

    let dates: Vec<_> = summary.rows().iter().map(|row| row.date).collect();
    assert_eq!(dates, vec![date(2020, 1, 1), date(2020, 1, 2)]);
    assert_close(summary.rows()[0].energy_kwh[0], 10.0);
    assert_close(summary.rows()[1].energy_kwh[0], 20.0);
    assert_close(summary.rows()[1].cost_dollars[1], 4.0 * 0.2);
}

#[test]
fn test_bucket_without_readings_is_missing() {
    let table = meter_table(vec![
        (at(2020, 1, 1, 0, 0), Some(100.0), None),
        (at(2020, 1, 1, 12, 0), Some(105.0), Some(0.0)),
    ]);

    let summary = Summarizer::new(two_meters(), 0.16).summarize(&table).unwrap();

    let row = &summary.rows()[0];
    assert_close(row.energy_kwh[0], 5.0);
    assert_eq!(row.energy_kwh[1], None);
    assert_eq!(row.cost_dollars[1], None);
}

#[test]
fn test_missing_meter_columns_are_fatal() {
    let table = meter_table(vec![(at(2020, 1, 1, 0, 0), Some(1.0), Some(1.0))]);
    let meters = vec![
        MeterSpec::new("A.Energy", "A"),
        MeterSpec::new("C.Energy", "C"),
        MeterSpec::new("D.Energy", "D"),
    ];

    let result = Summarizer::new(meters, 0.16).summarize(&table);

    match result {
        Err(MeterError::MissingMeterColumns { missing }) => {
            assert_eq!(missing, vec!["C.Energy", "D.Energy"]);
        }
        other => panic!("expected MissingMeterColumns, got {:?}", other),
    }
}

#[test]
fn test_default_meters_required() {
    let table = MeasurementTable::new(vec!["Temp".to_string()], vec![]).unwrap();

    let result = Summarizer::new(SiteConfig::default().meters, 0.16).summarize(&table);

    match result {
        Err(MeterError::MissingMeterColumns { missing }) => assert_eq!(missing.len(), 7),
        other => panic!("expected MissingMeterColumns, got {:?}", other),
    }
}

#[test]
fn test_daytime_window_filters_rows() {
    let table = meter_table(vec![
        (at(2020, 1, 1, 5, 0), Some(90.0), Some(1.0)),
        (at(2020, 1, 1, 8, 0), Some(100.0), Some(1.0)),
        (at(2020, 1, 1, 17, 0), Some(140.0), Some(1.0)),
        (at(2020, 1, 1, 18, 0), Some(150.0), Some(1.0)),
        (at(2020, 1, 1, 22, 0), Some(160.0), Some(1.0)),
    ]);

    let summary = Summarizer::new(two_meters(), 0.16)
        .with_window(window(Some((8, 0)), Some((18, 0))))
        .summarize(&table)
        .unwrap();

    assert_eq!(summary.rows().len(), 1);
    assert_close(summary.rows()[0].energy_kwh[0], 40.0);
}

#[test]
fn test_overnight_window_groups_night() {
    let table = meter_table(vec![
        (at(2020, 1, 2, 12, 0), Some(50.0), Some(1.0)),
        (at(2020, 1, 2, 22, 0), Some(100.0), Some(1.0)),
        (at(2020, 1, 2, 23, 30), Some(104.0), Some(1.0)),
        (at(2020, 1, 3, 1, 0), Some(110.0), Some(1.0)),
        (at(2020, 1, 3, 5, 45), Some(120.0), Some(1.0)),
        (at(2020, 1, 3, 9, 0), Some(130.0), Some(1.0)),
        (at(2020, 1, 3, 22, 15), Some(200.0), Some(1.0)),
        (at(2020, 1, 4, 2, 0), Some(207.0), Some(1.0)),
    ]);

    let summary = Summarizer::new(two_meters(), 0.16)
        .with_window(window(Some((22, 0)), Some((6, 0))))
        .summarize(&table)
        .unwrap();

    let dates: Vec<_> = summary.rows().iter().map(|row| row.date).collect();
    assert_eq!(dates, vec![date(2020, 1, 2), date(2020, 1, 3)]);
    assert_close(summary.rows()[0].energy_kwh[0], 20.0);
    assert_close(summary.rows()[1].energy_kwh[0], 7.0);
}

#[test]
fn test_equal_bounds_keep_only_readings_at_that_time() {
    let table = meter_table(vec![
        (at(2020, 1, 1, 7, 0), Some(100.0), Some(1.0)),
        (at(2020, 1, 1, 12, 0), Some(150.0), Some(1.0)),
        (at(2020, 1, 1, 20, 0), Some(190.0), Some(1.0)),
    ]);

    let summary = Summarizer::new(two_meters(), 0.16)
        .with_window(window(Some((7, 0)), Some((7, 0))))
        .summarize(&table)
        .unwrap();

    assert_eq!(summary.rows().len(), 1);
    assert_eq!(summary.rows()[0].date, date(2020, 1, 1));
    assert_close(summary.rows()[0].energy_kwh[0], 0.0);
    assert_close(summary.rows()[0].cost_dollars[0], 0.0);
}

#[test]
fn test_start_only_shifts_without_filtering() {
    let table = meter_table(vec![
        (at(2020, 1, 1, 7, 0), Some(100.0), Some(1.0)),
        (at(2020, 1, 2, 5, 0), Some(130.0), Some(1.0)),
        (at(2020, 1, 2, 7, 0), Some(135.0), Some(1.0)),
        (at(2020, 1, 2, 20, 0), Some(150.0), Some(1.0)),
    ]);

    let summary = Summarizer::new(two_meters(), 0.16)
        .with_window(window(Some((6, 0)), None))
        .summarize(&table)
        .unwrap();

    let dates: Vec<_> = summary.rows().iter().map(|row| row.date).collect();
    assert_eq!(dates, vec![date(2020, 1, 1), date(2020, 1, 2)]);
    assert_close(summary.rows()[0].energy_kwh[0], 30.0);
    assert_close(summary.rows()[1].energy_kwh[0], 15.0);
}

#[test]
fn test_labels_follow_meter_order() {
    let table = meter_table(vec![(at(2020, 1, 1, 0, 0), Some(1.0), Some(1.0))]);
    let meters = vec![
        MeterSpec::new("B.Energy", "B"),
        MeterSpec::new("A.Energy", "A"),
    ];

    let summary = Summarizer::new(meters, 0.16).summarize(&table).unwrap();

    assert_eq!(summary.labels(), &["B", "A"]);
    assert_eq!(
        summary.column_names(),
        vec!["B (kWh)", "A (kWh)", "B ($)", "A ($)"]
    );
    assert_eq!(summary.cost_per_kwh(), 0.16);
}
