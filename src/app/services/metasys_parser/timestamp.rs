//! Timestamp parsing with day-first interpretation of numeric dates

use crate::constants::{DAY_FIRST_DATE_FORMATS, DAY_FIRST_TIMESTAMP_FORMATS, ISO_TIMESTAMP_FORMATS};
use crate::error::{MeterError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Parse an export timestamp.
///
/// ISO strings (`2020-04-03 10:00`) are read year-month-day; every other
/// numeric date is read day-first, so `03/04/2020 10:00` is 3 April 2020.
/// A trailing time-zone abbreviation such as `EST` is ignored.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    parse_wall_time(trimmed)
        .or_else(|| strip_zone_abbreviation(trimmed).and_then(parse_wall_time))
        .ok_or_else(|| MeterError::timestamp_parsing(value))
}

fn parse_wall_time(value: &str) -> Option<NaiveDateTime> {
    ISO_TIMESTAMP_FORMATS
        .iter()
        .chain(DAY_FIRST_TIMESTAMP_FORMATS)
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DAY_FIRST_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn strip_zone_abbreviation(value: &str) -> Option<&str> {
    let (rest, zone) = value.rsplit_once(' ')?;
    let is_zone = (2..=5).contains(&zone.len())
        && zone.chars().all(|c| c.is_ascii_uppercase())
        && zone != "AM"
        && zone != "PM";
    is_zone.then(|| rest.trim_end())
}
