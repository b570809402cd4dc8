//! Descriptive header line for summary files

use crate::config::SummaryWindow;
use crate::constants::{HEADER_ALL_HOURS, TIME_OF_DAY_FORMAT};

/// One-line description of the time window a summary covers
///
/// Times are written in canonical zero-padded `HH:MM`, so `--start 6:00`
/// appears as `06:00`.
pub fn summary_header(window: &SummaryWindow) -> String {
    match (window.start(), window.end()) {
        (None, _) => HEADER_ALL_HOURS.to_string(),
        (Some(start), None) => format!(
            "Usage statistics start at {} each day",
            start.format(TIME_OF_DAY_FORMAT)
        ),
        (Some(start), Some(end)) => format!(
            "Usage statistics from between {} and {} each day",
            start.format(TIME_OF_DAY_FORMAT),
            end.format(TIME_OF_DAY_FORMAT)
        ),
    }
}
