//! Day bucketing for daily summaries
//!
//! Every timestamp is assigned a calendar date used purely as a grouping key.
//! Without a window that is the timestamp's own date. A start time alone moves
//! the day boundary to that time, so readings before it count towards the
//! previous day. A window that wraps past midnight is shifted back by the
//! midpoint of its bounds, which keeps a whole night on one date.

use crate::config::{SummaryWindow, seconds_since_midnight};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Assigns bucket dates to timestamps for one summary window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBucketer {
    shift: TimeDelta,
}

impl DayBucketer {
    pub fn new(window: &SummaryWindow) -> Self {
        let shift_seconds = match (window.start(), window.end()) {
            (None, _) => 0,
            (Some(start), None) => seconds_since_midnight(start),
            (Some(start), Some(end)) => {
                let start = seconds_since_midnight(start);
                let end = seconds_since_midnight(end);
                if start < end {
                    0
                } else {
                    (start + end) / 2
                }
            }
        };

        Self {
            shift: TimeDelta::seconds(shift_seconds),
        }
    }

    /// How far timestamps are moved back before taking their date
    pub fn shift(&self) -> TimeDelta {
        self.shift
    }

    pub fn bucket_key(&self, timestamp: NaiveDateTime) -> NaiveDate {
        (timestamp - self.shift).date()
    }

    pub fn bucket_keys(&self, timestamps: &[NaiveDateTime]) -> Vec<NaiveDate> {
        timestamps
            .iter()
            .map(|timestamp| self.bucket_key(*timestamp))
            .collect()
    }
}
