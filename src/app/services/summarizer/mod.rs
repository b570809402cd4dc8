//! Daily energy-usage summaries
//!
//! - [`bucketing`] - Assigns each timestamp a bucket date, honouring shifted
//!   day boundaries for night-time windows
//! - [`summary`] - Per-day kWh deltas and dollar costs for the configured meters

pub mod bucketing;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use bucketing::DayBucketer;
pub use summary::{ReadingRange, Summarizer};
