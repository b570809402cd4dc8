//! CSV output for measurement and summary tables
//!
//! - [`header`] - Window description written above summaries
//! - [`writer`] - DataFrame conversion and staged file output

pub mod header;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use header::summary_header;
pub use writer::{CsvOutputWriter, measurements_to_dataframe, summary_to_dataframe};
