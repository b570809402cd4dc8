//! Metasys export parser
//!
//! Turns the long-format export written by the building-automation system
//! (timestamp, variable name, `<number> <unit>` reading) into a wide
//! measurement table keyed by timestamp.
//!
//! ## Architecture
//!
//! - [`reader`] - CSV reading and raw record extraction
//! - [`normalizers`] - Unit stripping for values and prefix stripping for names
//! - [`timestamp`] - Day-first timestamp parsing
//! - [`table_builder`] - Deduplication and long-to-wide reshaping
//! - [`stats`] - Build statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metasys_meter::app::services::metasys_parser::MetasysParser;
//! use metasys_meter::SiteConfig;
//!
//! # fn example() -> metasys_meter::Result<()> {
//! let parser = MetasysParser::new(&SiteConfig::default());
//! let result = parser.parse_file(std::path::Path::new("export.csv"))?;
//!
//! println!("{} rows x {} columns", result.stats.rows, result.stats.columns);
//! # Ok(())
//! # }
//! ```

pub mod normalizers;
pub mod reader;
pub mod stats;
pub mod table_builder;
pub mod timestamp;

#[cfg(test)]
pub mod tests;

pub use normalizers::{NameNormalizer, drop_units};
pub use stats::{ParseResult, ParseStats};
pub use table_builder::MetasysParser;
pub use timestamp::parse_timestamp;
