//! Cell-level normalization of Metasys exports
//!
//! Readings arrive as `<number> <unit>` strings and variable names carry a
//! site-specific prefix. Neither normalizer fails: anything that does not
//! match the expected shape comes back as `None`.

use regex::Regex;
use std::sync::LazyLock;

static VALUE_WITH_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A(\d*\.?\d+) ?[a-zA-Z]*\z").expect("unit pattern is a valid regex")
});

/// Strip the unit from a reading, e.g. `"309.2 kWh"` -> `Some(309.2)`
///
/// Scientific notation and negative numbers are not readings the controller
/// produces and are treated as malformed.
pub fn drop_units(value: &str) -> Option<f64> {
    let captures = VALUE_WITH_UNITS.captures(value)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Strips the site prefix from raw variable names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameNormalizer {
    prefix: String,
}

impl NameNormalizer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The remainder after the prefix, or `None` when the prefix is absent
    pub fn drop_prefix(&self, variable: &str) -> Option<String> {
        variable.strip_prefix(&self.prefix).map(str::to_string)
    }
}
