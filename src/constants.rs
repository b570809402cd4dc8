//! Application constants for the Metasys meter processor
//!
//! Defaults for the Andover site, output column names and the fixed header
//! phrasings used in summary files.

// =============================================================================
// Andover Site Defaults
// =============================================================================

/// Name of the default site configuration
pub const DEFAULT_SITE_NAME: &str = "Andover High School";

/// Prefix carried by every variable name exported from the Andover controller
pub const DEFAULT_SITE_PREFIX: &str = "Town Of Andover:AHS-NAE1/FEC Bus2.";

/// Header of the column holding `<number> <unit>` readings
pub const DEFAULT_VALUE_COLUMN: &str = "Object Value";

/// Cost of electricity in $/kWh used when `--cost` is not given
pub const DEFAULT_COST_PER_KWH: f64 = 0.16;

/// Cumulative energy meters summarized for the Andover site, as
/// (column name after prefix stripping, short label) pairs.
pub const DEFAULT_METERS: &[(&str, &str)] = &[
    (
        "MAIN ELECTRIC METER.Analog Inputs.Energy.Main-kWh-Energy (Trend1)",
        "Main",
    ),
    (
        "PANEL DHB ELECTRIC METER.Analog Inputs.Energy.DHB - kWh Total (Trend1)",
        "DHB",
    ),
    (
        "PANEL M1 ELECTRIC METER.Analog Inputs.Energy.M1-kWh-Energy (Trend1)",
        "M1",
    ),
    (
        "PANEL DG ELECTRIC METER.Analog Inputs.Energy.DG-kWh-Energy (Trend1)",
        "DG",
    ),
    (
        "PANEL DE-ATS ELECTRIC METER.Analog Inputs.Energy.DE-ATS-Energy-kWh (Trend1)",
        "DE-ATS",
    ),
    (
        "PANEL COLLINS ELECTRIC METER.Analog Inputs.Energy.CollinCtr-Energy-kWh (Trend1)",
        "Collins",
    ),
    (
        "PANEL DL ELECTRIC METER.Analog Inputs.Energy.DL-Energy-kWh (Trend1)",
        "DL",
    ),
];

// =============================================================================
// Table Layout
// =============================================================================

/// Label of the placeholder column grouping variables without the site prefix
pub const UNPARSED_COLUMN_LABEL: &str = "(unparsed)";

/// Name of the index column in measurement output
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Name of the index column in summary output
pub const DATE_COLUMN: &str = "Date";

/// Suffix of per-meter energy columns in the summary
pub const ENERGY_SUFFIX: &str = " (kWh)";

/// Suffix of per-meter cost columns in the summary
pub const COST_SUFFIX: &str = " ($)";

/// Format of timestamps written to output files
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of bucket dates written to summary files
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of `--start` / `--end` times of day
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

// =============================================================================
// Timestamp Parsing
// =============================================================================

/// ISO layouts, read year-month-day
pub const ISO_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Day-first layouts, tried in order after the ISO layouts
pub const DAY_FIRST_TIMESTAMP_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Date-only day-first layouts (midnight is assumed)
pub const DAY_FIRST_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

// =============================================================================
// Summary Header Phrasings
// =============================================================================

/// Header used when no time window was requested
pub const HEADER_ALL_HOURS: &str = "Usage statistics from all hours of each day";
