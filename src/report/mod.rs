//! Result output: CSV files and console summaries.
//!
//! * [write_tally_csv] - one row per (SOI, A, B) key, in tally order
//! * [write_verdict_log] - one row per verdict
//! * [RunBanner], [RunOverview], [TallySummary] - console text via [Display](std::fmt::Display)

pub mod csv;
pub mod summary;

pub use csv::{CsvWriter, escape_field, tally_header, write_tally_csv, write_verdict_log};
pub use summary::{RunBanner, RunOverview, TallySummary};
