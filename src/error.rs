//! Error type shared by the editors, the grid builder and the CLI.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Week offset outside 0-6.
    #[error("Invalid week offset: {0} (must be 0-6)")]
    WeekOffsetOutOfRange(u32),

    /// The grid builder was given a date that is not the first of a month.
    #[error("{0} is not the first day of a month")]
    NotMonthStart(NaiveDate),

    /// Date arithmetic left the range chrono can represent.
    #[error("Date out of range")]
    DateOutOfRange,

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    /// A date format pattern that cannot be used.
    #[error("Invalid date format `{format}`: {reason}")]
    InvalidFormat { format: String, reason: String },

    /// A value that does not match what the editor expects.
    #[error("Cannot parse `{value}` as `{format}`")]
    Parse { value: String, format: String },

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Slot {0} is not available")]
    SlotUnavailable(NaiveDateTime),

    /// Conflicting or malformed command-line usage.
    #[error("{0}")]
    Usage(String),
}
