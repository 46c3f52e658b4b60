//! Error types for free-finder operations.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreeFinderError {
    #[error("Busy source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed timestamp on line {line}: {value:?}")]
    MalformedTimestamp { line: usize, value: String },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Malformed interval on line {line}: start {start} is not before end {end}")]
    MalformedInterval {
        line: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("No free time found on {date}")]
    NoFreeTimeFound { date: NaiveDate },

    #[error("Invalid working hours: day start {start} is not before day end {end}")]
    InvalidWorkingHours { start: NaiveTime, end: NaiveTime },

    #[error("Date out of range: {date} plus {days} days")]
    DateOutOfRange { date: NaiveDate, days: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FreeFinderError>;
