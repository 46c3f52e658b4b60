//! Parse busy records into intervals.
//!
//! Each non-blank line is one record, comma separated. A record is either
//! `start, end` or `label, start, end[, ...]`; timestamps use
//! `YYYY-MM-DD HH:MM:SS` local time. Lines beginning with `#` are comments.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FreeFinderError, Result};
use crate::interval::Interval;

/// Timestamp layout expected in every record.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What to do with a record that cannot be turned into a valid interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MalformedPolicy {
    /// Stop at the first bad record and return its error.
    #[default]
    Abort,
    /// Log the bad record and keep going.
    Skip,
}

/// Parse one timestamp field.
pub fn parse_timestamp(value: &str, line: usize) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        FreeFinderError::MalformedTimestamp {
            line,
            value: value.to_string(),
        }
    })
}

fn parse_record(record: &str, line: usize) -> Result<Interval> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();

    let (start, end) = match fields.as_slice() {
        [start, end] => (*start, *end),
        [_label, start, end, ..] => (*start, *end),
        _ => {
            return Err(FreeFinderError::MalformedRecord {
                line,
                reason: format!("expected at least 2 fields, found {}", fields.len()),
            })
        }
    };

    let interval = Interval::new(parse_timestamp(start, line)?, parse_timestamp(end, line)?);

    if !interval.is_well_formed() {
        return Err(FreeFinderError::MalformedInterval {
            line,
            start: interval.start,
            end: interval.end,
        });
    }

    Ok(interval)
}

/// Parse every record in `input`. Line numbers in errors are 1-based.
///
/// # Errors
/// With `MalformedPolicy::Abort`, returns the first `MalformedRecord`,
/// `MalformedTimestamp`, or `MalformedInterval` encountered.
pub fn parse_busy_intervals(input: &str, policy: MalformedPolicy) -> Result<Vec<Interval>> {
    let mut intervals = Vec::new();
    let mut skipped = 0usize;

    for (idx, raw) in input.lines().enumerate() {
        let record = raw.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        match parse_record(record, idx + 1) {
            Ok(interval) => intervals.push(interval),
            Err(err) => match policy {
                MalformedPolicy::Abort => return Err(err),
                MalformedPolicy::Skip => {
                    warn!(error = %err, "skipping busy record");
                    skipped += 1;
                }
            },
        }
    }

    debug!(parsed = intervals.len(), skipped, "parsed busy records");
    Ok(intervals)
}

/// Read and parse a busy-record file.
///
/// # Errors
/// Returns `FreeFinderError::SourceUnavailable` if the file cannot be read,
/// otherwise whatever [`parse_busy_intervals`] returns.
pub fn read_busy_intervals(
    path: impl AsRef<Path>,
    policy: MalformedPolicy,
) -> Result<Vec<Interval>> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).map_err(|source| FreeFinderError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    parse_busy_intervals(&text, policy)
}
