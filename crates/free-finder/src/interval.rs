//! The `Interval` value type shared by every stage of the pipeline.

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// A span of local wall-clock time, `start` to `end`.
///
/// Construction does not check `start < end`; use [`Interval::is_well_formed`]
/// where that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole seconds. Maximum selection compares at this resolution.
    pub fn duration_seconds(&self) -> i64 {
        self.duration().num_seconds()
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Intervals that merely touch at a boundary do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Day of the week on which the interval starts.
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }
}
