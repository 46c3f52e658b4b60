//! Compute the longest free gap per day from a busy set.
//!
//! Busy intervals are filtered to those overlapping the envelope, sorted by
//! start time, then swept with a cursor. Every gap between the cursor and the
//! next busy interval is filed under the weekday on which it starts. The
//! longest gap in each weekday bucket becomes that day's report entry.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FreeFinderError, Result};
use crate::interval::Interval;
use crate::window::{add_days, build_window_with, WorkingHours, DAYS_AHEAD};

/// Free gaps grouped by the weekday on which each gap starts.
///
/// Within a bucket, gaps are kept in the order the sweep produced them, which
/// is chronological.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeBuckets {
    by_day: HashMap<Weekday, Vec<Interval>>,
}

impl FreeBuckets {
    fn push(&mut self, gap: Interval) {
        self.by_day.entry(gap.weekday()).or_default().push(gap);
    }

    /// Gaps starting on `day`; empty when the sweep found none.
    pub fn get(&self, day: Weekday) -> &[Interval] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of gaps across all weekdays.
    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The longest free gap found for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// `None` when the day's bucket was empty.
    pub longest: Option<Interval>,
}

impl ReportEntry {
    /// The day's longest gap, or `FreeFinderError::NoFreeTimeFound`.
    pub fn require_longest(&self) -> Result<Interval> {
        self.longest
            .ok_or(FreeFinderError::NoFreeTimeFound { date: self.date })
    }
}

/// One entry per calendar day from `now + 1` to `now + 7`, ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub envelope: Interval,
    pub entries: Vec<ReportEntry>,
}

impl WeeklyReport {
    /// Dates whose entry carries no free gap.
    pub fn days_without_free_time(&self) -> Vec<NaiveDate> {
        self.entries
            .iter()
            .filter(|e| e.longest.is_none())
            .map(|e| e.date)
            .collect()
    }
}

/// Keep the well-formed busy intervals that overlap the envelope, sorted by start.
///
/// The sort is stable, so intervals sharing a start keep their input order.
fn sorted_busy_within(envelope: &Interval, busy: &[Interval]) -> Vec<Interval> {
    let mut kept: Vec<Interval> = busy
        .iter()
        .filter(|b| {
            if !b.is_well_formed() {
                warn!(start = %b.start, end = %b.end, "discarding malformed busy interval");
                return false;
            }
            envelope.overlaps(b)
        })
        .copied()
        .collect();

    kept.sort_by_key(|b| b.start);
    kept
}

/// Sweep the busy set across the envelope and bucket the free gaps by weekday.
///
/// The cursor starts at `envelope.start` and only ever moves forward, so a busy
/// interval nested inside an earlier one cannot reopen time already covered.
/// The gap between the last busy interval and `envelope.end` is included.
pub fn sweep_free_gaps(envelope: &Interval, busy: &[Interval]) -> FreeBuckets {
    let sorted = sorted_busy_within(envelope, busy);

    let mut buckets = FreeBuckets::default();
    let mut cursor = envelope.start;

    for b in &sorted {
        if b.start > cursor {
            buckets.push(Interval::new(cursor, b.start));
        }
        cursor = cursor.max(b.end);
    }

    // Trailing gap after the last busy interval.
    if cursor < envelope.end {
        buckets.push(Interval::new(cursor, envelope.end));
    }

    debug!(
        busy = sorted.len(),
        discarded = busy.len() - sorted.len(),
        gaps = buckets.len(),
        "swept busy intervals"
    );

    buckets
}

/// The longest gap by whole-second duration. Ties go to the earliest in the slice.
pub fn longest_gap(gaps: &[Interval]) -> Option<Interval> {
    gaps.iter().copied().reduce(|best, gap| {
        if gap.duration_seconds() > best.duration_seconds() {
            gap
        } else {
            best
        }
    })
}

/// Compute the per-day report for the seven days after `now`.
///
/// `busy` should contain every busy interval to honour, standing nights
/// included; intervals that do not overlap `envelope` are ignored.
///
/// # Errors
/// Returns `FreeFinderError::DateOutOfRange` when a report date would fall
/// past the last representable date.
pub fn compute_weekly_free_report(
    now: NaiveDateTime,
    envelope: &Interval,
    busy: &[Interval],
) -> Result<WeeklyReport> {
    let buckets = sweep_free_gaps(envelope, busy);
    let base = now.date();

    let entries = (1..=DAYS_AHEAD)
        .map(|k| {
            let date = add_days(base, k)?;
            let weekday = date.weekday();
            Ok(ReportEntry {
                date,
                weekday,
                longest: longest_gap(buckets.get(weekday)),
            })
        })
        .collect::<Result<Vec<ReportEntry>>>()?;

    Ok(WeeklyReport {
        envelope: *envelope,
        entries,
    })
}

/// Build the window for `now`, add the caller's busy intervals to the standing
/// nights, and compute the report.
///
/// # Errors
/// Returns `FreeFinderError::DateOutOfRange` when `now` is too close to the
/// last representable date to cover a week.
pub fn find_weekly_free_time(
    now: NaiveDateTime,
    hours: &WorkingHours,
    external: &[Interval],
) -> Result<WeeklyReport> {
    let window = build_window_with(now, hours)?;

    let mut busy = window.standing_busy;
    busy.extend_from_slice(external);

    compute_weekly_free_report(now, &window.envelope, &busy)
}
