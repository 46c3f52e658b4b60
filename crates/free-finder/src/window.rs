//! The meeting envelope for the coming week and the standing night-time busy
//! blocks that apply regardless of any calendar data.
//!
//! For a reference time `now` on day `D`, the envelope runs from `D+1` at the
//! working-day start to `D+7` at the working-day end. Each of the nights
//! `D+1 .. D+7` is busy from the working-day end until the next morning's
//! working-day start.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FreeFinderError, Result};
use crate::interval::Interval;

/// Number of calendar days covered by the envelope, starting tomorrow.
pub const DAYS_AHEAD: u64 = 7;

const DEFAULT_DAY_START: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

const DEFAULT_DAY_END: NaiveTime = match NaiveTime::from_hms_opt(22, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Daily working-hours bounds within which meetings may be scheduled.
///
/// Deserialization goes through [`WorkingHours::new`], so `day_start < day_end`
/// holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkingHours")]
pub struct WorkingHours {
    day_start: NaiveTime,
    day_end: NaiveTime,
}

impl WorkingHours {
    /// # Errors
    /// Returns `FreeFinderError::InvalidWorkingHours` unless `day_start < day_end`.
    pub fn new(day_start: NaiveTime, day_end: NaiveTime) -> Result<Self> {
        if day_start >= day_end {
            return Err(FreeFinderError::InvalidWorkingHours {
                start: day_start,
                end: day_end,
            });
        }
        Ok(Self { day_start, day_end })
    }

    pub fn day_start(&self) -> NaiveTime {
        self.day_start
    }

    pub fn day_end(&self) -> NaiveTime {
        self.day_end
    }
}

#[derive(Deserialize)]
struct RawWorkingHours {
    day_start: NaiveTime,
    day_end: NaiveTime,
}

impl TryFrom<RawWorkingHours> for WorkingHours {
    type Error = FreeFinderError;

    fn try_from(raw: RawWorkingHours) -> Result<Self> {
        Self::new(raw.day_start, raw.day_end)
    }
}

impl Default for WorkingHours {
    /// 08:00 to 22:00.
    fn default() -> Self {
        Self {
            day_start: DEFAULT_DAY_START,
            day_end: DEFAULT_DAY_END,
        }
    }
}

/// The envelope plus the standing busy intervals derived from one `now`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub envelope: Interval,
    /// One interval per night, in chronological order.
    pub standing_busy: Vec<Interval>,
}

/// `base` plus `days` calendar days.
///
/// # Errors
/// Returns `FreeFinderError::DateOutOfRange` past the end of the calendar.
pub(crate) fn add_days(base: NaiveDate, days: u64) -> Result<NaiveDate> {
    base.checked_add_days(Days::new(days))
        .ok_or(FreeFinderError::DateOutOfRange { date: base, days })
}

/// Build the window for `now` using the default 08:00–22:00 working hours.
///
/// # Errors
/// Returns `FreeFinderError::DateOutOfRange` when `now` is within eight days of
/// the last representable date.
pub fn build_window(now: NaiveDateTime) -> Result<AvailabilityWindow> {
    build_window_with(now, &WorkingHours::default())
}

/// Build the window for `now` using the given working hours.
///
/// # Errors
/// Same as [`build_window`].
pub fn build_window_with(now: NaiveDateTime, hours: &WorkingHours) -> Result<AvailabilityWindow> {
    let base = now.date();

    let envelope = Interval::new(
        add_days(base, 1)?.and_time(hours.day_start),
        add_days(base, DAYS_AHEAD)?.and_time(hours.day_end),
    );

    let standing_busy = (1..=DAYS_AHEAD)
        .map(|k| {
            Ok(Interval::new(
                add_days(base, k)?.and_time(hours.day_end),
                add_days(base, k + 1)?.and_time(hours.day_start),
            ))
        })
        .collect::<Result<Vec<Interval>>>()?;

    debug!(
        envelope_start = %envelope.start,
        envelope_end = %envelope.end,
        nights = standing_busy.len(),
        "built availability window"
    );

    Ok(AvailabilityWindow {
        envelope,
        standing_busy,
    })
}
