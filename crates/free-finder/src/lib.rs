//! # free-finder
//!
//! Finds the longest block of free working-hours time for each of the next
//! seven calendar days, given an arbitrary list of busy intervals.
//!
//! ## Modules
//!
//! - [`interval`] — The `Interval` value type
//! - [`window`] — The meeting envelope and standing night-time busy blocks
//! - [`engine`] — Filter, sort, sweep, weekday buckets, and per-day maxima
//! - [`source`] — Parse `label, start, end` busy records
//! - [`report`] — Render a weekly report as text or JSON
//! - [`error`] — Error types

pub mod engine;
pub mod error;
pub mod interval;
pub mod report;
pub mod source;
pub mod window;

pub use engine::{
    compute_weekly_free_report, find_weekly_free_time, longest_gap, sweep_free_gaps, FreeBuckets,
    ReportEntry, WeeklyReport,
};
pub use error::FreeFinderError;
pub use interval::Interval;
pub use source::{parse_busy_intervals, read_busy_intervals, MalformedPolicy};
pub use window::{build_window, build_window_with, AvailabilityWindow, WorkingHours};
