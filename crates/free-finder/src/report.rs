//! Render a [`WeeklyReport`] for people or for other programs.

use crate::engine::{ReportEntry, WeeklyReport};
use crate::error::Result;

pub const REPORT_HEADER: &str =
    "Here are the longest free periods over the week starting TOMORROW:";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// One line for one day, without a trailing newline.
pub fn render_entry(entry: &ReportEntry) -> String {
    let date = entry.date.format(DATE_FORMAT);
    match entry.longest {
        Some(gap) => format!(
            "On {}, the largest available free period is between: {}, {}",
            date,
            gap.start.format(TIME_FORMAT),
            gap.end.format(TIME_FORMAT)
        ),
        None => format!("On {}, no free time was found.", date),
    }
}

/// The header followed by one line per day, each newline terminated.
pub fn render_text(report: &WeeklyReport) -> String {
    let mut out = String::new();
    out.push_str(REPORT_HEADER);
    out.push('\n');
    for entry in &report.entries {
        out.push_str(&render_entry(entry));
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON.
pub fn render_json(report: &WeeklyReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
