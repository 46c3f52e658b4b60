//! `free-finder` CLI — report the longest free period for each of the next
//! seven days, given a file of busy records.
//!
//! ## Usage
//!
//! ```sh
//! # Busy records from a file, report on stdout
//! free-finder -i calendar.csv
//!
//! # Pin the clock for a reproducible report
//! free-finder -i calendar.csv --now "2024-03-01 10:00:00"
//!
//! # Records on stdin, JSON out, bad lines skipped
//! cat calendar.csv | free-finder --format json --skip-malformed
//!
//! # Custom working day
//! free-finder -i calendar.csv --day-start 09:00 --day-end 17:30
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::{Parser, ValueEnum};
use free_finder::report::{render_json, render_text};
use free_finder::source::TIMESTAMP_FORMAT;
use free_finder::{
    find_weekly_free_time, parse_busy_intervals, read_busy_intervals, Interval, MalformedPolicy,
    WorkingHours,
};
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "free-finder",
    version,
    about = "Longest free working-hours period for each of the next seven days"
)]
struct Cli {
    /// Busy-record file, one `label, start, end` per line (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Reference time as "YYYY-MM-DD HH:MM:SS" (defaults to the local clock)
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// Start of the working day, HH:MM
    #[arg(long, default_value = "08:00", value_parser = parse_clock)]
    day_start: NaiveTime,

    /// End of the working day, HH:MM
    #[arg(long, default_value = "22:00", value_parser = parse_clock)]
    day_end: NaiveTime,

    /// Skip malformed records instead of aborting the run
    #[arg(long)]
    skip_malformed: bool,

    /// Fail if any day has no free time
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let hours = WorkingHours::new(cli.day_start, cli.day_end)?;
    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());
    let policy = if cli.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Abort
    };

    let external = load_busy(cli.input.as_deref(), policy)?;
    info!(%now, busy = external.len(), "computing weekly free time");

    let report = find_weekly_free_time(now, &hours, &external)
        .with_context(|| format!("Cannot cover the week after {}", now))?;

    if cli.strict {
        for entry in &report.entries {
            entry.require_longest().context("--strict requires free time on every day")?;
        }
    }

    let rendered = match cli.format {
        Format::Text => render_text(&report),
        Format::Json => render_json(&report).context("Failed to render report as JSON")?,
    };

    write_output(cli.output.as_deref(), &rendered)
}

/// Log to stderr so stdout carries only the report.
fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("free_finder={},warn", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_now(value: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD HH:MM:SS: {}", e))
}

fn parse_clock(value: &str) -> std::result::Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
}

fn load_busy(path: Option<&str>, policy: MalformedPolicy) -> Result<Vec<Interval>> {
    match path {
        Some(path) => read_busy_intervals(path, policy)
            .with_context(|| format!("Failed to load busy records from {}", path)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            parse_busy_intervals(&buf, policy).context("Failed to parse busy records from stdin")
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
