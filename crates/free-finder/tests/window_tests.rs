//! Tests for the availability window: envelope bounds and standing nights.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use free_finder::error::FreeFinderError;
use free_finder::window::{build_window, build_window_with, WorkingHours};

fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

fn clock(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap()
}

#[test]
fn envelope_spans_tomorrow_morning_to_seventh_evening() {
    // 2024-03-01 is a Friday.
    let window = build_window(ts(2024, 3, 1, 10, 0, 0)).unwrap();

    assert_eq!(window.envelope.start, ts(2024, 3, 2, 8, 0, 0));
    assert_eq!(window.envelope.end, ts(2024, 3, 8, 22, 0, 0));
}

#[test]
fn seven_standing_nights_of_ten_hours() {
    let window = build_window(ts(2024, 3, 1, 10, 0, 0)).unwrap();

    assert_eq!(window.standing_busy.len(), 7);
    for night in &window.standing_busy {
        assert_eq!(night.duration_seconds(), 10 * 3600);
        assert_eq!(night.start.time(), clock(22, 0));
        assert_eq!(night.end.time(), clock(8, 0));
    }

    assert_eq!(window.standing_busy[0].start, ts(2024, 3, 2, 22, 0, 0));
    assert_eq!(window.standing_busy[0].end, ts(2024, 3, 3, 8, 0, 0));
    assert_eq!(window.standing_busy[6].start, ts(2024, 3, 8, 22, 0, 0));
    assert_eq!(window.standing_busy[6].end, ts(2024, 3, 9, 8, 0, 0));
}

#[test]
fn standing_nights_are_chronological_and_disjoint() {
    let window = build_window(ts(2024, 3, 1, 10, 0, 0)).unwrap();

    for pair in window.standing_busy.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }
}

#[test]
fn time_of_day_of_now_does_not_matter() {
    let early = build_window(ts(2024, 3, 1, 0, 0, 0)).unwrap();
    let late = build_window(ts(2024, 3, 1, 23, 59, 59)).unwrap();

    assert_eq!(early, late);
}

#[test]
fn window_rolls_over_month_and_year() {
    let window = build_window(ts(2024, 12, 28, 9, 30, 0)).unwrap();

    assert_eq!(window.envelope.start, ts(2024, 12, 29, 8, 0, 0));
    assert_eq!(window.envelope.end, ts(2025, 1, 4, 22, 0, 0));
    assert_eq!(window.standing_busy[6].end, ts(2025, 1, 5, 8, 0, 0));
}

#[test]
fn window_includes_leap_day() {
    let window = build_window(ts(2024, 2, 27, 12, 0, 0)).unwrap();

    assert!(window
        .standing_busy
        .iter()
        .any(|night| night.start == ts(2024, 2, 29, 22, 0, 0)));
    assert_eq!(window.envelope.end, ts(2024, 3, 5, 22, 0, 0));
}

#[test]
fn custom_working_hours_shape_envelope_and_nights() {
    let hours = WorkingHours::new(clock(9, 0), clock(17, 30)).unwrap();
    let window = build_window_with(ts(2024, 3, 1, 10, 0, 0), &hours).unwrap();

    assert_eq!(window.envelope.start, ts(2024, 3, 2, 9, 0, 0));
    assert_eq!(window.envelope.end, ts(2024, 3, 8, 17, 30, 0));
    assert_eq!(window.standing_busy[0].start, ts(2024, 3, 2, 17, 30, 0));
    assert_eq!(window.standing_busy[0].end, ts(2024, 3, 3, 9, 0, 0));
    assert_eq!(window.standing_busy[0].duration_seconds(), 15 * 3600 + 30 * 60);
}

#[test]
fn default_working_hours_are_eight_to_ten() {
    let hours = WorkingHours::default();
    assert_eq!(hours.day_start(), clock(8, 0));
    assert_eq!(hours.day_end(), clock(22, 0));
}

#[test]
fn inverted_working_hours_are_rejected() {
    let err = WorkingHours::new(clock(18, 0), clock(9, 0)).unwrap_err();
    assert!(matches!(err, FreeFinderError::InvalidWorkingHours { .. }));

    let err = WorkingHours::new(clock(9, 0), clock(9, 0)).unwrap_err();
    assert!(matches!(err, FreeFinderError::InvalidWorkingHours { .. }));
}

#[test]
fn deserialized_working_hours_are_validated() {
    let err = serde_json::from_str::<WorkingHours>(r#"{"day_start":"22:00:00","day_end":"08:00:00"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("Invalid working hours"));

    let hours: WorkingHours =
        serde_json::from_str(r#"{"day_start":"09:00:00","day_end":"17:30:00"}"#).unwrap();
    assert_eq!(hours, WorkingHours::new(clock(9, 0), clock(17, 30)).unwrap());
}

#[test]
fn working_hours_survive_serialization() {
    let hours = WorkingHours::new(clock(7, 30), clock(19, 0)).unwrap();

    let json = serde_json::to_string(&hours).unwrap();
    let back: WorkingHours = serde_json::from_str(&json).unwrap();

    assert_eq!(back, hours);
}

#[test]
fn window_at_end_of_calendar_is_out_of_range() {
    let now = NaiveDate::MAX.and_hms_opt(10, 0, 0).unwrap();

    let err = build_window(now).unwrap_err();

    assert!(matches!(err, FreeFinderError::DateOutOfRange { .. }));
}

#[test]
fn window_needs_eight_days_of_calendar_headroom() {
    // The last standing night ends on `now + 8` days.
    let last = NaiveDate::MAX;
    let too_close = (last - chrono::Days::new(7)).and_hms_opt(10, 0, 0).unwrap();
    let just_fits = (last - chrono::Days::new(8)).and_hms_opt(10, 0, 0).unwrap();

    assert!(matches!(
        build_window(too_close),
        Err(FreeFinderError::DateOutOfRange { .. })
    ));
    let window = build_window(just_fits).unwrap();
    assert_eq!(window.standing_busy[6].end.date(), last);
}
