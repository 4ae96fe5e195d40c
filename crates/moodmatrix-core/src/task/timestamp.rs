//! Lenient timestamp parsing.
//!
//! Accepts RFC 3339 (converted into the target zone), naive ISO-8601
//! date-times as emitted by the backend (read as local wall time), and bare
//! dates (local midnight). Everything else yields `None`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse `raw` into a local wall-clock timestamp.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    parse_timestamp_in(raw, &Local)
}

/// Parse `raw`, converting zoned timestamps into `tz`.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Some(zoned.with_timezone(tz).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Convert epoch milliseconds (JavaScript `Date` numbers) into `tz` wall time.
pub fn from_epoch_millis_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(tz).naive_local())
}
