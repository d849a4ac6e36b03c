//! Internal helpers for request parsing and normalization.
//!
//! These utilities are **not** part of the public API. They keep the
//! accepted input formats identical across every operation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Which end of a day a plain date resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DayBound {
    Start,
    End,
}

/// Parses a timestamp from user input.
///
/// Accepted forms, in order:
/// - RFC3339 with offset (`2025-03-01T10:00:00+02:00`), converted to UTC
/// - naive ISO date-time (`2025-03-01T10:00:00`, optional fraction), read as UTC
/// - plain date (`2025-03-01`), resolved to the start or end of that UTC day
pub(crate) fn parse_timestamp(value: &str, bound: DayBound) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let time = match bound {
            DayBound::Start => NaiveTime::MIN,
            DayBound::End => NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
                .ok_or_else(|| "invalid end of day".to_string())?,
        };
        return Ok(date.and_time(time).and_utc());
    }
    Err(format!("Invalid date-time: {value}"))
}

/// Trims the value and drops it when blank.
pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
