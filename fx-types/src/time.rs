//! Epoch interpretation and display formatting for instants.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Display pattern for all formatted instants. Sub-second precision is not
/// rendered.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Provider epoch values at or above this are taken as milliseconds; below
/// it, as seconds. 100_000_000_000 seconds is year 5138, 100_000_000_000
/// milliseconds is March 1973, so real timestamps of either unit classify
/// correctly.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Interprets a provider-reported epoch value as an instant.
///
/// The provider normally emits 10-digit second counts. 13-digit millisecond
/// counts are accepted too rather than being misread as a far-future second
/// count. Returns `None` for values outside chrono's representable range.
pub fn instant_from_provider_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.abs() >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

/// Formats an instant as `yyyy-MM-dd HH:mm:ss` in the system-local timezone.
pub fn format_local(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format(DATE_TIME_FORMAT)
        .to_string()
}

/// Returns the half-open `[start, end)` UTC bounds of a calendar day, for
/// day-equality comparisons against transaction instants.
pub fn utc_day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    (start, start + TimeDelta::days(1))
}
