//! Wall-clock helpers for notification stamps.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use time::OffsetDateTime;
use time::macros::format_description;

/// Current UTC time as an ISO-8601 string with millisecond precision.
pub fn now_iso() -> String {
    format_iso(OffsetDateTime::now_utc())
}

/// Format `at` as `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
pub fn format_iso(at: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
    at.to_offset(time::UtcOffset::UTC).format(&format).unwrap_or_default()
}
