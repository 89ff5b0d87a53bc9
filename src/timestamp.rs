//! Decoding and rendering of ANSI C timestamps (`Mon Jan  2 15:04:05 2006`).

use chrono::{DateTime, NaiveDateTime, Utc, Weekday};

use crate::error::TimeClientError;

/// ANSI C layout as rendered: day of month padded with a space.
pub const ANSIC_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

// Parsed against whitespace-normalised input, so the day needs no padding.
const ANSIC_PARSE_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

// Same layout once the weekday field has been split off.
const DATE_TIME_PARSE_FORMAT: &str = "%b %d %H:%M:%S %Y";

/// Removes one pair of surrounding double quotes, if both are present.
pub fn strip_quotes(body: &str) -> &str {
    body.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(body)
}

/// Parses a response body into a UTC timestamp.
///
/// Accepts both the plain-text form and a JSON string literal of the same
/// value. The weekday must be a weekday name but need not match the date.
/// The format has no zone, so the result is taken as UTC.
pub fn parse_timestamp(body: &str) -> Result<DateTime<Utc>, TimeClientError> {
    let mut fields = strip_quotes(body.trim()).split_whitespace();
    let weekday = fields.next().unwrap_or_default();
    let rest = fields.collect::<Vec<_>>().join(" ");

    let parsed = if weekday.parse::<Weekday>().is_ok() {
        NaiveDateTime::parse_from_str(&rest, DATE_TIME_PARSE_FORMAT)
    } else {
        // Fails on the weekday field and reports chrono's error for it.
        NaiveDateTime::parse_from_str(&format!("{} {}", weekday, rest), ANSIC_PARSE_FORMAT)
    };

    parsed
        .map(|naive| naive.and_utc())
        .map_err(|source| TimeClientError::Parse {
            body: body.to_string(),
            source,
        })
}

/// Renders a timestamp in ANSI C format.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(ANSIC_FORMAT).to_string()
}
