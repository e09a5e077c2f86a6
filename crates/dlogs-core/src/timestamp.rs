//! Timestamp normalisation into the canonical `YYYY/MM/DD HH:MM:SS.ffffff`.
//!
//! An extracted `t=`/`ts=`/`time=` token is parsed as ISO-8601; when it does
//! not parse, the raw token is displayed instead. Lines without such a token
//! are searched for a syslog/`date(1)` style stamp such as
//! `Fri Apr 11 16:44:22 WIB 2025`. Lines with neither show [`TIMESTAMP_SENTINEL`].

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Weekday};
use regex::Regex;

use crate::types::TIMESTAMP_SENTINEL;

/// Output format. `%.6f` includes the leading dot and truncates to microseconds.
pub const CANONICAL_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

// <Wkdy> <Mon> <D> HH:MM:SS <TZ> <YYYY>; the zone name is matched but ignored.
static SYSLOG_STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\w{3}) (\w{3}) (\d{1,2}) (\d{2}:\d{2}:\d{2}) \w+ (\d{4})\b")
        .expect("syslog timestamp pattern is valid")
});

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 token and render it canonically.
///
/// A trailing `Z` means `+00:00` and an hour-only offset such as `+07` means
/// `+07:00`. Offset-bearing values are shown in their own offset, not
/// converted to UTC. Second `60` is rejected.
pub fn parse_iso(token: &str) -> Option<String> {
    let token = token.replace('Z', "+00:00");
    let dt = parse_wall_clock(&expand_hour_offset(&token))?;
    // chrono represents a leap second as nanos past 1e9.
    if dt.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(dt.format(CANONICAL_FORMAT).to_string())
}

fn parse_wall_clock(token: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(token, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `...T16:44:22+07` → `...T16:44:22+07:00`. Only the time part is looked at,
/// so the day of a bare date is never mistaken for an offset.
fn expand_hour_offset(token: &str) -> Cow<'_, str> {
    let time = token.get(11..).unwrap_or_default().as_bytes();
    let n = time.len();
    if n > 3 && matches!(time[n - 3], b'+' | b'-') && time[n - 2..].iter().all(u8::is_ascii_digit) {
        Cow::Owned(format!("{token}:00"))
    } else {
        Cow::Borrowed(token)
    }
}

/// Normalise an extracted token, falling back to the token itself.
pub fn normalize_token(token: &str) -> String {
    parse_iso(token).unwrap_or_else(|| {
        tracing::trace!(token, "timestamp token is not ISO-8601; displaying raw");
        token.to_string()
    })
}

/// Search `text` for a syslog-style stamp.
///
/// Returns `None` when the shape is absent. When the shape matches but the
/// fields do not form a valid date, the matched text is returned verbatim.
pub fn syslog_timestamp(text: &str) -> Option<String> {
    let caps = SYSLOG_STAMP.captures(text)?;
    let parsed = caps[1]
        .parse::<Weekday>()
        .ok()
        .and_then(|_| {
            let joined = format!("{} {} {} {}", &caps[2], &caps[3], &caps[4], &caps[5]);
            NaiveDateTime::parse_from_str(&joined, "%b %d %H:%M:%S %Y").ok()
        })
        .map(|dt| dt.format("%Y/%m/%d %H:%M:%S.000000").to_string());

    Some(parsed.unwrap_or_else(|| caps[0].to_string()))
}

/// Resolve the display timestamp for a line.
///
/// Only ever applied to raw input: the canonical output shape is not itself a
/// recognised input, so re-normalising a rendered timestamp yields `?`.
pub fn resolve(token: Option<&str>, content: &str) -> String {
    match token {
        Some(token) => normalize_token(token),
        None => syslog_timestamp(content).unwrap_or_else(|| TIMESTAMP_SENTINEL.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
