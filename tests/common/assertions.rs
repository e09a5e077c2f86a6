//! Domain-specific assertion macros for dlogs harnesses.
//!
//! These add context-rich failure messages naming the raw line and the stage
//! whose output was wrong.

/// Assert that a record resolved to a specific known severity.
///
/// ```rust
/// assert_severity!(record, Severity::Error);
/// ```
#[macro_export]
macro_rules! assert_severity {
    ($record:expr, $severity:expr) => {{
        let record: &dlogs_core::LogRecord = &$record;
        let expected: dlogs_core::Severity = $severity;
        match &record.level {
            dlogs_core::Level::Known(actual) if *actual == expected => {}
            other => panic!(
                "assert_severity! failed:\n  expected: {:?}\n  actual:   {:?}\n  message: {:?}",
                expected, other, record.message
            ),
        }
    }};
}

/// Assert that a record carries an explicit level outside the severity set.
#[macro_export]
macro_rules! assert_unrecognized_level {
    ($record:expr, $raw:expr) => {{
        let record: &dlogs_core::LogRecord = &$record;
        let expected: &str = $raw;
        match &record.level {
            dlogs_core::Level::Unrecognized(actual) if actual == expected => {}
            other => panic!(
                "assert_unrecognized_level! failed:\n  expected: Unrecognized({:?})\n  actual:   {:?}",
                expected, other
            ),
        }
    }};
}

/// Assert that optional fields fell back to the `-` placeholder.
#[macro_export]
macro_rules! assert_placeholders {
    ($record:expr) => {{
        let record: &dlogs_core::LogRecord = &$record;
        if record.logger != "-" || record.caller != "-" {
            panic!(
                "assert_placeholders! failed: logger={:?} caller={:?}",
                record.logger, record.caller
            );
        }
    }};
}

/// Panic unless `timestamp` is the sentinel or has the canonical shape.
pub fn assert_timestamp_shape(timestamp: &str) {
    let canonical = is_canonical(timestamp);
    assert!(
        timestamp == "?" || canonical,
        "timestamp {timestamp:?} is neither `?` nor YYYY/MM/DD HH:MM:SS.ffffff"
    );
}

fn is_canonical(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 26
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'/',
            10 => *c == b' ',
            13 | 16 => *c == b':',
            19 => *c == b'.',
            _ => c.is_ascii_digit(),
        })
}
