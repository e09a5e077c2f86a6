//! Core types for dlogs-core.
//!
//! This module defines the data structures shared by every pipeline stage:
//! the per-line [`LogRecord`], the closed [`Severity`] set, and the resolved
//! [`Level`] a record carries.

use phf::phf_map;
use serde::Serialize;

/// Placeholder shown for an absent logger or caller.
pub const PLACEHOLDER: &str = "-";

/// Display value for a line whose timestamp could not be determined.
pub const TIMESTAMP_SENTINEL: &str = "?";

/// Log severity level. The set is closed; every record resolves to one of
/// these unless it carries an explicit but unrecognised `level=` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Debug,
    Error,
    Warning,
    Notice,
    Alert,
    Emergency,
    Critical,
}

static SEVERITY_NAMES: phf::Map<&'static str, Severity> = phf_map! {
    "info" => Severity::Info,
    "debug" => Severity::Debug,
    "error" => Severity::Error,
    "warning" => Severity::Warning,
    "notice" => Severity::Notice,
    "alert" => Severity::Alert,
    "emergency" => Severity::Emergency,
    "critical" => Severity::Critical,
};

impl Severity {
    /// All severities, in style-table order.
    pub const ALL: [Severity; 8] = [
        Severity::Info,
        Severity::Debug,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Alert,
        Severity::Emergency,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Alert => "alert",
            Severity::Emergency => "emergency",
            Severity::Critical => "critical",
        }
    }

    /// Look up a severity by its exact lower-case name.
    pub fn from_name(name: &str) -> Option<Severity> {
        SEVERITY_NAMES.get(name).copied()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::from_name(&s.to_ascii_lowercase())
            .ok_or_else(|| crate::Error::UnknownSeverity(s.to_string()))
    }
}

/// The level a record resolved to.
///
/// Keyword inference and the `info` default only ever produce `Known`. An
/// explicit `level=` tag outside the severity set is kept verbatim as
/// `Unrecognized` and renders without a style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Level {
    Known(Severity),
    Unrecognized(String),
}

impl Level {
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Level::Known(s) => Some(*s),
            Level::Unrecognized(_) => None,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Known(Severity::Info)
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        Level::Known(severity)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Known(s) => s.fmt(f),
            Level::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// The structured result of parsing one input line.
///
/// Created fresh per line and dropped once the sink has consumed it. Every
/// field is populated; absent values use [`PLACEHOLDER`] or
/// [`TIMESTAMP_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Text before the first `|`, or before the first `:` when there is no pipe.
    pub app_name: String,
    pub logger: String,
    pub caller: String,
    /// Canonical `YYYY/MM/DD HH:MM:SS.ffffff`, the raw token when it did not
    /// parse, or `?`.
    pub timestamp: String,
    pub level: Level,
    /// Content with every recognised `key=value` token removed, trimmed.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names_round_trip_through_table() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_name(severity.as_str()), Some(severity));
        }
    }

    #[test]
    fn from_name_is_exact() {
        assert_eq!(Severity::from_name("warn"), None);
        assert_eq!(Severity::from_name("ERROR"), None);
    }

    #[test]
    fn from_str_ignores_case() {
        assert_eq!("Critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn level_display() {
        assert_eq!(Level::Known(Severity::Alert).to_string(), "alert");
        assert_eq!(Level::Unrecognized("trace".into()).to_string(), "trace");
        assert_eq!(Level::default(), Level::Known(Severity::Info));
    }

    #[test]
    fn record_serializes_level_as_plain_string() {
        let record = LogRecord {
            app_name: "api".into(),
            logger: PLACEHOLDER.into(),
            caller: PLACEHOLDER.into(),
            timestamp: TIMESTAMP_SENTINEL.into(),
            level: Level::Known(Severity::Warning),
            message: "slow".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["app_name"], "api");
    }
}
