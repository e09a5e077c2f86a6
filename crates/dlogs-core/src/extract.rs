//! Field extraction.
//!
//! A line's content is run through an ordered table of [`FieldRule`]s. Each
//! rule owns one pattern whose first capture group is the field value, plus a
//! post-processor applied to the captured text. Rules are independent: any
//! subset may match, and a miss simply leaves the field empty.

use std::borrow::Cow;

use regex::Regex;

use crate::config::ParserOptions;
use crate::Error;

/// Keys that introduce a timestamp token.
pub const TIMESTAMP_KEYS: &[&str] = &["t", "ts", "time"];
pub const LEVEL_KEY: &str = "level";
pub const LOGGER_KEY: &str = "logger";

/// The fields a rule can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Timestamp,
    Level,
    Logger,
    Caller,
}

/// One extraction rule: `(field, pattern, post-processor)`.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: Field,
    pub pattern: Regex,
    pub post: fn(&str) -> Cow<'_, str>,
}

impl FieldRule {
    /// Apply the rule to `content`, returning the post-processed capture.
    pub fn apply<'a>(&self, content: &'a str) -> Option<Cow<'a, str>> {
        let caps = self.pattern.captures(content)?;
        caps.get(1).map(|m| (self.post)(m.as_str()))
    }
}

fn verbatim(s: &str) -> Cow<'_, str> {
    Cow::Borrowed(s)
}

fn lowercase(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_uppercase) {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Values pulled out of one line. Borrowed from the content where possible.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractedFields<'a> {
    pub timestamp: Option<Cow<'a, str>>,
    pub level: Option<Cow<'a, str>>,
    pub logger: Option<Cow<'a, str>>,
    pub caller: Option<Cow<'a, str>>,
}

/// Runs the rule table over a line's content.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    rules: Vec<FieldRule>,
}

impl FieldExtractor {
    pub fn new(options: &ParserOptions) -> Result<Self, Error> {
        let caller_keys = options
            .caller_keys
            .iter()
            .map(|k| validated_key(k))
            .collect::<Result<Vec<_>, _>>()?;

        let mut rules = vec![
            FieldRule {
                field: Field::Timestamp,
                pattern: Regex::new(&format!(
                    r"\b(?:{})=([0-9T:.+-]+Z?)",
                    TIMESTAMP_KEYS.join("|")
                ))?,
                post: verbatim,
            },
            FieldRule {
                field: Field::Level,
                pattern: Regex::new(&format!(r"(?i)\b{LEVEL_KEY}=(\w+)"))?,
                post: lowercase,
            },
            FieldRule {
                field: Field::Logger,
                pattern: Regex::new(&format!(r"\b{LOGGER_KEY}=(\S+)"))?,
                post: verbatim,
            },
        ];
        if !caller_keys.is_empty() {
            rules.push(FieldRule {
                field: Field::Caller,
                pattern: Regex::new(&format!(r"\b(?:{})=(\S+)", caller_keys.join("|")))?,
                post: verbatim,
            });
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn extract<'a>(&self, content: &'a str) -> ExtractedFields<'a> {
        let mut fields = ExtractedFields::default();
        for rule in &self.rules {
            let value = rule.apply(content);
            match rule.field {
                Field::Timestamp => fields.timestamp = value,
                Field::Level => fields.level = value,
                Field::Logger => fields.logger = value,
                Field::Caller => fields.caller = value,
            }
        }
        fields
    }
}

/// Reject keys that would change the meaning of the pattern they are spliced into.
pub(crate) fn validated_key(key: &str) -> Result<&str, Error> {
    if !key.is_empty() && key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        Ok(key)
    } else {
        Err(Error::InvalidFieldKey(key.to_string()))
    }
}

/// Split a trimmed line into `(app_name, content)`.
///
/// `app | content` splits on the first pipe. Without a pipe the whole line is
/// the content and the app name is the text before the first `:` (the whole
/// line when there is no colon either).
pub fn split_app(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once('|') {
        Some((app, content)) => (app.trim(), content.trim()),
        None => {
            let app = line.split(':').next().unwrap_or(line).trim();
            (app, line)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(&ParserOptions::default()).unwrap()
    }

    fn rule(field: Field) -> FieldRule {
        extractor()
            .rules()
            .iter()
            .find(|r| r.field == field)
            .cloned()
            .unwrap()
    }

    #[rstest]
    #[case("t=2025-04-11T16:44:22Z msg", Some("2025-04-11T16:44:22Z"))]
    #[case("ts=2025-04-11T16:44:22.123+07:00", Some("2025-04-11T16:44:22.123+07:00"))]
    #[case("time=1712345678.5 rest", Some("1712345678.5"))]
    #[case("at=2025-04-11", None)]
    #[case("t=now", None)]
    fn timestamp_rule(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(rule(Field::Timestamp).apply(content).as_deref(), expected);
    }

    #[rstest]
    #[case("level=ERROR boom", Some("error"))]
    #[case("LEVEL=Warn", Some("warn"))]
    #[case("loglevel=info", None)]
    #[case("level=", None)]
    fn level_rule_lowercases(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(rule(Field::Level).apply(content).as_deref(), expected);
    }

    #[test]
    fn logger_and_caller_take_non_whitespace_tokens() {
        let fields = extractor().extract("logger=db.pool caller=pool.go:42 done");
        assert_eq!(fields.logger.as_deref(), Some("db.pool"));
        assert_eq!(fields.caller.as_deref(), Some("pool.go:42"));
    }

    #[test]
    fn source_counts_as_caller() {
        let fields = extractor().extract("source=main.rs:7 started");
        assert_eq!(fields.caller.as_deref(), Some("main.rs:7"));
    }

    #[test]
    fn caller_keys_are_configurable() {
        let options = ParserOptions { caller_keys: vec!["caller".into()], ..Default::default() };
        let fields = FieldExtractor::new(&options).unwrap().extract("source=main.rs:7");
        assert_eq!(fields.caller, None);

        let options = ParserOptions { caller_keys: vec![], ..Default::default() };
        let extractor = FieldExtractor::new(&options).unwrap();
        assert!(extractor.rules().iter().all(|r| r.field != Field::Caller));
        assert_eq!(extractor.extract("caller=x.go:1").caller, None);
    }

    #[test]
    fn invalid_caller_key_is_rejected() {
        let options = ParserOptions { caller_keys: vec!["a|b".into()], ..Default::default() };
        assert!(matches!(FieldExtractor::new(&options), Err(Error::InvalidFieldKey(_))));
    }

    #[test]
    fn absent_fields_are_none() {
        assert_eq!(extractor().extract("nothing structured"), ExtractedFields::default());
    }

    #[rstest]
    #[case("app1|hello", ("app1", "hello"))]
    #[case("  web-1   |  GET / 200  ", ("web-1", "GET / 200"))]
    #[case("a|b|c", ("a", "b|c"))]
    #[case("pg_log: FATAL: boom", ("pg_log", "pg_log: FATAL: boom"))]
    #[case("no separators at all", ("no separators at all", "no separators at all"))]
    fn split_app_cases(#[case] line: &str, #[case] expected: (&str, &str)) {
        assert_eq!(split_app(line), expected);
    }
}
