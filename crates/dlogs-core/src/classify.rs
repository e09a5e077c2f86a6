//! Severity classification.
//!
//! Precedence, first hit wins:
//!
//! 1. An explicit `level=<token>` (already lower-cased by the extractor).
//!    A recognised name resolves to that severity; anything else is kept as
//!    [`Level::Unrecognized`] and does not fall through.
//! 2. Keyword inference over [`KEYWORD_TABLE`], in table order, as whole-word
//!    case-insensitive matches. Table order decides ties, not text order.
//! 3. [`Severity::Info`].

use std::sync::LazyLock;

use regex::Regex;

use crate::table::KEYWORD_TABLE;
use crate::types::{Level, Severity};

static KEYWORD_PATTERNS: LazyLock<Vec<(Regex, Severity)>> = LazyLock::new(|| {
    KEYWORD_TABLE
        .iter()
        .map(|(keyword, severity)| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
                .expect("keyword table entries are plain words");
            (re, *severity)
        })
        .collect()
});

/// Resolves a line's [`Level`].
#[derive(Debug, Clone, Copy)]
pub struct SeverityClassifier {
    keyword_fallback: bool,
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self { keyword_fallback: true }
    }
}

impl SeverityClassifier {
    pub fn new(keyword_fallback: bool) -> Self {
        Self { keyword_fallback }
    }

    pub fn classify(&self, explicit: Option<&str>, content: &str) -> Level {
        if let Some(tag) = explicit {
            return match Severity::from_name(tag) {
                Some(severity) => Level::Known(severity),
                None => Level::Unrecognized(tag.to_string()),
            };
        }
        if self.keyword_fallback {
            if let Some(severity) = infer_from_keywords(content) {
                return Level::Known(severity);
            }
        }
        Level::Known(Severity::Info)
    }
}

/// Scan `text` for the first keyword of [`KEYWORD_TABLE`] present as a whole word.
pub fn infer_from_keywords(text: &str) -> Option<Severity> {
    KEYWORD_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, severity)| *severity)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
