//! Message sanitisation: strip every recognised `key=value` token.
//!
//! Runs regardless of which fields were actually extracted, so the result is
//! the same whatever order the keys appear in, and sanitising twice is a no-op.

use regex::Regex;

use crate::config::ParserOptions;
use crate::extract::{validated_key, LEVEL_KEY, LOGGER_KEY, TIMESTAMP_KEYS};
use crate::Error;

#[derive(Debug, Clone)]
pub struct MessageSanitizer {
    pattern: Regex,
}

impl MessageSanitizer {
    pub fn new(options: &ParserOptions) -> Result<Self, Error> {
        // `level` is matched case-insensitively by the extractor, so it is here too.
        let mut keys = vec![LOGGER_KEY.to_string(), format!("(?i:{LEVEL_KEY})")];
        for key in &options.caller_keys {
            keys.push(validated_key(key)?.to_string());
        }
        if options.strip_timestamp_from_message {
            keys.extend(TIMESTAMP_KEYS.iter().map(|k| k.to_string()));
        }
        let pattern = Regex::new(&format!(r"\b(?:{})=\S+", keys.join("|")))?;
        Ok(Self { pattern })
    }

    pub fn sanitize(&self, content: &str) -> String {
        self.pattern.replace_all(content, "").trim().to_string()
    }
}

impl Default for MessageSanitizer {
    fn default() -> Self {
        Self::new(&ParserOptions::default()).expect("default sanitizer keys are valid")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
