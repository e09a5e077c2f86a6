//! Line parser: raw line → [`LogRecord`].
//!
//! ```text
//! split app/content ─► FieldExtractor ─► timestamp ─► SeverityClassifier ─► MessageSanitizer
//! ```
//!
//! Stateless per line. Every pattern is compiled once in [`LineParser::new`].

use crate::classify::SeverityClassifier;
use crate::config::ParserOptions;
use crate::extract::{split_app, FieldExtractor};
use crate::sanitize::MessageSanitizer;
use crate::timestamp;
use crate::types::{LogRecord, PLACEHOLDER};
use crate::Error;

#[derive(Debug, Clone)]
pub struct LineParser {
    extractor: FieldExtractor,
    classifier: SeverityClassifier,
    sanitizer: MessageSanitizer,
}

impl LineParser {
    pub fn new(options: &ParserOptions) -> Result<Self, Error> {
        Ok(Self {
            extractor: FieldExtractor::new(options)?,
            classifier: SeverityClassifier::new(options.keyword_fallback),
            sanitizer: MessageSanitizer::new(options)?,
        })
    }

    /// Parse one line. Blank lines yield `None`; anything else always
    /// produces a fully populated record.
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        if line.trim().is_empty() {
            return None;
        }
        let (app_name, content) = split_app(line);
        let fields = self.extractor.extract(content);

        Some(LogRecord {
            app_name: app_name.to_string(),
            logger: fields.logger.as_deref().unwrap_or(PLACEHOLDER).to_string(),
            caller: fields.caller.as_deref().unwrap_or(PLACEHOLDER).to_string(),
            timestamp: timestamp::resolve(fields.timestamp.as_deref(), content),
            level: self.classifier.classify(fields.level.as_deref(), content),
            message: self.sanitizer.sanitize(content),
        })
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(&ParserOptions::default()).expect("default parser options are valid")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
