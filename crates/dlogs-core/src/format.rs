//! Line formatter: attaches the display text and style to a parsed record.

use crate::parser::LineParser;
use crate::table::{Style, StyleTable};
use crate::types::LogRecord;

/// A record ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub record: LogRecord,
    /// `"<timestamp> <app>:<logger> <caller> <message>"`.
    pub text: String,
    /// `None` when the level has no mapped style.
    pub style: Option<Style>,
}

/// `"<timestamp> <app>:<logger> <caller> <message>"`
pub fn format_record(record: &LogRecord) -> String {
    format!(
        "{} {}:{} {} {}",
        record.timestamp, record.app_name, record.logger, record.caller, record.message
    )
}

#[derive(Debug, Clone)]
pub struct LineFormatter {
    parser: LineParser,
    styles: StyleTable,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(LineParser::default(), StyleTable::defaults())
    }
}

impl LineFormatter {
    pub fn new(parser: LineParser, styles: StyleTable) -> Self {
        Self { parser, styles }
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Parse and render one raw line. `None` for blank input.
    pub fn render(&self, line: &str) -> Option<RenderedLine> {
        self.parser.parse(line).map(|record| self.render_record(record))
    }

    pub fn render_record(&self, record: LogRecord) -> RenderedLine {
        RenderedLine {
            text: format_record(&record),
            style: self.styles.style_for(&record.level),
            record,
        }
    }
}
