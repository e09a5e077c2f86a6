//! dlogs-core — line parsing and severity classification for dlogs.
//!
//! Every input line is processed on its own; no state crosses lines.
//!
//! # Architecture
//!
//! ```text
//! raw line ─► split app/content ─► FieldExtractor ─► timestamp ─► SeverityClassifier
//!                                                                      │
//!                          Sink ◄── LineFormatter ◄── MessageSanitizer ◄┘
//! ```
//!
//! The style table and the keyword table are built once at start-up and are
//! read-only afterwards.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod parser;
pub mod pipeline;
pub mod sanitize;
pub mod sink;
pub mod table;
pub mod timestamp;
pub mod types;

pub use config::{Config, ParserOptions};
pub use error::Error;
pub use format::{LineFormatter, RenderedLine};
pub use parser::LineParser;
pub use pipeline::{Pipeline, PipelineStats};
pub use sink::{JsonSink, MemorySink, Sink};
pub use table::{Color, Style, StyleTable};
pub use types::{Level, LogRecord, Severity};
