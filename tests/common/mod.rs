#![allow(dead_code, unused_imports)]
//! Shared test utilities for dlogs integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;

use dlogs_core::{LineParser, LogRecord};

/// Parse with default options, panicking on blank input.
pub fn parse(line: &str) -> LogRecord {
    LineParser::default()
        .parse(line)
        .unwrap_or_else(|| panic!("expected a record for {line:?}"))
}
