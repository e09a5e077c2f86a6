//! dlogs-term — terminal sink for dlogs.
//!
//! Maps the backend-neutral [`dlogs_core::Style`] onto `crossterm` styles and
//! writes each rendered line in full colour, or as plain text when colour is
//! off.

pub mod color;
pub mod sink;

pub use color::{color_enabled, content_style};
pub use sink::TerminalSink;
