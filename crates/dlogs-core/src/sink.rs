//! Sinks — where rendered lines go.
//!
//! The core never writes to the terminal itself; callers inject a [`Sink`].
//! The terminal implementation lives in `dlogs-term`; this module provides
//! the JSON-lines and in-memory sinks.

use std::io::{self, Write};

use serde::Serialize;

use crate::format::RenderedLine;
use crate::types::LogRecord;

pub trait Sink {
    /// Consume one rendered line.
    fn emit(&mut self, line: &RenderedLine) -> io::Result<()>;

    /// Show a human-readable status message (e.g. on shutdown).
    fn status(&mut self, message: &str) -> io::Result<()> {
        let _ = message;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, line: &RenderedLine) -> io::Result<()> {
        (**self).emit(line)
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        (**self).status(message)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&mut self, line: &RenderedLine) -> io::Result<()> {
        (**self).emit(line)
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        (**self).status(message)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

// ---------------------------------------------------------------------------
// JsonSink
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    record: &'a LogRecord,
    text: &'a str,
    /// Style spec as written in `[styles]`; `null` for an unstyled line.
    style: Option<String>,
}

/// Writes one JSON object per record. Status messages are not part of the
/// stream and are dropped.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for JsonSink<W> {
    fn emit(&mut self, line: &RenderedLine) -> io::Result<()> {
        let json = JsonLine {
            record: &line.record,
            text: &line.text,
            style: line.style.map(|s| s.to_string()),
        };
        serde_json::to_writer(&mut self.out, &json)?;
        self.out.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// MemorySink
// ---------------------------------------------------------------------------

/// Collects everything in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<RenderedLine>,
    pub statuses: Vec<String>,
}

impl MemorySink {
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

impl Sink for MemorySink {
    fn emit(&mut self, line: &RenderedLine) -> io::Result<()> {
        self.lines.push(line.clone());
        Ok(())
    }

    fn status(&mut self, message: &str) -> io::Result<()> {
        self.statuses.push(message.to_string());
        Ok(())
    }
}
