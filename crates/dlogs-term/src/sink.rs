//! [`TerminalSink`] — writes rendered lines to a terminal (or any writer).

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color as TermColor, ContentStyle, Print, PrintStyledContent, StyledContent};
use dlogs_core::{RenderedLine, Sink};

use crate::color::content_style;

pub struct TerminalSink<W: Write> {
    out: W,
    color: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for TerminalSink<W> {
    fn emit(&mut self, line: &RenderedLine) -> io::Result<()> {
        match line.style.filter(|_| self.color) {
            Some(style) => queue!(
                self.out,
                PrintStyledContent(StyledContent::new(content_style(style), line.text.as_str())),
                Print("\n")
            )?,
            None => writeln!(self.out, "{}", line.text)?,
        }
        self.out.flush()
    }

    /// Bold yellow when colour is on.
    fn status(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            let mut style = ContentStyle::new();
            style.foreground_color = Some(TermColor::Yellow);
            style.attributes.set(Attribute::Bold);
            queue!(self.out, PrintStyledContent(StyledContent::new(style, message)), Print("\n"))?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        self.out.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
