//! Pipeline — drives raw lines through the [`LineFormatter`] into a [`Sink`].
//!
//! One line at a time: each line is fully rendered and handed to the sink
//! before the next is requested. Nothing is carried between lines except
//! the counters in [`PipelineStats`].

use std::io;

use crate::format::LineFormatter;
use crate::sink::Sink;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub lines_read: u64,
    pub emitted: u64,
    pub skipped_blank: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    formatter: LineFormatter,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new(formatter: LineFormatter) -> Self {
        Self { formatter, stats: PipelineStats::default() }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Render `line` into `sink`. Returns whether anything was emitted.
    pub fn process<S: Sink + ?Sized>(&mut self, line: &str, sink: &mut S) -> io::Result<bool> {
        self.stats.lines_read += 1;
        match self.formatter.render(line) {
            Some(rendered) => {
                sink.emit(&rendered)?;
                self.stats.emitted += 1;
                Ok(true)
            }
            None => {
                self.stats.skipped_blank += 1;
                Ok(false)
            }
        }
    }

    /// Drain a synchronous line source into `sink`.
    pub fn run<I, S>(&mut self, lines: I, sink: &mut S) -> io::Result<PipelineStats>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        S: Sink + ?Sized,
    {
        for line in lines {
            self.process(line.as_ref(), sink)?;
        }
        sink.flush()?;
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_emitted_and_blank_lines() {
        let mut pipeline = Pipeline::default();
        let mut sink = MemorySink::default();
        let stats = pipeline
            .run(["a|one", "", "   ", "b|two"], &mut sink)
            .unwrap();
        assert_eq!(stats, PipelineStats { lines_read: 4, emitted: 2, skipped_blank: 2 });
        assert_eq!(sink.texts(), vec!["? a:- - one", "? b:- - two"]);
    }

    #[test]
    fn works_with_dyn_sink() {
        let mut pipeline = Pipeline::default();
        let mut sink: Box<dyn Sink> = Box::new(MemorySink::default());
        assert!(pipeline.process("x|y", sink.as_mut()).unwrap());
        assert!(!pipeline.process("", sink.as_mut()).unwrap());
    }
}
