//! The tail loop: pull a line, render it, hand it to the sink, repeat.

use std::future::Future;
use std::io;

use dlogs_core::{Pipeline, PipelineStats, Sink};
use dlogs_feeds::LineFeed;

/// Printed through the sink when the user interrupts the tail.
pub const STOPPED_MESSAGE: &str = "Stopped tailing logs.";

/// How a tail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The source ran out of lines.
    Exhausted(PipelineStats),
    /// `shutdown` resolved first.
    Interrupted(PipelineStats),
}

impl Outcome {
    pub fn stats(&self) -> PipelineStats {
        match self {
            Outcome::Exhausted(stats) | Outcome::Interrupted(stats) => *stats,
        }
    }
}

/// Run until the feed is exhausted or `shutdown` resolves.
///
/// On shutdown the feed's child process is terminated and
/// [`STOPPED_MESSAGE`] is sent to the sink. There is no in-flight work to
/// unwind: each line is rendered and emitted before the next is read.
pub async fn tail<S, F>(
    feed: &mut LineFeed,
    pipeline: &mut Pipeline,
    sink: &mut S,
    shutdown: F,
) -> io::Result<Outcome>
where
    S: Sink + ?Sized,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!(feed = %feed.kind(), "interrupted; stopping feed");
                feed.shutdown().await;
                sink.status(STOPPED_MESSAGE)?;
                sink.flush()?;
                return Ok(Outcome::Interrupted(pipeline.stats()));
            }
            line = feed.next_line() => match line {
                Some(line) => {
                    pipeline.process(&line, sink)?;
                }
                None => {
                    sink.flush()?;
                    if let Some(status) = feed.wait().await {
                        tracing::info!(%status, "log command exited");
                    }
                    return Ok(Outcome::Exhausted(pipeline.stats()));
                }
            },
        }
    }
}
