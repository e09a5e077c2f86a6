//! dlogs-feeds — raw line sources for dlogs.
//!
//! Each source reads bytes on background tasks, splits them into lines, and
//! pushes them onto a bounded `tokio` channel. The consumer pulls lines one at
//! a time with [`LineFeed::next_line`]; `None` means every reader is done.

pub mod command;
pub mod file;
pub mod stdin;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;

/// Lines buffered between the readers and the consumer.
const CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("no command configured to tail")]
    EmptyCommand,

    #[error("failed to spawn {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start the {kind} reader thread: {source}")]
    Thread {
        kind: FeedKind,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Which kind of source a feed reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Command,
    Stdin,
    File,
    Reader,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Command => write!(f, "command"),
            FeedKind::Stdin => write!(f, "stdin"),
            FeedKind::File => write!(f, "file"),
            FeedKind::Reader => write!(f, "reader"),
        }
    }
}

/// A lazy, unbounded sequence of text lines.
pub struct LineFeed {
    rx: mpsc::Receiver<String>,
    child: Option<Child>,
    kind: FeedKind,
}

impl LineFeed {
    /// Feed lines from any async reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(pump(reader, tx, "reader"));
        Self { rx, child: None, kind: FeedKind::Reader }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    /// Next line without its terminator, or `None` at end of input.
    pub async fn next_line(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Stop reading and terminate a spawned child, if any.
    pub async fn shutdown(&mut self) {
        self.rx.close();
        if let Some(child) = self.child.as_mut() {
            if let Err(err) = child.kill().await {
                tracing::debug!(%err, "child already gone");
            }
        }
    }

    /// Reap a spawned child once its output is exhausted.
    pub async fn wait(&mut self) -> Option<std::process::ExitStatus> {
        let child = self.child.as_mut()?;
        match child.wait().await {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::warn!(%err, "failed to wait for child");
                None
            }
        }
    }
}

/// Read `reader` line by line into `tx` until EOF, a read error, or the
/// receiver going away.
async fn pump<R>(reader: R, tx: mpsc::Sender<String>, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(decode_line(&buf)).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::warn!(%err, stream, "read failed; closing stream");
                break;
            }
        }
    }
    tracing::debug!(stream, "reader finished");
}

/// Strip the line terminator and decode lossily.
pub fn decode_line(buf: &[u8]) -> String {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    let buf = buf.strip_suffix(b"\r").unwrap_or(buf);
    String::from_utf8_lossy(buf).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
