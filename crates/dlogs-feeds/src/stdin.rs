//! Stdin feed — for piping `docker compose logs` (or anything else) in.
//!
//! Blocking readers get a dedicated OS thread rather than a slot on tokio's
//! blocking pool. A read parked on a quiet pipe then never holds up runtime
//! shutdown after an interrupt.

use std::io::{BufRead, BufReader, Read};

use tokio::sync::mpsc;

use crate::{decode_line, FeedError, FeedKind, LineFeed, CHANNEL_CAPACITY};

impl LineFeed {
    pub fn stdin() -> Result<Self, FeedError> {
        Self::blocking(std::io::stdin(), FeedKind::Stdin)
    }

    /// Feed lines from a synchronous reader, read on its own thread.
    pub fn from_blocking_reader<R>(reader: R) -> Result<Self, FeedError>
    where
        R: Read + Send + 'static,
    {
        Self::blocking(reader, FeedKind::Reader)
    }

    fn blocking<R>(reader: R, kind: FeedKind) -> Result<Self, FeedError>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        std::thread::Builder::new()
            .name(format!("dlogs-{kind}"))
            .spawn(move || pump_blocking(reader, tx, kind))
            .map_err(|source| FeedError::Thread { kind, source })?;
        Ok(Self { rx, child: None, kind })
    }
}

fn pump_blocking<R: Read>(reader: R, tx: mpsc::Sender<String>, kind: FeedKind) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if tx.blocking_send(decode_line(&buf)).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::warn!(%err, stream = %kind, "read failed; closing stream");
                break;
            }
        }
    }
    tracing::debug!(stream = %kind, "reader finished");
}
