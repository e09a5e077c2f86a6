//! Command feed — spawns a process (by default `docker-compose logs -f`) and
//! tails its stdout and stderr together.

use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::mpsc;

use crate::{pump, FeedError, FeedKind, LineFeed, CHANNEL_CAPACITY};

impl LineFeed {
    /// Spawn `command` (program followed by its arguments).
    ///
    /// Lines from stdout and stderr share one channel; ordering between the
    /// two streams is whatever order they are read in.
    pub fn spawn(command: &[String]) -> Result<Self, FeedError> {
        let (program, args) = command.split_first().ok_or(FeedError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FeedError::Spawn { program: program.clone(), source })?;

        tracing::info!(program = %program, ?args, pid = child.id(), "spawned log command");

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(pump(stdout, tx.clone(), "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(pump(stderr, tx, "stderr"));
        }

        Ok(Self { rx, child: Some(child), kind: FeedKind::Command })
    }
}
