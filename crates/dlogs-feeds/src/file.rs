//! File feed — reads an existing log file once, start to end.

use std::path::Path;

use tokio::sync::mpsc;

use crate::{pump, FeedError, FeedKind, LineFeed, CHANNEL_CAPACITY};

impl LineFeed {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await.map_err(|source| FeedError::Open {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "reading log file");

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(pump(file, tx, "file"));
        Ok(Self { rx, child: None, kind: FeedKind::File })
    }
}
