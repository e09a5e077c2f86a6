//! dlogs — colourised, field-aware tail for docker-compose logs.
//!
//! The binary wires three crates together and exposes the tail loop here so
//! integration tests can drive it with in-memory feeds and sinks.
//!
//! # Architecture
//!
//! ```text
//! LineFeed (dlogs-feeds) ──► Pipeline (dlogs-core) ──► Sink (dlogs-term / JSON)
//! ```
//!
//! Feeds read on background tasks and hand lines over a `tokio` channel; the
//! pipeline itself is synchronous and processes one line at a time.

pub mod tail;

pub use dlogs_core;
pub use dlogs_feeds;
pub use dlogs_term;
