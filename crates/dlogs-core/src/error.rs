//! Errors raised while building the parser or the style table.
//!
//! Parsing a line never fails; these only surface at start-up.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("field key {0:?} must be a non-empty run of word characters")]
    InvalidFieldKey(String),

    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unknown colour {0:?}")]
    UnknownColor(String),

    #[error("malformed style {0:?}: expected \"[bold] <fg> [on <bg>]\"")]
    MalformedStyle(String),

    #[error("unknown severity {0:?}")]
    UnknownSeverity(String),
}
