//! Configuration types for dlogs.
//!
//! [`Config::load`] reads `~/.config/dlogs/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::table::StyleTable;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
command = ["docker-compose", "logs", "-f"]

[parser]
strip_timestamp_from_message = true
caller_keys                  = ["caller", "source"]
keyword_fallback             = true

# Per-severity style overrides: "[bold] <fg> [on <bg>]"
[styles]
# debug = "black on orange3"
# error = "bold white on red"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/dlogs/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub parser: ParserOptions,
    /// Severity name → style spec. Unlisted severities keep their default.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

/// `[source]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Command whose combined output is tailed.
    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

fn default_command() -> Vec<String> {
    ["docker-compose", "logs", "-f"].map(String::from).to_vec()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { command: default_command() }
    }
}

/// Behavioural switches for the line parser (`[parser]` section).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserOptions {
    /// Remove `t=`/`ts=`/`time=` tokens from the message.
    #[serde(default = "default_true")]
    pub strip_timestamp_from_message: bool,
    /// Keys whose value is taken as the call site, first match wins.
    #[serde(default = "default_caller_keys")]
    pub caller_keys: Vec<String>,
    /// Infer severity from keywords when there is no `level=` tag.
    #[serde(default = "default_true")]
    pub keyword_fallback: bool,
}

fn default_true() -> bool { true }
fn default_caller_keys() -> Vec<String> { vec!["caller".to_string(), "source".to_string()] }

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strip_timestamp_from_message: default_true(),
            caller_keys: default_caller_keys(),
            keyword_fallback: default_true(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/dlogs/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    ///
    /// A file that exists but does not load is an error: falling back to
    /// defaults would silently drop the user's `[source]` and `[parser]`.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(&config_path())
    }

    fn load_or_create(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Err(err) = write_default(path) {
                // Unwritable config dir: continue on the defaults.
                tracing::warn!(%err, path = %path.display(), "could not create default config");
            }
        }
        Self::load_from(path).with_context(|| format!("loading config from {}", path.display()))
    }

    /// Load `path` layered on top of the built-in defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        // Surface bad style specs at start-up rather than on first render.
        cfg.style_table()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Build the style table from the defaults plus `[styles]` overrides.
    pub fn style_table(&self) -> Result<StyleTable, crate::Error> {
        StyleTable::with_overrides(&self.styles)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn write_default(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG.trim_start())
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("dlogs")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
