//! Configuration types for feedscan.
//!
//! [`Config::load`] reads `~/.config/feedscan/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, and then applies
//! `FEEDSCAN__SECTION__KEY` environment overrides. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::search::SearchOptions;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
feed_timeout_secs = 30
channel_capacity  = 64
max_concurrent    = 0

[http]
connect_timeout_secs = 10

[feeds]
path = "data/data.json"

[output]
show_feed = false
"#;

const ENV_PREFIX: &str = "FEEDSCAN";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Per-feed deadline in seconds. `0` disables the deadline.
    #[serde(default = "default_feed_timeout_secs")]
    pub feed_timeout_secs: u64,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    #[serde(default)]
    pub max_concurrent: usize,
}

fn default_feed_timeout_secs() -> u64 { 30 }
fn default_channel_capacity() -> usize { 64 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            feed_timeout_secs: default_feed_timeout_secs(),
            channel_capacity: default_channel_capacity(),
            max_concurrent: 0,
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            feed_timeout: (self.feed_timeout_secs > 0)
                .then(|| Duration::from_secs(self.feed_timeout_secs)),
            channel_capacity: self.channel_capacity,
            max_concurrent: self.max_concurrent,
        }
    }
}

/// `[http]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_user_agent() -> String { concat!("feedscan/", env!("CARGO_PKG_VERSION")).to_string() }
fn default_connect_timeout_secs() -> u64 { 10 }

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// `[feeds]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    #[serde(default = "default_feeds_path")]
    pub path: PathBuf,
}

fn default_feeds_path() -> PathBuf { PathBuf::from("data/data.json") }

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            path: default_feeds_path(),
        }
    }
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub show_feed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/feedscan/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load a specific file layered on top of the built-in defaults. A
    /// missing file is an error here.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, environment())
    }

    fn layered(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .add_source(env)
            .build()?
            .try_deserialize()
            .map_err(Into::into)
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
}

/// `FEEDSCAN__SECTION__KEY` overrides, e.g. `FEEDSCAN__SEARCH__FEED_TIMEOUT_SECS=5`.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("feedscan")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
