//! Configuration model and YAML loader.
//!
//! Only `symbols` and `max_workers` are required. Every other key falls back to the
//! defaults below, so a minimal file looks like:
//!
//! ```yaml
//! symbols: [BTCUSDT, ETHUSDT]
//! max_workers: 2
//! ```
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::WatcherError;
use crate::result::Result;
use crate::source::SourceKind;

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
/// Default REST endpoint of the quote service.
pub const DEFAULT_API_URL: &str = "https://api.binance.com";

const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
const DEFAULT_REPORT_INTERVAL_MS: u64 = 5_000;
const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Watcher configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Symbols to poll, in order. Duplicates are kept as independent entries.
    pub symbols: Vec<String>,
    /// Requested worker count. Signed so that a negative value is a validation error
    /// rather than a decode error.
    pub max_workers: i64,
    /// Pause between two passes over a worker's shard.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Interval between two request total lines.
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,
    /// Capacity of the shared output queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Base URL of the quote service.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout. Absent means requests never time out.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    /// Which price source to poll.
    #[serde(default)]
    pub source: SourceKind,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_report_interval_ms() -> u64 {
    DEFAULT_REPORT_INTERVAL_MS
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_api_url() -> String {
    String::from(DEFAULT_API_URL)
}

impl Config {
    /// Read, decode and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Decode and validate a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Called by both loaders.
    pub fn validate(&self) -> Result<()> {
        if self.max_workers <= 0 {
            return Err(WatcherError::InvalidWorkers(self.max_workers));
        }
        if self.poll_interval_ms == 0 {
            return Err(WatcherError::InvalidSetting(
                "poll_interval_ms must be positive".to_string(),
            ));
        }
        if self.report_interval_ms == 0 {
            return Err(WatcherError::InvalidSetting(
                "report_interval_ms must be positive".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(WatcherError::InvalidSetting(
                "queue_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Pause between shard passes.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Interval between stats lines.
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
