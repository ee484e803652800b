//! Error types shared by the watcher crates.
//!
//! `WatcherError` covers everything that is fatal for a session: a configuration that
//! cannot be read or is invalid, broken channels and panicked threads. A failed price
//! lookup for a single symbol is not one of these; it is a
//! [`FetchError`](crate::source::FetchError) and only ever gets logged.
use std::io;

use thiserror::Error;

/// Unified error type for configuration, channel and thread failures.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// I/O error from files, the console or an output sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file is not valid YAML for [`Config`](crate::Config).
    #[error("Config decode error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `max_workers` must be strictly positive.
    #[error("Invalid max_workers value: {0}")]
    InvalidWorkers(i64),

    /// Any other configuration value outside of its allowed range.
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// The HTTP client for a price source could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Channel send failed (the receiving side is gone); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// A worker, aggregator or reporter thread panicked instead of returning.
    #[error("Thread panicked: {0}")]
    ThreadPanic(String),
}
