//!
//! Common types and utilities shared by the price watcher.
//!
//! This crate aggregates:
//! - `error` — unified error type `WatcherError` used across the workspace.
//! - `result` — handy `Result<T, WatcherError>` alias.
//! - `config` — YAML configuration model and loader.
//! - `command` — operator console commands (`START` / `STOP`).
//! - `message` — `PriceMessage` produced by workers and rendered on the console.
//! - `source` — the `PriceSource` seam and its Binance and simulated implementations.
#![warn(missing_docs)]
pub mod command;
pub mod config;
pub mod error;
pub mod message;
pub mod result;
pub mod source;

pub use command::Command;
pub use config::Config;
pub use error::WatcherError;
pub use message::PriceMessage;
pub use result::Result;
