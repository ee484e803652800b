//! Result type alias shared across the workspace.
//!
//! Functions that can fail at startup or while coordinating threads return
//! `Result<T>`, which defaults the error to `WatcherError`.
use crate::error::WatcherError;

/// Workspace-wide `Result` alias with `WatcherError` as the default error.
pub type Result<T, E = WatcherError> = std::result::Result<T, E>;
