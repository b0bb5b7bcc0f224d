//! Error types and Result aliases for fmtwatch.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.

use thiserror::Error;

/// Result type alias using fmtwatch's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fmtwatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// File watching error.
    #[error("watcher error: {0}")]
    Watcher(#[from] WatcherError),

    /// Formatter invocation error.
    #[error("formatter error: {0}")]
    Formatter(#[from] FormatterError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// File watcher errors.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Failed to watch path.
    #[error("failed to watch path '{path}': {reason}")]
    WatchFailed { path: String, reason: String },

    /// The event channel closed while the loop was still running.
    #[error("event channel closed")]
    ChannelClosed,
}

/// Formatter invocation errors. All of these are recoverable per event.
#[derive(Error, Debug)]
pub enum FormatterError {
    /// The external tool could not be spawned.
    #[error("failed to launch '{tool}': {reason}")]
    Launch { tool: String, reason: String },

    /// The external tool exited with a non-zero status.
    #[error("'{tool}' exited with status {status} for '{path}'")]
    NonZeroExit {
        tool: String,
        path: String,
        status: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests;
