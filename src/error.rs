//! Error types for cache storage, transport and the bot pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by cache slot storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by a transport while retrieving a URL or local path.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote host could not be reached. Text fetches degrade this to empty content.
    #[error("Connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned an empty body")]
    Empty { url: String },

    #[error("Failed to read {}: {source}", path.display())]
    Local {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for agent actions.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("Image fetch from {url} failed after {attempts} attempts: {last_error}")]
    ImageFetchExhausted {
        url: String,
        attempts: u32,
        #[source]
        last_error: TransportError,
    },

    #[error("Post failed: {0}")]
    PostFailed(String),

    #[error("Agent {agent} does not support action '{action}'")]
    UnsupportedAction { agent: String, action: String },

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}

impl From<config::ConfigError> for BotError {
    fn from(err: config::ConfigError) -> Self {
        BotError::ConfigError(err.to_string())
    }
}
