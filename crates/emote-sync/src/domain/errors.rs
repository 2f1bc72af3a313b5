//! Domain Errors
//!
//! Error types for sync operations. Only [`SyncError`] aborts a run; the
//! platform and fetch errors are folded into per-guild upload failures.

use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to read emote file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write emote file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}

impl SyncError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Errors reported by a chat platform implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("Guild not found: {0}")]
    GuildNotFound(u64),

    #[error("None of the {requested} configured guilds could be reached")]
    NoGuildsReachable { requested: usize },

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Errors reported while downloading an emote image
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Body larger than {limit} bytes (at least {size})")]
    TooLarge { size: usize, limit: usize },
}
