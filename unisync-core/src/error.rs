//! Error types for unisync.

use thiserror::Error;

/// Errors that can occur at the edges of unisync (configuration, snapshot decoding).
///
/// Parsing and reconciliation themselves never fail; they degrade to empty
/// results or documented fallbacks instead.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid remote event '{id}': {reason}")]
    InvalidRemoteEvent { id: String, reason: String },

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for unisync operations.
pub type SyncResult<T> = Result<T, SyncError>;
