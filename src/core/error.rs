//! Error types for core module
//!
//! Failures of the I/O boundary: settings and save files. None of these leave
//! a game half-loaded; callers keep the game they had.

use thiserror::Error;

use crate::game::SnapshotError;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot parsed but describes an invalid game
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
