//! Error types for warp point store operations.

use thiserror::Error;

/// Errors that can occur while loading, validating, or mutating the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A non-blank, non-comment line in the store has no `=` separator.
    #[error("invalid warp point on line {line_no}: {line}")]
    Malformed { line_no: usize, line: String },

    /// The key cannot be used as a warp point key.
    #[error("{key} cannot be used as warp point key: {reason}")]
    InvalidKey { key: String, reason: String },

    /// The target cannot be stored as a single line of the store file.
    #[error("{target:?} cannot be used as warp point target: {reason}")]
    InvalidTarget { target: String, reason: String },

    /// No warp point exists for this key.
    #[error("warp point {key} does not exist")]
    NotFound { key: String },

    /// No store location override was given and the home directory is unknown.
    #[error("cannot determine home directory for the warp point store")]
    NoHomeDirectory,

    /// I/O error while reading or writing the store file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
