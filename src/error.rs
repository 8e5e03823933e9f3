//! Error types for the bug-eval library.

use thiserror::Error;

/// Result type for bug-eval operations.
pub type Result<T> = std::result::Result<T, BugEvalError>;

/// Error types that can occur during annotation storage and evaluation.
#[derive(Error, Debug)]
pub enum BugEvalError {
    /// Failure inside the storage engine. Fatal; propagated unmodified and
    /// never retried automatically.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A point fell outside the destination raster during encoding.
    /// Usually means the height/width arguments are wrong upstream, so the
    /// point is never silently clipped.
    #[error("point out of range: {0}")]
    OutOfRange(String),

    /// Invalid point data (non-finite coordinates).
    #[error("invalid point: {0}")]
    InvalidPoint(String),

    /// Invalid matching or binarization threshold.
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),
}
