//! Error types for the commander caches
//!
//! Provides unified error handling using thiserror. Cache misses and rejected
//! mutations are not errors; only snapshot I/O and timestamp parsing fail here.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for snapshot persistence and journal parsing.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Reading or writing a snapshot file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot contents could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot was written by an unsupported format version
    #[error("Incompatible snapshot version {found} (expected {expected})")]
    IncompatibleVersion { found: u32, expected: u32 },

    /// Journal timestamp did not match the expected format
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

// == Result Type Alias ==
/// Convenience Result type for the commander caches.
pub type Result<T> = std::result::Result<T, CacheError>;
