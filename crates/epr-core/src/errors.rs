//! Core error types.

use thiserror::Error;

/// Errors raised while projecting or hashing records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record could not be converted to its JSON field mapping.
    #[error("failed to serialize {kind} record: {source}")]
    Serialize {
        /// Record kind being serialized.
        kind: &'static str,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// A record serialized to something other than a JSON object.
    #[error("{kind} record did not serialize to an object")]
    NotAnObject {
        /// Record kind being serialized.
        kind: &'static str,
    },
    /// Reading a file for hashing failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
