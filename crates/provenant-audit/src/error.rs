//! Error types for the provenance log.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading the provenance log.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The log file could not be opened (or created) for appending.
    #[error("failed to open provenance log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be written to the log.
    #[error("failed to write provenance log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log could not be read back.
    #[error("failed to read provenance log {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the log is not a valid record.
    #[error("corrupt provenance record at line {line}: {source}")]
    CorruptRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),
}
