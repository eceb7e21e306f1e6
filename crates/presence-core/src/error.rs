use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while aggregating presence logs.
#[derive(Error, Debug)]
pub enum PresenceError {
    /// An input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the file (bad framing, invalid UTF-8, ...).
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A field needed to process a row is not present in the header or row.
    #[error("{path}:{line}: missing column `{column}`")]
    MissingColumn {
        path: PathBuf,
        line: u64,
        column: String,
    },

    /// A required integer field holds something that is not an integer.
    #[error("{path}:{line}: invalid integer in column `{column}`: {value:?}")]
    InvalidField {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    /// A summary document could not be serialized.
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the presence crates.
pub type Result<T> = std::result::Result<T, PresenceError>;
