//! Loader error module.
//!
//! Errors raised while bulk-loading delimited records into a trie.

use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors that can occur while loading records.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The input file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Open {
        /// Path of the input file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Reading from the input failed part way through.
    #[error("Failed to read record at line {line}: {source}")]
    Read {
        /// 1-based line number being read
        line: usize,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The loader settings cannot be used, e.g. a non-ASCII delimiter.
    #[error("Invalid loader configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A record could not be turned into a trie entry.
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord {
        /// 1-based line number of the record
        line: usize,
        /// Why the record was rejected
        reason: String,
    },
}
