//! Error types for wordlist filtering
//!
//! Configuration and resource failures are fatal: they surface at startup
//! (or at the first failing read/write) and end the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    /// A `--match` or `--exclude` pattern that does not compile
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// `--min-len` greater than `--max-len`
    #[error("Invalid length bounds: min ({min}) must be <= max ({max})")]
    InvalidBounds { min: usize, max: usize },

    #[error("Unknown encoding label: '{0}'")]
    UnknownEncoding(String),

    /// Input, blacklist or whitelist path that does not exist
    #[error("File not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FilterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::MissingFile(path)
        } else {
            Self::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
