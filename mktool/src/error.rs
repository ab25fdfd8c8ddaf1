// Licensed under the Apache-2.0 license

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while generating build artifacts.
#[derive(Error, Debug)]
pub enum MkToolError {
    /// A required input file or directory does not exist.
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    /// Read or write failure on a path that exists.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A macro call had the right shape but its arguments could not be extracted.
    /// Passes skip these lines.
    #[error("malformed macro call on line {line}: {text}")]
    MalformedMacro { line: usize, text: String },

    /// The configuration file could not be parsed.
    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A generated file differs from what is on disk (check mode).
    #[error("{} is out of date", path.display())]
    OutOfDate { path: PathBuf },
}

impl MkToolError {
    /// Classifies an I/O error on `path`; `ErrorKind::NotFound` becomes
    /// [`MkToolError::NotFound`].
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            MkToolError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            MkToolError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MkToolError::NotFound { .. })
    }
}

/// Result type for generator operations
pub type MkToolResult<T> = std::result::Result<T, MkToolError>;
