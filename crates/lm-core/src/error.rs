//! Merge error types.

use serde::Serialize;
use thiserror::Error;

/// Errors that abort a merge or a source read.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("color palette is empty")]
    EmptyPalette,

    #[error("invalid time regex `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("time regex `{0}` has no capturing group")]
    MissingCaptureGroup(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("source not found: {0}")]
    NotFound(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;

/// A single input file that could not be read or parsed.
///
/// The file is left out of the merge; the remaining files proceed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("failed to parse {file}: {message}")]
pub struct FileFailure {
    /// Filename as shown to the user.
    pub file: String,
    /// Underlying cause.
    pub message: String,
}

impl FileFailure {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}
