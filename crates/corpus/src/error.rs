use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a corpus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// The corpus directory is missing, unreadable, or not a directory.
    /// Fatal: nothing is loaded.
    #[error("corpus directory {path:?} is unavailable: {reason}")]
    ResourceUnavailable { path: PathBuf, reason: String },
    /// A single file could not be read. Recorded and skipped by the loader.
    #[error("failed to read {name}: {reason}")]
    FileRead { name: String, reason: String },
    #[error("document requires a non-empty name")]
    MissingName,
    #[error("duplicate document name {0:?}")]
    DuplicateName(String),
}
