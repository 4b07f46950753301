//! Configuration for the directory loader.
//!
//! # Examples
//!
//! ```rust
//! use corpus::LoaderConfig;
//!
//! let config = LoaderConfig::default();
//! assert_eq!(config.extension, "txt");
//! assert_eq!(config.max_file_bytes, Some(16 * 1024 * 1024));
//!
//! let custom = LoaderConfig::new().with_extension("md").with_max_file_bytes(None);
//! assert!(custom.accepts_extension("notes.md"));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Controls which files the loader picks up and how large they may be.
///
/// ```json
/// {
///   "extension": "txt",
///   "max_file_bytes": 16777216
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderConfig {
    /// File extension (without the dot) a file must carry to be loaded.
    ///
    /// The match is exact and case-sensitive: `notes.TXT` is not picked up
    /// when the extension is `txt`.
    pub extension: String,

    /// Files larger than this are skipped and reported as read failures.
    /// `None` disables the limit.
    pub max_file_bytes: Option<u64>,
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: Option<u64>) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Returns `true` if the file name of `path` ends in `.{extension}`.
    ///
    /// A bare `.txt` counts: the whole name is the suffix.
    pub fn accepts_extension(&self, path: impl AsRef<Path>) -> bool {
        let Some(name) = path.as_ref().file_name() else {
            return false;
        };
        let name = name.as_encoded_bytes();
        let ext = self.extension.as_bytes();
        name.len() > ext.len()
            && name.ends_with(ext)
            && name[name.len() - ext.len() - 1] == b'.'
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            max_file_bytes: Some(16 * 1024 * 1024),
        }
    }
}
