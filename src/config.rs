//! YAML configuration file support.
//!
//! One file describes how a run loads its corpus, how it buckets documents,
//! and how results are printed. Every field has a default, so an empty
//! section (or a missing one) means "use the defaults".
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "nightly dedup"
//!
//! corpus:
//!   extension: "txt"
//!   max_file_bytes: 16777216
//!
//! bucket:
//!   version: 1
//!   shuffle_count: 5
//!   band_count: 6
//!   band_sequence_length: 3
//!   seed: 1732584193
//!   use_parallel: false
//!
//! output:
//!   format: "text"
//! ```

use std::fs;
use std::path::Path;

use bucket::BucketConfig;
use corpus::LoaderConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LshConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub corpus: CorpusYamlConfig,

    #[serde(default)]
    pub bucket: BucketYamlConfig,

    #[serde(default)]
    pub output: OutputYamlConfig,
}

impl LshConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: LshConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.corpus.validate()?;
        self.bucket.validate()?;
        self.output.validate()?;

        Ok(())
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            extension: self.corpus.extension.clone(),
            max_file_bytes: self.corpus.max_file_bytes,
        }
    }

    pub fn bucket_config(&self) -> BucketConfig {
        BucketConfig {
            version: self.bucket.version,
            shuffle_count: self.bucket.shuffle_count,
            band_count: self.bucket.band_count,
            band_sequence_length: self.bucket.band_sequence_length,
            seed: self.bucket.seed,
            use_parallel: self.bucket.use_parallel,
        }
    }
}

impl Default for LshConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            corpus: CorpusYamlConfig::default(),
            bucket: BucketYamlConfig::default(),
            output: OutputYamlConfig::default(),
        }
    }
}

/// Corpus loader YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusYamlConfig {
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: Option<u64>,
}

impl CorpusYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.extension.is_empty() || self.extension.contains('.') {
            return Err(ConfigLoadError::Validation(
                "corpus.extension must be a non-empty extension without dots".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CorpusYamlConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

/// Bucketing YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_shuffle_count")]
    pub shuffle_count: usize,

    #[serde(default = "default_band_count")]
    pub band_count: usize,

    #[serde(default = "default_band_sequence_length")]
    pub band_sequence_length: usize,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub use_parallel: bool,
}

impl BucketYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "bucket.version must be >= 1".to_string(),
            ));
        }
        if self.shuffle_count == 0 {
            return Err(ConfigLoadError::Validation(
                "bucket.shuffle_count must be >= 1".to_string(),
            ));
        }
        if self.band_count == 0 {
            return Err(ConfigLoadError::Validation(
                "bucket.band_count must be >= 1".to_string(),
            ));
        }
        if self.band_sequence_length == 0 {
            return Err(ConfigLoadError::Validation(
                "bucket.band_sequence_length must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BucketYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            shuffle_count: default_shuffle_count(),
            band_count: default_band_count(),
            band_sequence_length: default_band_sequence_length(),
            seed: None,
            use_parallel: false,
        }
    }
}

/// Output YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputYamlConfig {
    #[serde(default = "default_format")]
    pub format: String,
}

impl OutputYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(ConfigLoadError::Validation(format!(
                "output.format must be one of: {valid_formats:?}"
            )));
        }
        Ok(())
    }
}

impl Default for OutputYamlConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_version() -> u32 {
    1
}
fn default_extension() -> String {
    "txt".to_string()
}
fn default_max_file_bytes() -> Option<u64> {
    Some(16 * 1024 * 1024)
}
fn default_shuffle_count() -> usize {
    5
}
fn default_band_count() -> usize {
    6
}
fn default_band_sequence_length() -> usize {
    3
}
fn default_format() -> String {
    "text".to_string()
}
