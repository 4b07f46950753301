//! Configuration and error types for shuffle-based bucketing.
//!
//! The bucket stage is a pure function of `(corpus, config, random source)`.
//! Nothing here touches the filesystem or any process-wide state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters of the permutation / band scheme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketConfig {
    /// Configuration schema version. Must be >= 1.
    pub version: u32,
    /// Number of vocabulary permutations, and therefore the maximum number
    /// of representatives per document.
    pub shuffle_count: usize,
    /// Number of band index sequences, i.e. labels per document.
    pub band_count: usize,
    /// Number of representatives combined into one label.
    pub band_sequence_length: usize,
    /// Seed for the random source.
    ///
    /// With a seed, permutations and band sequences are reproducible for a
    /// given vocabulary. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Run permutation generation and representative selection on rayon.
    /// Output is identical to the sequential path.
    pub use_parallel: bool,
}

impl BucketConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of vocabulary shuffles. More shuffles give each
    /// document more representatives to pick band indices from.
    pub fn with_shuffle_count(mut self, shuffle_count: usize) -> Self {
        self.shuffle_count = shuffle_count;
        self
    }

    /// Set the number of bands (labels per document).
    /// More bands = higher recall.
    pub fn with_band_count(mut self, band_count: usize) -> Self {
        self.band_count = band_count;
        self
    }

    /// Set the label length. Longer labels = higher precision.
    pub fn with_band_sequence_length(mut self, band_sequence_length: usize) -> Self {
        self.band_sequence_length = band_sequence_length;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), BucketError> {
        if self.version < 1 {
            return Err(BucketError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.shuffle_count < 1 {
            return Err(BucketError::InvalidConfigShuffles {
                shuffles: self.shuffle_count,
            });
        }
        if self.band_count < 1 {
            return Err(BucketError::InvalidConfigBands {
                bands: self.band_count,
            });
        }
        if self.band_sequence_length < 1 {
            return Err(BucketError::InvalidConfigSequenceLength {
                length: self.band_sequence_length,
            });
        }
        Ok(())
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            version: 1,
            shuffle_count: 5,
            band_count: 6,
            band_sequence_length: 3,
            seed: None,
            use_parallel: false,
        }
    }
}

/// Errors returned by the bucket stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BucketError {
    #[error("invalid config: shuffle_count must be >= 1 (got {shuffles})")]
    InvalidConfigShuffles { shuffles: usize },

    #[error("invalid config: band_count must be >= 1 (got {bands})")]
    InvalidConfigBands { bands: usize },

    #[error("invalid config: band_sequence_length must be >= 1 (got {length})")]
    InvalidConfigSequenceLength { length: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("band index {index} out of range for {shuffle_count} shuffles")]
    BandIndexOutOfRange { index: usize, shuffle_count: usize },

    #[error("not a permutation of the vocabulary: {0}")]
    NotAPermutation(String),
}
