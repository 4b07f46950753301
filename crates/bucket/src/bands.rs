//! Band index sequences.
//!
//! A band names which representatives (by permutation index) are glued
//! together into one hash-bucket label. Indices are drawn independently and
//! with replacement, so a sequence may repeat an index.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BucketError;

/// Indices into a document's representative set, each in `[0, shuffle_count)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandSequence {
    indices: Vec<usize>,
}

impl BandSequence {
    /// Builds a sequence from explicit indices, rejecting any index that is
    /// not below `shuffle_count`.
    pub fn new(indices: Vec<usize>, shuffle_count: usize) -> Result<Self, BucketError> {
        if let Some(&index) = indices.iter().find(|&&i| i >= shuffle_count) {
            return Err(BucketError::BandIndexOutOfRange {
                index,
                shuffle_count,
            });
        }
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Draws `band_count` sequences of `sequence_length` indices uniformly from
/// `[0, shuffle_count)`.
pub fn generate_band_sequences<R: Rng>(
    band_count: usize,
    sequence_length: usize,
    shuffle_count: usize,
    rng: &mut R,
) -> Result<Vec<BandSequence>, BucketError> {
    if shuffle_count == 0 && band_count > 0 && sequence_length > 0 {
        return Err(BucketError::InvalidConfigShuffles {
            shuffles: shuffle_count,
        });
    }

    debug!(band_count, sequence_length, shuffle_count, "generating band sequences");
    let bands = (0..band_count)
        .map(|_| BandSequence {
            indices: (0..sequence_length)
                .map(|_| rng.random_range(0..shuffle_count))
                .collect(),
        })
        .collect();
    Ok(bands)
}
