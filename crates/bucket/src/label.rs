//! Hash-bucket label assembly.
//!
//! A label is the list of representatives a band sequence points at. Two
//! documents that end up with the same label for the same band fall into the
//! same bucket and are candidates for being similar.
//!
//! A band index can point past the end of a short representative set (a
//! permutation with no matching word contributes no representative). Such
//! positions hold `None` and render as [`NO_REPRESENTATIVE`]; the rest of
//! the label is still filled in.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::Xxh3;

use crate::bands::BandSequence;
use crate::representative::RepresentativeSet;

/// Rendering of a label position that has no representative.
pub const NO_REPRESENTATIVE: &str = "<none>";

/// Ordered representative words selected by one band sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashBucketLabel {
    words: Vec<Option<String>>,
}

impl HashBucketLabel {
    pub fn new(words: Vec<Option<String>>) -> Self {
        Self { words }
    }

    /// Label positions in band order.
    pub fn words(&self) -> &[Option<String>] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `true` if any position lacks a representative.
    pub fn is_partial(&self) -> bool {
        self.words.iter().any(Option::is_none)
    }

    /// 64-bit bucket identifier for this label in band `band`.
    ///
    /// The band index is mixed in so that equal word lists in different bands
    /// land in different buckets.
    pub fn bucket_key(&self, band: usize) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.update(&(band as u64).to_le_bytes());
        for word in &self.words {
            match word {
                Some(w) => {
                    hasher.update(&[1]);
                    hasher.update(&(w.len() as u64).to_le_bytes());
                    hasher.update(w.as_bytes());
                }
                None => hasher.update(&[0]),
            }
        }
        hasher.digest()
    }
}

impl fmt::Display for HashBucketLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(word.as_deref().unwrap_or(NO_REPRESENTATIVE))?;
        }
        f.write_str("]")
    }
}

/// Builds one label per band sequence from a document's representatives,
/// preserving band order and index order within each band.
pub fn assemble_labels(reps: &RepresentativeSet, bands: &[BandSequence]) -> Vec<HashBucketLabel> {
    bands
        .iter()
        .map(|band| HashBucketLabel {
            words: band
                .indices()
                .iter()
                .map(|&i| reps.get(i).map(str::to_owned))
                .collect(),
        })
        .collect()
}
