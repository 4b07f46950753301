//! # Shuffle-based MinHash bucketing
//!
//! Takes a tokenized [`corpus::Corpus`] and assigns every document a set of
//! hash-bucket labels. Documents that share a label for some band are
//! candidates for being similar.
//!
//! ## Contract
//!
//! - Consumes documents and the vocabulary produced by the `corpus` crate.
//! - Never reads files or performs tokenization.
//! - All randomness comes from a caller-supplied [`rand::Rng`]; seed it to get
//!   reproducible output.
//!
//! ## Stages
//!
//! 1.  **Permutations**: `shuffle_count` independent uniform shuffles of the
//!     vocabulary, each acting as one MinHash function.
//!
//! 2.  **Band sequences**: `band_count` sequences of `band_sequence_length`
//!     permutation indices, drawn with replacement. Independent of content.
//!
//! 3.  **Representatives**: for each document and permutation, the first
//!     permutation word the document contains.
//!
//! 4.  **Labels**: for each document and band, the representatives at the
//!     band's indices. Missing representatives become `None` positions
//!     instead of aborting the run.
//!
//! ## Example Usage
//!
//! ```
//! use bucket::{assemble_labels, generate_band_sequences, generate_permutations,
//!              select_representatives, BucketConfig};
//! use corpus::Corpus;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let corpus = Corpus::from_texts([("a", "the cat sat"), ("b", "the cat ran")]).unwrap();
//! let cfg = BucketConfig::default();
//! let mut rng = StdRng::seed_from_u64(cfg.seed.unwrap_or(7));
//!
//! let perms = generate_permutations(corpus.vocabulary(), cfg.shuffle_count, &mut rng, false);
//! let bands = generate_band_sequences(
//!     cfg.band_count,
//!     cfg.band_sequence_length,
//!     cfg.shuffle_count,
//!     &mut rng,
//! )
//! .unwrap();
//!
//! let reps = select_representatives(&corpus.documents()[0], &perms);
//! let labels = assemble_labels(&reps, &bands);
//! assert_eq!(labels.len(), 6);
//! assert!(labels.iter().all(|l| l.len() == 3));
//! ```
pub mod bands;
pub mod config;
pub mod label;
pub mod permutation;
pub mod representative;

pub use crate::bands::{generate_band_sequences, BandSequence};
pub use crate::config::{BucketConfig, BucketError};
pub use crate::label::{assemble_labels, HashBucketLabel, NO_REPRESENTATIVE};
pub use crate::permutation::{generate_permutations, Permutation};
pub use crate::representative::{select_all, select_representatives, RepresentativeSet};

/// Human-readable algorithm identifier.
pub const BUCKET_ALGORITHM: &str = "shuffle_minhash_bands_v1";
