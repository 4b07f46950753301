//! Random permutations of the vocabulary.
//!
//! Each permutation plays the role of one MinHash hash function: the first
//! word of the permutation that a document contains is that document's
//! representative for it.

use std::collections::HashSet;

use corpus::Vocabulary;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BucketError;

/// One total order over every vocabulary word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permutation {
    words: Vec<String>,
}

impl Permutation {
    /// Wraps an explicit order after checking it is a bijection on `vocab`:
    /// same size, no duplicates, no foreign words.
    pub fn from_order<S>(vocab: &Vocabulary, order: Vec<S>) -> Result<Self, BucketError>
    where
        S: Into<String>,
    {
        let words: Vec<String> = order.into_iter().map(Into::into).collect();
        if words.len() != vocab.len() {
            return Err(BucketError::NotAPermutation(format!(
                "expected {} words, got {}",
                vocab.len(),
                words.len()
            )));
        }
        let mut seen = HashSet::with_capacity(words.len());
        for word in &words {
            if !vocab.contains(word) {
                return Err(BucketError::NotAPermutation(format!(
                    "{word:?} is not in the vocabulary"
                )));
            }
            if !seen.insert(word.as_str()) {
                return Err(BucketError::NotAPermutation(format!(
                    "{word:?} appears more than once"
                )));
            }
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Produces `count` independent uniform shuffles of the vocabulary.
///
/// One `u64` seed per permutation is drawn from `rng` up front and each
/// shuffle runs on its own [`StdRng`], so no shuffle state is shared and the
/// parallel path yields exactly the sequential result.
pub fn generate_permutations<R: Rng>(
    vocab: &Vocabulary,
    count: usize,
    rng: &mut R,
    parallel: bool,
) -> Vec<Permutation> {
    let base = vocab.to_vec();
    let seeds: Vec<u64> = (0..count).map(|_| rng.random()).collect();
    debug!(count, vocabulary = base.len(), parallel, "generating permutations");

    if parallel {
        seeds
            .par_iter()
            .map(|&seed| shuffle_with_seed(&base, seed))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&seed| shuffle_with_seed(&base, seed))
            .collect()
    }
}

fn shuffle_with_seed(base: &[String], seed: u64) -> Permutation {
    let mut words = base.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    words.shuffle(&mut rng);
    Permutation { words }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_of(n: usize) -> Vocabulary {
        (0..n).map(|i| format!("W{i:04}")).collect()
    }

    #[test]
    fn every_permutation_is_a_bijection() {
        let vocab = vocab_of(50);
        let mut rng = StdRng::seed_from_u64(1);
        let perms = generate_permutations(&vocab, 5, &mut rng, false);
        assert_eq!(perms.len(), 5);
        for perm in &perms {
            assert_eq!(perm.len(), vocab.len());
            let unique: HashSet<&str> = perm.iter().collect();
            assert_eq!(unique.len(), vocab.len());
            assert!(perm.iter().all(|w| vocab.contains(w)));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let vocab = vocab_of(30);
        let a = generate_permutations(&vocab, 4, &mut StdRng::seed_from_u64(9), false);
        let b = generate_permutations(&vocab, 4, &mut StdRng::seed_from_u64(9), false);
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_equals_sequential() {
        let vocab = vocab_of(200);
        let seq = generate_permutations(&vocab, 16, &mut StdRng::seed_from_u64(3), false);
        let par = generate_permutations(&vocab, 16, &mut StdRng::seed_from_u64(3), true);
        assert_eq!(seq, par);
    }

    #[test]
    fn permutations_differ_from_each_other_and_from_base_order() {
        let vocab = vocab_of(100);
        let perms = generate_permutations(&vocab, 3, &mut StdRng::seed_from_u64(5), false);
        let base = vocab.to_vec();
        for perm in &perms {
            assert_ne!(perm.words(), base.as_slice());
        }
        assert_ne!(perms[0], perms[1]);
        assert_ne!(perms[1], perms[2]);
    }

    #[test]
    fn empty_vocabulary_gives_empty_permutations() {
        let vocab = Vocabulary::new();
        let perms = generate_permutations(&vocab, 5, &mut StdRng::seed_from_u64(0), false);
        assert_eq!(perms.len(), 5);
        assert!(perms.iter().all(Permutation::is_empty));
    }

    #[test]
    fn from_order_accepts_bijection() {
        let vocab: Vocabulary = ["CAT", "DOG", "FISH", "BIRD"].into_iter().collect();
        let perm = Permutation::from_order(&vocab, vec!["DOG", "CAT", "FISH", "BIRD"]).unwrap();
        assert_eq!(perm.words(), &["DOG", "CAT", "FISH", "BIRD"]);
    }

    #[test]
    fn from_order_rejects_non_bijections() {
        let vocab: Vocabulary = ["A", "B", "C"].into_iter().collect();
        assert!(matches!(
            Permutation::from_order(&vocab, vec!["A", "B"]),
            Err(BucketError::NotAPermutation(_))
        ));
        assert!(matches!(
            Permutation::from_order(&vocab, vec!["A", "B", "B"]),
            Err(BucketError::NotAPermutation(_))
        ));
        assert!(matches!(
            Permutation::from_order(&vocab, vec!["A", "B", "Z"]),
            Err(BucketError::NotAPermutation(_))
        ));
    }
}
