//! Representative selection (the MinHash step).
//!
//! For each permutation, a document's representative is the earliest word in
//! that permutation which the document contains. Documents that share most of
//! their words are likely to agree on it.

use corpus::Document;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::permutation::Permutation;

/// Per-document representatives, one per permutation that had a match.
///
/// Permutations without any matching word contribute nothing, so
/// `representatives` can be shorter than the number of permutations. The
/// indices of those permutations are kept in `missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeSet {
    pub representatives: Vec<String>,
    pub missing: Vec<usize>,
}

impl RepresentativeSet {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.representatives.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }

    /// `true` when some permutation produced no representative.
    pub fn is_short(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Selects `doc`'s representative for every permutation, in order.
pub fn select_representatives(doc: &Document, permutations: &[Permutation]) -> RepresentativeSet {
    let mut set = RepresentativeSet {
        representatives: Vec::with_capacity(permutations.len()),
        missing: Vec::new(),
    };

    for (idx, perm) in permutations.iter().enumerate() {
        match first_present(doc, perm) {
            Some(word) => set.representatives.push(word.to_owned()),
            None => set.missing.push(idx),
        }
    }

    set
}

/// Runs [`select_representatives`] for every document, preserving order.
pub fn select_all(
    documents: &[Document],
    permutations: &[Permutation],
    parallel: bool,
) -> Vec<RepresentativeSet> {
    if parallel {
        documents
            .par_iter()
            .map(|doc| select_representatives(doc, permutations))
            .collect()
    } else {
        documents
            .iter()
            .map(|doc| select_representatives(doc, permutations))
            .collect()
    }
}

#[inline]
fn first_present<'p>(doc: &Document, perm: &'p Permutation) -> Option<&'p str> {
    perm.iter().find(|word| doc.contains(word))
}
