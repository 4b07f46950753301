use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Set of unique tokens across a corpus.
///
/// Enumeration order is lexicographic and therefore fixed for a given token
/// set. Permutations are shuffles of this order, so a seeded run is
/// reproducible no matter how the documents were enumerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the vocabulary of `documents`.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut vocab = Self::new();
        for doc in documents {
            vocab.extend_from(doc);
        }
        vocab
    }

    /// Adds every token of `doc`.
    pub fn extend_from(&mut self, doc: &Document) {
        for token in doc.distinct_tokens() {
            if !self.words.contains(token) {
                self.words.insert(token.to_owned());
            }
        }
    }

    /// Returns `true` if the word was not present yet.
    pub fn insert(&mut self, word: impl Into<String>) -> bool {
        self.words.insert(word.into())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in the fixed enumeration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Owned copy of the words in enumeration order.
    pub fn to_vec(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
