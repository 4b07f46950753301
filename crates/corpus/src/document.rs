//! Document type produced by the corpus loader.
//!
//! A [`Document`] owns its token sequence in source order (duplicates kept)
//! together with a hashed set of the same tokens, so membership checks made
//! by the representative selector are constant time instead of a scan over
//! the sequence.
//!
//! # Examples
//!
//! ```rust
//! use corpus::Document;
//!
//! let doc = Document::from_text("doc1.txt", "cat dog cat fish");
//! assert_eq!(doc.name(), "doc1.txt");
//! assert_eq!(doc.tokens(), &["CAT", "DOG", "CAT", "FISH"]);
//! assert!(doc.contains("FISH"));
//! assert!(!doc.contains("BIRD"));
//! assert_eq!(doc.distinct_len(), 3);
//! ```

use fxhash::FxHashSet;
use serde::Serialize;

use crate::token::tokenize;

/// A named, immutable, tokenized text document.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    name: String,
    tokens: Vec<String>,
    #[serde(skip)]
    token_set: FxHashSet<String>,
}

impl Document {
    /// Builds a document from already-normalized tokens.
    pub fn new(name: impl Into<String>, tokens: Vec<String>) -> Self {
        let token_set = tokens.iter().cloned().collect();
        Self {
            name: name.into(),
            tokens,
            token_set,
        }
    }

    /// Tokenizes `text` and builds a document from the result.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, tokenize(text))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tokens in source order, duplicates retained.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Constant-time membership test.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.token_set.contains(token)
    }

    /// Number of distinct tokens.
    pub fn distinct_len(&self) -> usize {
        self.token_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates the distinct tokens in arbitrary order.
    pub fn distinct_tokens(&self) -> impl Iterator<Item = &str> {
        self.token_set.iter().map(String::as_str)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.tokens == other.tokens
    }
}

impl Eq for Document {}
