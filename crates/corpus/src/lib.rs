//! Corpus layer for shuffle-based document LSH.
//!
//! Turns a directory of text files (or in-memory texts) into named,
//! tokenized [`Document`]s and the global [`Vocabulary`] they share.
//!
//! ## What we do
//!
//! - Pick up `.txt` files (configurable) from one directory, sorted by name
//! - Upper-case ASCII letters and split on everything else
//! - Keep each document's tokens in order, duplicates included
//! - Build the vocabulary with a fixed, lexicographic enumeration order
//! - Skip files that cannot be read and report them instead of failing
//!
//! Only a missing or unreadable directory is fatal.
//!
//! ```
//! use corpus::Corpus;
//!
//! let corpus = Corpus::from_texts([
//!     ("doc1.txt", "cat dog cat fish"),
//!     ("doc2.txt", "dog fish bird"),
//! ])
//! .unwrap();
//!
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(corpus.vocabulary().to_vec(), vec!["BIRD", "CAT", "DOG", "FISH"]);
//! ```

mod config;
mod document;
mod error;
mod loader;
mod token;
mod vocabulary;

pub use crate::config::LoaderConfig;
pub use crate::document::Document;
pub use crate::error::CorpusError;
pub use crate::loader::{load_dir, Corpus, SkippedFile};
pub use crate::token::{tokenize, tokenize_bytes};
pub use crate::vocabulary::Vocabulary;
