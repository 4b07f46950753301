use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use fxhash::FxHashSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::LoaderConfig;
use crate::document::Document;
use crate::error::CorpusError;
use crate::token::tokenize_bytes;
use crate::vocabulary::Vocabulary;

/// A file the loader had to leave out, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

impl From<SkippedFile> for CorpusError {
    fn from(skipped: SkippedFile) -> Self {
        CorpusError::FileRead {
            name: skipped.name,
            reason: skipped.reason,
        }
    }
}

/// Documents plus the vocabulary gathered from them.
///
/// Invariant: every vocabulary word occurs in at least one document and every
/// document token is a vocabulary word. Both [`Corpus::push`] and the
/// constructors maintain it.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    vocabulary: Vocabulary,
    skipped: Vec<SkippedFile>,
    names: FxHashSet<String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a corpus from in-memory `(name, text)` pairs, preserving order.
    pub fn from_texts<I, N, T>(texts: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let mut corpus = Self::new();
        for (name, text) in texts {
            corpus.push(Document::from_text(name, text.as_ref()))?;
        }
        Ok(corpus)
    }

    /// Builds a corpus from prepared documents, preserving order.
    pub fn from_documents<I>(documents: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut corpus = Self::new();
        for doc in documents {
            corpus.push(doc)?;
        }
        Ok(corpus)
    }

    /// Appends a document and merges its tokens into the vocabulary.
    pub fn push(&mut self, doc: Document) -> Result<(), CorpusError> {
        if doc.name().trim().is_empty() {
            return Err(CorpusError::MissingName);
        }
        if !self.names.insert(doc.name().to_owned()) {
            return Err(CorpusError::DuplicateName(doc.name().to_owned()));
        }
        self.vocabulary.extend_from(&doc);
        self.documents.push(doc);
        Ok(())
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Files that failed to load. Empty for in-memory corpora.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.name() == name)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Loads every matching file in `dir` (non-recursive) into a [`Corpus`].
///
/// Files are processed in byte-wise filename order so the result does not
/// depend on how the platform enumerates the directory. A file that cannot
/// be read is logged, recorded in [`Corpus::skipped`], and left out; only a
/// missing or unreadable directory fails the whole load.
pub fn load_dir(dir: impl AsRef<Path>, cfg: &LoaderConfig) -> Result<Corpus, CorpusError> {
    let dir = dir.as_ref();
    let started = Instant::now();
    let unavailable = |reason: String| CorpusError::ResourceUnavailable {
        path: dir.to_path_buf(),
        reason,
    };

    let meta = fs::metadata(dir).map_err(|err| unavailable(err.to_string()))?;
    if !meta.is_dir() {
        return Err(unavailable("not a directory".into()));
    }
    let entries = fs::read_dir(dir).map_err(|err| unavailable(err.to_string()))?;

    let mut corpus = Corpus::new();
    let mut candidates: Vec<(String, OsString, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        // Anything that is not a directory goes through `read_file`, so a
        // broken link ends up in `skipped` instead of vanishing.
        if !cfg.accepts_extension(&path) || path.is_dir() {
            continue;
        }
        let raw = entry.file_name();
        let name = raw.to_string_lossy().into_owned();
        candidates.push((name, raw, path));
    }
    // Raw names break ties between names that collide after lossy decoding.
    candidates.sort_unstable_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.as_encoded_bytes().cmp(b.1.as_encoded_bytes()))
    });

    for (name, _, path) in candidates {
        match read_file(&path, cfg) {
            Ok(bytes) => {
                let doc = Document::new(name.clone(), tokenize_bytes(&bytes));
                let tokens = doc.tokens().len();
                match corpus.push(doc) {
                    Ok(()) => debug!(document = %name, tokens, "loaded document"),
                    Err(err) => {
                        // Lossy name conversion can map distinct files to one name.
                        warn!(file = %name, error = %err, "skipping file");
                        corpus.skipped.push(SkippedFile {
                            name,
                            reason: err.to_string(),
                        });
                    }
                }
            }
            Err(reason) => {
                warn!(file = %name, %reason, "skipping file");
                corpus.skipped.push(SkippedFile { name, reason });
            }
        }
    }

    debug!(
        dir = %dir.display(),
        documents = corpus.len(),
        skipped = corpus.skipped.len(),
        vocabulary = corpus.vocabulary.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "corpus loaded"
    );
    Ok(corpus)
}

fn read_file(path: &Path, cfg: &LoaderConfig) -> Result<Vec<u8>, String> {
    if let Some(limit) = cfg.max_file_bytes {
        let len = fs::metadata(path).map_err(|err| err.to_string())?.len();
        if len > limit {
            return Err(format!("file is {len} bytes, limit is {limit}"));
        }
    }
    fs::read(path).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_txt_files_in_sorted_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "dog fish bird").unwrap();
        fs::write(dir.path().join("a.txt"), "cat dog cat fish").unwrap();
        fs::write(dir.path().join("c.md"), "ignored words").unwrap();
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let corpus = load_dir(dir.path(), &LoaderConfig::default()).unwrap();
        let names: Vec<&str> = corpus.documents().iter().map(Document::name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(corpus.vocabulary().to_vec(), vec!["BIRD", "CAT", "DOG", "FISH"]);
        assert!(corpus.skipped().is_empty());
    }

    #[test]
    fn tokens_span_multiple_lines() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("multi.txt"), "first line\nsecond LINE\r\n3rd").unwrap();

        let corpus = load_dir(dir.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(
            corpus.documents()[0].tokens(),
            &["FIRST", "LINE", "SECOND", "LINE", "RD"]
        );
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = load_dir(&missing, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, CorpusError::ResourceUnavailable { ref path, .. } if *path == missing));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        let err = load_dir(&file, &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, CorpusError::ResourceUnavailable { .. }));
    }

    #[test]
    fn oversized_file_is_skipped_and_recorded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("big.txt"), "a".repeat(64)).unwrap();
        fs::write(dir.path().join("small.txt"), "tiny").unwrap();

        let cfg = LoaderConfig::new().with_max_file_bytes(Some(16));
        let corpus = load_dir(dir.path(), &cfg).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.documents()[0].name(), "small.txt");
        assert_eq!(corpus.skipped().len(), 1);
        assert_eq!(corpus.skipped()[0].name, "big.txt");
        assert!(!corpus.vocabulary().contains("A"));
    }

    #[test]
    fn non_utf8_content_still_loads() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("latin1.txt"), b"caf\xe9 cr\xe8me").unwrap();
        let corpus = load_dir(dir.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(corpus.documents()[0].tokens(), &["CAF", "CR", "ME"]);
    }

    #[test]
    fn empty_directory_yields_empty_corpus() {
        let dir = tempdir().unwrap();
        let corpus = load_dir(dir.path(), &LoaderConfig::default()).unwrap();
        assert!(corpus.is_empty());
        assert!(corpus.vocabulary().is_empty());
    }

    #[test]
    fn from_texts_rejects_duplicates_and_blank_names() {
        let err = Corpus::from_texts([("a", "x"), ("a", "y")]).unwrap_err();
        assert_eq!(err, CorpusError::DuplicateName("a".into()));

        let err = Corpus::from_texts([(" ", "x")]).unwrap_err();
        assert_eq!(err, CorpusError::MissingName);
    }

    #[test]
    fn closure_between_documents_and_vocabulary() {
        let corpus = Corpus::from_texts([
            ("one", "The quick brown fox"),
            ("two", "jumps over the lazy dog!"),
            ("three", "42 -- ..."),
        ])
        .unwrap();

        for doc in corpus.documents() {
            for token in doc.tokens() {
                assert!(corpus.vocabulary().contains(token));
            }
        }
        for word in corpus.vocabulary().iter() {
            assert!(corpus.documents().iter().any(|d| d.contains(word)));
        }
        assert!(corpus.get("three").unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn colliding_lossy_names_are_skipped_not_fatal() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let first = dir.path().join(OsStr::from_bytes(b"r\xfe.txt"));
        let second = dir.path().join(OsStr::from_bytes(b"r\xff.txt"));
        if fs::write(&first, "alpha").is_err() || fs::write(&second, "beta").is_err() {
            // Filesystem insists on UTF-8 names.
            return;
        }
        fs::write(dir.path().join("ok.txt"), "gamma").unwrap();

        let corpus = load_dir(dir.path(), &LoaderConfig::default()).unwrap();
        let names: Vec<&str> = corpus.documents().iter().map(Document::name).collect();
        assert_eq!(names, vec!["ok.txt", "r\u{fffd}.txt"]);
        assert_eq!(corpus.skipped().len(), 1);
        assert_eq!(corpus.skipped()[0].name, "r\u{fffd}.txt");
        assert!(corpus.skipped()[0].reason.contains("duplicate"));
        assert!(corpus.vocabulary().contains("GAMMA"));
        assert!(corpus.vocabulary().contains("ALPHA"));
        assert!(!corpus.vocabulary().contains("BETA"));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_reported_as_skipped() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("link.txt")).unwrap();
        fs::write(dir.path().join("real.txt"), "present").unwrap();

        let corpus = load_dir(dir.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.skipped().len(), 1);
        assert_eq!(corpus.skipped()[0].name, "link.txt");
    }

    #[test]
    fn file_named_only_by_extension_is_loaded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".txt"), "hidden words").unwrap();

        let corpus = load_dir(dir.path(), &LoaderConfig::default()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.documents()[0].name(), ".txt");
    }

    #[test]
    fn skipped_file_converts_to_read_error() {
        let skipped = SkippedFile {
            name: "x.txt".into(),
            reason: "permission denied".into(),
        };
        let err: CorpusError = skipped.into();
        assert_eq!(err.to_string(), "failed to read x.txt: permission denied");
    }
}
