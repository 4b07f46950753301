//! Umbrella crate for shuffle-based document LSH.
//!
//! Stitches the `corpus` and `bucket` stages into one batch pipeline:
//! load documents, shuffle the vocabulary, draw band sequences, select
//! representatives, assemble hash-bucket labels. All intermediate state
//! lives in a [`PipelineContext`] returned to the caller, so independent
//! runs never share anything but the code.

pub mod config;
pub mod report;

pub use bucket::{
    assemble_labels, generate_band_sequences, generate_permutations, select_all,
    select_representatives, BandSequence, BucketConfig, BucketError, HashBucketLabel, Permutation,
    RepresentativeSet, BUCKET_ALGORITHM, NO_REPRESENTATIVE,
};
pub use corpus::{
    load_dir, tokenize, tokenize_bytes, Corpus, CorpusError, Document, LoaderConfig, SkippedFile,
    Vocabulary,
};

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Labels per document name, each list in band order.
pub type LabelMap = BTreeMap<String, Vec<HashBucketLabel>>;

/// Errors that can abort a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Corpus(CorpusError),
    Bucket(BucketError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Corpus(err) => write!(f, "corpus failure: {err}"),
            PipelineError::Bucket(err) => write!(f, "bucketing failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Corpus(err) => Some(err),
            PipelineError::Bucket(err) => Some(err),
        }
    }
}

impl From<CorpusError> for PipelineError {
    fn from(value: CorpusError) -> Self {
        PipelineError::Corpus(value)
    }
}

impl From<BucketError> for PipelineError {
    fn from(value: BucketError) -> Self {
        PipelineError::Bucket(value)
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Permute,
    Band,
    Select,
    Label,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Permute => "permute",
            Stage::Band => "band",
            Stage::Select => "select",
            Stage::Label => "label",
        }
    }
}

/// Observer for per-stage timings. Passed explicitly to a run.
pub trait PipelineObserver: Send + Sync {
    /// `items` is the number of units the stage produced (documents,
    /// permutations, sequences, representative sets, or labelled documents).
    fn record_stage(&self, stage: Stage, latency: Duration, items: usize);
}

/// Observer that only emits `debug` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn record_stage(&self, stage: Stage, latency: Duration, items: usize) {
        debug!(
            stage = stage.as_str(),
            items,
            elapsed_us = latency.as_micros() as u64,
            "stage complete"
        );
    }
}

struct StageSpan<'a> {
    observer: &'a dyn PipelineObserver,
    stage: Stage,
    start: Instant,
}

impl<'a> StageSpan<'a> {
    fn start(observer: &'a dyn PipelineObserver, stage: Stage) -> Self {
        Self {
            observer,
            stage,
            start: Instant::now(),
        }
    }

    fn finish(self, items: usize) {
        self.observer
            .record_stage(self.stage, self.start.elapsed(), items);
    }
}

/// Everything one run produced, stage by stage.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    corpus: Corpus,
    permutations: Vec<Permutation>,
    band_sequences: Vec<BandSequence>,
    representatives: Vec<RepresentativeSet>,
    labels: LabelMap,
}

impl PipelineContext {
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn documents(&self) -> &[Document] {
        self.corpus.documents()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.corpus.vocabulary()
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        self.corpus.skipped()
    }

    pub fn permutations(&self) -> &[Permutation] {
        &self.permutations
    }

    pub fn band_sequences(&self) -> &[BandSequence] {
        &self.band_sequences
    }

    /// Representative sets aligned with [`PipelineContext::documents`].
    pub fn representatives(&self) -> &[RepresentativeSet] {
        &self.representatives
    }

    pub fn representatives_for(&self, name: &str) -> Option<&RepresentativeSet> {
        let idx = self.documents().iter().position(|d| d.name() == name)?;
        self.representatives.get(idx)
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn labels_for(&self, name: &str) -> Option<&[HashBucketLabel]> {
        self.labels.get(name).map(Vec::as_slice)
    }

    pub fn into_labels(self) -> LabelMap {
        self.labels
    }
}

/// Random source for a run: seeded from `cfg.seed`, or from the thread RNG
/// when no seed is configured.
pub fn seeded_rng(cfg: &BucketConfig) -> StdRng {
    let seed = cfg.seed.unwrap_or_else(|| rand::rng().random());
    StdRng::seed_from_u64(seed)
}

/// Runs permutation, band, selection, and label stages over `corpus`.
pub fn run_pipeline<R: Rng>(
    corpus: Corpus,
    cfg: &BucketConfig,
    rng: &mut R,
) -> Result<PipelineContext, PipelineError> {
    run_pipeline_observed(corpus, cfg, rng, &TracingObserver)
}

/// [`run_pipeline`] reporting stage timings to `observer`.
pub fn run_pipeline_observed<R: Rng>(
    corpus: Corpus,
    cfg: &BucketConfig,
    rng: &mut R,
    observer: &dyn PipelineObserver,
) -> Result<PipelineContext, PipelineError> {
    cfg.validate()?;

    let span = StageSpan::start(observer, Stage::Permute);
    let permutations =
        generate_permutations(corpus.vocabulary(), cfg.shuffle_count, rng, cfg.use_parallel);
    span.finish(permutations.len());

    let span = StageSpan::start(observer, Stage::Band);
    let band_sequences = generate_band_sequences(
        cfg.band_count,
        cfg.band_sequence_length,
        cfg.shuffle_count,
        rng,
    )?;
    span.finish(band_sequences.len());

    let ctx = assemble(corpus, permutations, band_sequences, cfg.use_parallel, observer);
    info!(
        documents = ctx.documents().len(),
        vocabulary = ctx.vocabulary().len(),
        shuffles = ctx.permutations.len(),
        bands = ctx.band_sequences.len(),
        skipped = ctx.skipped().len(),
        "pipeline complete"
    );
    Ok(ctx)
}

/// Runs selection and labelling with caller-supplied permutations and band
/// sequences instead of random ones.
pub fn run_pipeline_with(
    corpus: Corpus,
    permutations: Vec<Permutation>,
    band_sequences: Vec<BandSequence>,
    parallel: bool,
) -> PipelineContext {
    assemble(corpus, permutations, band_sequences, parallel, &TracingObserver)
}

fn assemble(
    corpus: Corpus,
    permutations: Vec<Permutation>,
    band_sequences: Vec<BandSequence>,
    parallel: bool,
    observer: &dyn PipelineObserver,
) -> PipelineContext {
    let span = StageSpan::start(observer, Stage::Select);
    let representatives = select_all(corpus.documents(), &permutations, parallel);
    span.finish(representatives.len());

    let span = StageSpan::start(observer, Stage::Label);
    let labels: LabelMap = if corpus.vocabulary().is_empty() {
        if !corpus.is_empty() {
            warn!(
                documents = corpus.len(),
                "vocabulary is empty; every label is empty"
            );
        }
        corpus
            .documents()
            .iter()
            .map(|doc| {
                let empty = vec![HashBucketLabel::default(); band_sequences.len()];
                (doc.name().to_owned(), empty)
            })
            .collect()
    } else {
        corpus
            .documents()
            .iter()
            .zip(&representatives)
            .map(|(doc, reps)| {
                if reps.is_short() {
                    warn!(
                        document = doc.name(),
                        missing = reps.missing.len(),
                        "document has no word in some permutations; labels are partial"
                    );
                }
                (doc.name().to_owned(), assemble_labels(reps, &band_sequences))
            })
            .collect()
    };
    span.finish(labels.len());

    PipelineContext {
        corpus,
        permutations,
        band_sequences,
        representatives,
        labels,
    }
}

/// Loads `dir` and runs the pipeline with a random source derived from `cfg`.
pub fn process_dir(
    dir: impl AsRef<Path>,
    loader_cfg: &LoaderConfig,
    cfg: &BucketConfig,
) -> Result<PipelineContext, PipelineError> {
    process_dir_observed(dir, loader_cfg, cfg, &TracingObserver)
}

/// [`process_dir`] reporting stage timings to `observer`.
pub fn process_dir_observed(
    dir: impl AsRef<Path>,
    loader_cfg: &LoaderConfig,
    cfg: &BucketConfig,
    observer: &dyn PipelineObserver,
) -> Result<PipelineContext, PipelineError> {
    cfg.validate()?;
    let span = StageSpan::start(observer, Stage::Load);
    let corpus = load_dir(dir, loader_cfg)?;
    span.finish(corpus.len());

    let mut rng = seeded_rng(cfg);
    run_pipeline_observed(corpus, cfg, &mut rng, observer)
}

/// Runs the pipeline over in-memory `(name, text)` pairs.
pub fn process_texts<I, N, T>(texts: I, cfg: &BucketConfig) -> Result<PipelineContext, PipelineError>
where
    I: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    T: AsRef<str>,
{
    let corpus = Corpus::from_texts(texts)?;
    let mut rng = seeded_rng(cfg);
    run_pipeline(corpus, cfg, &mut rng)
}
