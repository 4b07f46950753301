//! Presentation of pipeline results.
//!
//! Text output lists one line per band for every document,
//! `name<TAB>[W1, W2, W3]`, with a blank line after each document. JSON
//! output carries the same labels plus a bucket key per label and the list of
//! files that were skipped while loading.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use bucket::{HashBucketLabel, BUCKET_ALGORITHM};
use corpus::SkippedFile;
use serde::Serialize;

use crate::PipelineContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format {other:?} (expected text or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    algorithm: &'static str,
    documents: Vec<DocumentReport<'a>>,
    skipped: &'a [SkippedFile],
}

#[derive(Debug, Serialize)]
struct DocumentReport<'a> {
    document: &'a str,
    labels: Vec<LabelReport<'a>>,
}

#[derive(Debug, Serialize)]
struct LabelReport<'a> {
    band: usize,
    words: &'a HashBucketLabel,
    bucket: String,
}

/// Writes `ctx`'s labels to `out` in the requested format.
pub fn write_report<W: Write>(ctx: &PipelineContext, format: OutputFormat, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(ctx, out),
        OutputFormat::Json => write_json(ctx, out),
    }
}

/// Renders the text report into a string.
pub fn render_text(ctx: &PipelineContext) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_text(ctx, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_text<W: Write>(ctx: &PipelineContext, out: &mut W) -> io::Result<()> {
    for (name, labels) in ctx.labels() {
        for label in labels {
            writeln!(out, "{name}\t{label}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_json<W: Write>(ctx: &PipelineContext, out: &mut W) -> io::Result<()> {
    let documents = ctx
        .labels()
        .iter()
        .map(|(name, labels)| DocumentReport {
            document: name,
            labels: labels
                .iter()
                .enumerate()
                .map(|(band, words)| LabelReport {
                    band,
                    words,
                    bucket: format!("{:016x}", words.bucket_key(band)),
                })
                .collect(),
        })
        .collect();

    let report = Report {
        algorithm: BUCKET_ALGORITHM,
        documents,
        skipped: ctx.skipped(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
