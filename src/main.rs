use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use doclsh::config::LshConfig;
use doclsh::report::{write_report, OutputFormat};
use tracing_subscriber::EnvFilter;

/// Group text documents by shuffle-based MinHash bucket labels.
#[derive(Parser, Debug)]
#[command(name = "doclsh", version, about)]
struct Cli {
    /// Directory holding the documents.
    dir: PathBuf,

    /// YAML configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of vocabulary shuffles.
    #[arg(long)]
    shuffles: Option<usize>,

    /// Number of bands (labels per document).
    #[arg(long)]
    bands: Option<usize>,

    /// Representatives per label.
    #[arg(long = "band-length")]
    band_length: Option<usize>,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Run selection on all cores.
    #[arg(long)]
    parallel: bool,

    /// Output format: text or json.
    #[arg(long)]
    format: Option<OutputFormat>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let file_cfg = match &cli.config {
        Some(path) => LshConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LshConfig::default(),
    };

    let loader_cfg = file_cfg.loader_config();
    let mut bucket_cfg = file_cfg.bucket_config();
    if let Some(n) = cli.shuffles {
        bucket_cfg.shuffle_count = n;
    }
    if let Some(n) = cli.bands {
        bucket_cfg.band_count = n;
    }
    if let Some(n) = cli.band_length {
        bucket_cfg.band_sequence_length = n;
    }
    if cli.seed.is_some() {
        bucket_cfg.seed = cli.seed;
    }
    bucket_cfg.use_parallel |= cli.parallel;

    let format = match cli.format {
        Some(format) => format,
        None => file_cfg
            .output
            .format
            .parse()
            .map_err(anyhow::Error::msg)?,
    };

    let ctx = doclsh::process_dir(&cli.dir, &loader_cfg, &bucket_cfg)
        .with_context(|| format!("processing {}", cli.dir.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&ctx, format, &mut out)?;
    out.flush()?;

    Ok(())
}
