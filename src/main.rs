// src/main.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use acronorm::{find_acronyms, load_registry, AcronymExpander, SeenSet, Settings, TranscriptProcessor};

const DEFAULT_REGISTRY: &str = "acronyms.json";

#[derive(Parser, Debug)]
#[command(name = "acronorm")]
#[command(about = "Normalize spoken letter sequences and expand acronyms in a transcript", long_about = None)]
struct Cli {
    /// Transcript file, one utterance per line
    transcript: PathBuf,

    /// Registry JSON (map or seed list); falls back to the built-in seed list if missing
    #[arg(long)]
    registry: Option<PathBuf>,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report Latin acronyms left in the normalized text
    #[arg(long)]
    spot: bool,

    /// Expand each code once for the whole file instead of once per line
    #[arg(long)]
    continuous: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let rules_init_start = Instant::now();
    let registry_path = cli
        .registry
        .clone()
        .or_else(|| settings.registry.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY));
    let registry = load_registry(&registry_path)
        .with_context(|| format!("loading registry from {}", registry_path.display()))?;
    let normalizer = settings.normalizer().context("building lexicon")?;
    let processor = TranscriptProcessor::new(normalizer, AcronymExpander::new(registry));
    info!("Rules initialized (took {:?})", rules_init_start.elapsed());

    let content_read_start = Instant::now();
    let content = fs::read_to_string(&cli.transcript)
        .with_context(|| format!("reading transcript {}", cli.transcript.display()))?;
    info!(
        "Read {} bytes from {} (took {:?})",
        content.len(),
        cli.transcript.display(),
        content_read_start.elapsed()
    );

    let lines: Vec<&str> = content.lines().collect();
    let start_time = Instant::now();
    let processed = if cli.continuous {
        let mut seen = SeenSet::new();
        lines
            .iter()
            .map(|line| processor.process_with(line, &mut seen))
            .collect::<Vec<_>>()
    } else {
        processor.process_batch(&lines)
    };
    info!("Processed {} lines in {:?}", lines.len(), start_time.elapsed());

    let mut result = processed.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }

    if cli.spot {
        report_acronyms(&processor, &lines);
    }

    match &cli.output {
        Some(path) => write_output(path, &result)?,
        None => print!("{}", result),
    }
    Ok(())
}

/// Acronyms present after normalization, marking the ones the registry lacks.
fn report_acronyms(processor: &TranscriptProcessor, lines: &[&str]) {
    let found: Vec<Vec<String>> = lines
        .par_iter()
        .map(|line| find_acronyms(&processor.normalizer().normalize(line)))
        .collect();
    let mut codes: Vec<String> = found.into_iter().flatten().collect();
    codes.sort();
    codes.dedup();

    let expander = processor.expander().snapshot();
    let unknown: Vec<&str> = codes
        .iter()
        .map(String::as_str)
        .filter(|code| expander.registry().get(code).is_none())
        .collect();
    debug!("Spotted acronyms: {:?}", codes);
    info!(
        "Spotted {} distinct acronym(s), {} not in the registry: {:?}",
        codes.len(),
        unknown.len(),
        unknown
    );
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
