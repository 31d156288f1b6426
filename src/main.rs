//! `rapid-topics` command line front end
//!
//! Loads typed text and files into one batch, runs the pipeline once and
//! prints cluster labels, topics, optional recommendations and the summary
//! of the first document.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rapid_topics::{
    BatchBuilder, DecodeWarning, Language, LoadedBatch, Pipeline, PipelineConfig, PipelineOutput,
    RunOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Cluster academic texts, extract their topics, and summarize the first one.
#[derive(Debug, Parser)]
#[command(name = "rapid-topics", version, about)]
struct Cli {
    /// Text files to analyse
    files: Vec<PathBuf>,

    /// Text typed directly on the command line, added before the files
    #[arg(short, long)]
    text: Option<String>,

    /// Number of clusters and topics (2-10)
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u8).range(2..=10))]
    clusters: Option<u8>,

    /// Also list the documents that mention the first topic's keywords
    #[arg(short, long)]
    recommend: bool,

    /// Document language: pt or en
    #[arg(short, long)]
    language: Option<Language>,

    /// Directory for cached language resources
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// JSON file with pipeline settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    documents_loaded: usize,
    warnings: &'a [DecodeWarning],
    #[serde(flatten)]
    output: &'a PipelineOutput,
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            PipelineConfig::from_json_str(&json)
                .with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(k) = cli.clusters {
        config.num_clusters = usize::from(k);
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Prepare the pipeline, load the batch and run it once
fn run(cli: &Cli) -> Result<(LoadedBatch, PipelineOutput)> {
    let config = load_config(cli)?;
    // Language resources are cached before any input is read
    let pipeline = Pipeline::from_config(config)?;

    let mut builder = BatchBuilder::new();
    if let Some(text) = &cli.text {
        builder.add_manual_text(text);
    }
    for path in &cli.files {
        builder.add_file(path);
    }
    for warning in builder.warnings() {
        eprintln!("warning: {warning}");
    }
    let batch = builder.finish()?;
    info!(documents = batch.documents.len(), "batch loaded");

    let options = RunOptions::new().with_recommendations(cli.recommend);
    let output = pipeline.run(&batch.documents, options)?;
    Ok((batch, output))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let (batch, output) = run(&cli)?;

    match cli.format {
        OutputFormat::Text => {
            println!("{} documents loaded.", batch.documents.len());
            println!();
            println!("{output}");
        }
        OutputFormat::Json => {
            let report = JsonReport {
                documents_loaded: batch.documents.len(),
                warnings: &batch.warnings,
                output: &output,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapid_topics::{ErrorCode, PipelineRuntimeError};

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("rapid-topics").chain(args.iter().copied()))
    }

    #[test]
    fn test_broken_cache_reported_before_input() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "file").unwrap();
        let missing = dir.path().join("missing.txt");

        // With no readable input the batch alone would fail as NoDocuments
        let args = cli(&[
            "--cache-dir",
            blocker.to_str().unwrap(),
            missing.to_str().unwrap(),
        ]);
        let err = run(&args).unwrap_err();
        let err = err.downcast_ref::<PipelineRuntimeError>().unwrap();
        assert_eq!(err.code, ErrorCode::ResourceUnavailable);
    }

    #[test]
    fn test_run_with_typed_text_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let paper = dir.path().join("paper.txt");
        fs::write(&paper, "Proteins fold into shapes. Genes encode proteins.").unwrap();
        let cache = dir.path().join("lang_data");

        let args = cli(&[
            "--language",
            "en",
            "--cache-dir",
            cache.to_str().unwrap(),
            "--text",
            "Telescopes observe galaxies. Galaxies hold stars.",
            "--recommend",
            paper.to_str().unwrap(),
        ]);
        let (batch, output) = run(&args).unwrap();
        assert_eq!(batch.documents.len(), 2);
        assert_eq!(output.clusters.len(), 2);
        assert!(output.recommendations.is_some());
    }

    #[test]
    fn test_cluster_flag_range() {
        assert!(Cli::try_parse_from(["rapid-topics", "-k", "11"]).is_err());
        assert_eq!(cli(&["-k", "4"]).clusters, Some(4));
    }
}
