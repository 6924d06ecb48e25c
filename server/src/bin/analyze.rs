//! `autoprice-analyze`: run the analysis on a CSV file and print the report.

use anyhow::{Context, Result};
use autoprice::dataset::read_records_from_path;
use autoprice::{analyze, PipelineConfig, SvgChartRenderer};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "autoprice-analyze", version, about = "Analyze a CSV of vehicle listings")]
struct Cli {
    /// CSV file with a header row of listing columns.
    file: PathBuf,
    /// Omit chart images from the report.
    #[arg(long)]
    no_charts: bool,
    /// Seed for the split and the forest.
    #[arg(long, default_value_t = autoprice::config::DEFAULT_SEED)]
    seed: u64,
    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let records = read_records_from_path(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let config = PipelineConfig::default()
        .with_seed(cli.seed)
        .with_render_charts(!cli.no_charts);
    let renderer = SvgChartRenderer::new();
    let report = analyze(&records, &config, Some(&renderer))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
