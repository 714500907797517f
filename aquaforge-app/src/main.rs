use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod plotting;
mod workflow;

/// Plans a multi-stage aquaculture production run and compares sequential against
/// overlapping batch scheduling.
#[derive(Debug, Parser)]
#[command(name = "aquaforge", version, about)]
pub struct Cli {
    /// A species YAML file, or a directory of them. Built-in species are used when omitted.
    #[arg(long, env = "AQUAFORGE_SPECIES")]
    pub species: Option<PathBuf>,

    /// A facility YAML file. The reference plant is used when omitted.
    #[arg(long, env = "AQUAFORGE_FACILITY")]
    pub facility_file: Option<PathBuf>,

    #[arg(long, env = "AQUAFORGE_MIN_LARVAE", default_value_t = 1_000_000)]
    pub min_larvae: u64,

    #[arg(long, env = "AQUAFORGE_MAX_LARVAE", default_value_t = 2_500_000)]
    pub max_larvae: u64,

    /// Seed for the larvae draw; runs with the same seed produce the same batches.
    #[arg(long, env = "AQUAFORGE_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "AQUAFORGE_OUTPUT_DIR", default_value = "./data/runs")]
    pub output_dir: PathBuf,

    /// Skip PNG chart generation.
    #[arg(long)]
    pub no_charts: bool,

    #[command(flatten)]
    pub facility: config::FacilityOverrides,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    println!("--- Aquaforge Production Planner ---");

    let output_dir = workflow::run(&cli)?;

    println!("\nPlanning run complete. Results are in '{}'", output_dir.display());

    Ok(())
}
