use anyhow::{Context, Result};
use clap::Parser;
use econlab_simulator::{run, SimulationConfig};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run econlab sessions with random bots.", long_about = None)]
struct Args {
    /// Path to the YAML simulation config.
    #[arg(short, long)]
    config: PathBuf,

    /// Overrides the seed from the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the log level from the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// Writes the JSON report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = SimulationConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    Level::from_str(&config.log_level)
        .with_context(|| format!("invalid log_level {}", config.log_level))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;

    // Logs go to stderr so stdout stays a clean report.
    let level = Level::from_str(&config.log_level)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    info!(config = %args.config.display(), "loaded config");

    let report = run(&config)?;
    let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
