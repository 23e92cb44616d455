use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agristep::{EngineBuilder, ReportFormat, SimConfig, WaitStrategy};

#[derive(Debug, Parser)]
#[command(author, version, about = "Lock-step crop, deer and weed simulation")]
struct Cli {
    /// Path to a scenario YAML file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override how agents wait at the barrier
    #[arg(long, value_enum)]
    wait: Option<WaitStrategy>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::from_yaml(path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(wait) = cli.wait {
        config.barrier.wait = wait;
    }

    init_tracing(&config.logging.level);

    if cli.print_config {
        print!("{}", config.to_yaml_string()?);
        return Ok(());
    }

    let summary = EngineBuilder::standard(config)
        .build()
        .context("Failed to set up simulation")?
        .run()?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            summary.history.write_report(cli.format, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), months = summary.months, "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            summary.history.write_report(cli.format, &mut writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins over
/// the scenario's level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
