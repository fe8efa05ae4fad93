//! eo-filter: parse a Vivado log and print messages, summary, JSON or
//! InfluxDB line protocol.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use eo_cli::cli::{Cli, Commands};
use eo_cli::config::CliConfig;
use eo_cli::report;
use eo_vivado::{Adapter, FileLogSource, LogSource, PolicyReport, ProcessingRun, Processor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Load config ─────────────────────────────────────────────
    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CliConfig::default(),
    };

    // Diagnostics go to stderr so stdout stays machine-readable.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if config.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.cmd {
        Commands::Synth(args) => {
            let adapter = load_adapter(
                args.adapter.as_ref().or(config.adapter.as_ref()),
                Adapter::vivado_synthesis,
            )?;
            let mut processor = Processor::new(Arc::new(adapter))?;
            let run = parse(&mut processor, &args.file).await?;
            let policy = PolicyReport::evaluate(run);
            print!("{}", report::render(&args, run, &policy, &config.influx)?);
        }
        Commands::Impl(args) => {
            let adapter = load_adapter(
                args.adapter.as_ref().or(config.implementation_adapter.as_ref()),
                Adapter::vivado_implementation,
            )?;
            let mut processor = Processor::new(Arc::new(adapter))?;
            let run = parse(&mut processor, &args.file).await?;
            print!("{}", report::render_implementation(&args, run)?);
        }
    }
    Ok(())
}

// ── Adapter ─────────────────────────────────────────────────────

fn load_adapter(path: Option<&PathBuf>, builtin: fn() -> Adapter) -> anyhow::Result<Adapter> {
    let adapter = match path {
        Some(path) => Adapter::from_file(path)
            .with_context(|| format!("loading adapter {}", path.display()))?,
        None => builtin(),
    };
    tracing::info!(
        adapter = %adapter.name,
        sections = adapter.sections.len(),
        commands = adapter.commands.len(),
        "adapter loaded"
    );
    Ok(adapter)
}

// ── Parse ───────────────────────────────────────────────────────

async fn parse<'p>(
    processor: &'p mut Processor,
    file: &Path,
) -> anyhow::Result<&'p ProcessingRun> {
    let path = file.to_string_lossy();
    let lines = FileLogSource.read_lines(&path).await?;
    Ok(processor.parse(lines))
}
