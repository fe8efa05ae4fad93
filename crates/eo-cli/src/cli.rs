//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "eo-filter",
    version,
    about = "Filter and summarise AMD/Xilinx Vivado logs",
    arg_required_else_help = true
)]
pub struct Cli {
    /// CLI configuration file (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a Vivado synthesis log (*.vds).
    Synth(SynthArgs),
    /// Parse a Vivado implementation log (*.vdi).
    Impl(ImplArgs),
}

#[derive(Debug, Args)]
pub struct SynthArgs {
    /// Synthesis log file.
    #[arg(long)]
    pub file: PathBuf,

    /// Adapter TOML overriding the built-in section list.
    #[arg(long)]
    pub adapter: Option<PathBuf>,

    /// List INFO messages.
    #[arg(long)]
    pub info: bool,

    /// List WARNING messages.
    #[arg(long)]
    pub warning: bool,

    /// List CRITICAL WARNING messages.
    #[arg(long)]
    pub critical: bool,

    /// List ERROR messages.
    #[arg(long)]
    pub error: bool,

    /// Print the whole run and the policy report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print InfluxDB line protocol.
    #[arg(long)]
    pub influxdb: bool,
}

#[derive(Debug, Args)]
pub struct ImplArgs {
    /// Implementation log file.
    #[arg(long)]
    pub file: PathBuf,

    /// Adapter TOML overriding the built-in command and task lists.
    #[arg(long)]
    pub adapter: Option<PathBuf>,

    /// List INFO messages.
    #[arg(long)]
    pub info: bool,

    /// List WARNING messages.
    #[arg(long)]
    pub warning: bool,

    /// List CRITICAL WARNING messages.
    #[arg(long)]
    pub critical: bool,

    /// List ERROR messages.
    #[arg(long)]
    pub error: bool,

    /// Print the whole run as JSON.
    #[arg(long)]
    pub json: bool,
}
