use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::commands;

/// Entry point for the `matrix-provider` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "matrix-provider",
    about = "Resolve Matrix connection settings and build a shared client",
    version,
    long_about = None
)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the provider type name and version.
    Metadata,
    /// Print the provider configuration schema as JSON.
    Schema,
    /// Run one configure cycle and report its diagnostics.
    Configure(ConfigureArgs),
}

#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// JSON file with the provider configuration (reads stdin when omitted).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Data source to read with the configured client (repeatable).
    #[arg(long = "data-source")]
    pub data_sources: Vec<String>,

    /// Resource to read with the configured client (repeatable).
    #[arg(long = "resource")]
    pub resources: Vec<String>,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        commands::run(self).await
    }
}
