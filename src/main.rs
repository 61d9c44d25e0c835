mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    matrix_provider::logging::init_tracing(cli.verbose);
    cli.run().await
}
