//! Cozy - Cozy Cart support chat in the terminal.

use anyhow::Result;
use clap::Parser;

use cozy_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cozy_cli::cli::resolve_config(&cli)?;

    let _log_guard = cozy_cli::logging::init(&cli, &config)?;

    cozy_cli::run(cli, config).await
}
