use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use etldp1::cli::Cli;
use etldp1::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    init_logging(&config.log_filter);
    debug!("Starting with {:?}", config);

    let normalizer = config
        .normalizer()
        .context("Failed to load public suffix rules")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    cli.run(&normalizer, stdin.lock(), stdout.lock())
}
