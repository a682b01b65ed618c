//! Wisata CLI - Command-line front-end
//!
//! Runs the same nearest-site query as the HTTP API against a local GeoJSON
//! dataset, with table output for humans and JSON for scripts.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    commands::execute(cli)
}
