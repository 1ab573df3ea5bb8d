//! MentorLens — scoring, search and comparison for research projects and mentors.
//! Entry point for the `mentorlens` binary.

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mentorlens=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let catalog = commands::open_catalog(&config, cli.dataset.as_deref()).await?;
    commands::run(&catalog, &config, cli.command).await
}
