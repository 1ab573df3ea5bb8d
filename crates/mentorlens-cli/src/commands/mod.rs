//! Subcommand handlers. Every handler prints JSON to stdout.

mod compare;
mod scores;
mod search;
mod state;
mod weights;

use std::sync::Arc;

use anyhow::Context;
use mentorlens_catalog::{Catalog, DatasetLoader, DatasetSource};
use mentorlens_db::Database;
use serde::Serialize;
use tracing::debug;

use crate::cli::Commands;
use crate::config::Config;

pub async fn open_catalog(config: &Config, dataset_override: Option<&str>) -> anyhow::Result<Catalog> {
    let source = match dataset_override {
        Some(location) => DatasetSource::from_location(location),
        None => config.dataset.source(),
    };
    debug!(dataset = %source.describe(), storage = %config.storage.path, "Opening catalog");

    let db = Database::open(&config.storage.path)
        .await
        .with_context(|| format!("opening storage at {}", config.storage.path))?
        .with_io_timeout(config.storage.io_timeout());
    let loader = DatasetLoader::new(source).with_fetch_timeout(config.dataset.fetch_timeout());
    Ok(Catalog::new(Arc::new(db), Arc::new(loader)))
}

pub async fn run(catalog: &Catalog, config: &Config, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Scores { target } => scores::run(catalog, target).await,
        Commands::Search { target } => search::run(catalog, config, target).await,
        Commands::Weights { action } => weights::run(catalog, action).await,
        Commands::Compare { action } => compare::run(catalog, action).await,
        Commands::Favorites { action } => state::favorites(catalog, action).await,
        Commands::Export { output } => state::export(catalog, output).await,
        Commands::Import { file } => state::import(catalog, &file).await,
        Commands::Stats => print_json(&catalog.statistics().await?),
        Commands::Usage => print_json(&catalog.usage().await?),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
