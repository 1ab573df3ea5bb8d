use std::path::{Path, PathBuf};

use anyhow::Context;
use mentorlens_catalog::Catalog;
use tracing::info;

use super::print_json;
use crate::cli::FavoritesAction;

pub async fn favorites(catalog: &Catalog, action: FavoritesAction) -> anyhow::Result<()> {
    let favorites = catalog.favorites();
    match action {
        FavoritesAction::List => {}
        FavoritesAction::Add { id } => {
            favorites.add(&id).await?;
        }
        FavoritesAction::Remove { id } => {
            favorites.remove(&id).await?;
        }
    }
    print_json(&favorites.list().await?)
}

pub async fn export(catalog: &Catalog, output: Option<PathBuf>) -> anyhow::Result<()> {
    let json = catalog.export().await?;
    match output {
        Some(path) => {
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "State exported");
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn import(catalog: &Catalog, file: &Path) -> anyhow::Result<()> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let bundle = catalog.import(&json).await?;
    print_json(&serde_json::json!({
        "comparisons": bundle.comparisons.len(),
        "favorites": bundle.favorites.len(),
        "history": bundle.history.len(),
        "importedData": bundle.imported_data.as_ref().map_or(0, Vec::len),
    }))
}
