//! Configuration loading for MentorLens.
//! Reads mentorlens.toml from the current directory or the path in MENTORLENS_CONFIG.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use mentorlens_catalog::DatasetSource;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Local JSON file. Ignored when `url` is set.
    #[serde(default = "default_dataset_path")]
    pub path: String,
    pub url: Option<String>,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_dataset_path()       -> String { "data/dataset.json".to_string() }
fn default_fetch_timeout_secs() -> u64 { 30 }

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            url: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl DatasetConfig {
    pub fn source(&self) -> DatasetSource {
        match &self.url {
            Some(url) => DatasetSource::Url(url.clone()),
            None => DatasetSource::File(self.path.clone().into()),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
    #[serde(default = "default_io_timeout_ms")]
    pub io_timeout_ms: u64,
}

fn default_storage_path()  -> String { ".mentorlens".to_string() }
fn default_io_timeout_ms() -> u64 { 5_000 }

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: default_storage_path(), io_timeout_ms: default_io_timeout_ms() }
    }
}

impl StorageConfig {
    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}

fn default_items_per_page() -> usize { 12 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { items_per_page: default_items_per_page() }
    }
}

impl Config {
    /// Load configuration from mentorlens.toml.
    /// Checks MENTORLENS_CONFIG env var first, then current directory.
    /// A missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("MENTORLENS_CONFIG")
            .unwrap_or_else(|_| "mentorlens.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Config file not found: {}, using defaults. \
                 Copy mentorlens.example.toml to mentorlens.toml to customise.",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

mod tests;
