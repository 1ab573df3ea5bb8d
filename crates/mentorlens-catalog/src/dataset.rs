//! Dataset loading.
//!
//! The dataset is a single JSON document fetched once per session and shared
//! read-only afterwards. Concurrent first callers wait on the same fetch.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mentorlens_common::Dataset;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the dataset document comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
    /// Already parsed; used by tests and embedders.
    Inline(Arc<Dataset>),
}

impl DatasetSource {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
            Self::Inline(_) => "<inline>".to_string(),
        }
    }
}

/// Memoising dataset loader. Failures are not memoised.
pub struct DatasetLoader {
    source: DatasetSource,
    fetch_timeout: Duration,
    cached: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetLoader {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cached: Mutex::new(None),
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    /// The session's dataset, fetching it on first use.
    pub async fn load(&self) -> Result<Arc<Dataset>> {
        let mut cached = self.cached.lock().await;
        if let Some(dataset) = cached.as_ref() {
            return Ok(dataset.clone());
        }

        let dataset = tokio::time::timeout(self.fetch_timeout, self.fetch())
            .await
            .map_err(|_| CatalogError::Timeout { millis: self.fetch_timeout.as_millis() })??;

        info!(
            source = %self.source.describe(),
            version = %dataset.version,
            mentors = dataset.mentors.len(),
            projects = dataset.projects.len(),
            "Dataset loaded"
        );
        *cached = Some(dataset.clone());
        Ok(dataset)
    }

    /// Forget the memoised dataset; the next `load` fetches again.
    pub async fn clear(&self) {
        self.cached.lock().await.take();
        debug!("Dataset cache cleared");
    }

    async fn fetch(&self) -> Result<Arc<Dataset>> {
        let raw = match &self.source {
            DatasetSource::Inline(dataset) => return Ok(dataset.clone()),
            DatasetSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CatalogError::DatasetIo {
                    path: path.display().to_string(),
                    source,
                })?,
            DatasetSource::Url(url) => {
                let client = reqwest::Client::builder()
                    .user_agent(concat!("mentorlens/", env!("CARGO_PKG_VERSION")))
                    .build()?;
                let resp = client.get(url).send().await?;
                if !resp.status().is_success() {
                    return Err(CatalogError::HttpStatus {
                        url: url.clone(),
                        status: resp.status().as_u16(),
                    });
                }
                resp.text().await?
            }
        };
        Ok(Arc::new(parse_dataset(&raw)?))
    }
}

/// Parse a dataset document and validate every entity in it.
pub fn parse_dataset(raw: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(raw)?;
    for project in &dataset.projects {
        project.validate()?;
    }
    for mentor in &dataset.mentors {
        mentor.validate()?;
    }
    Ok(dataset)
}
