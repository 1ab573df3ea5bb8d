//! Snapshots of datasets imported by the user.

use std::sync::Arc;

use mentorlens_common::Dataset;
use tracing::info;

use crate::database::Database;
use crate::error::Result;
use crate::schema::KEY_IMPORTED_DATA;

#[derive(Clone)]
pub struct ImportedDataRepository {
    db: Arc<Database>,
}

impl ImportedDataRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Dataset>> {
        self.db.read_or_default(KEY_IMPORTED_DATA).await
    }

    pub async fn add(&self, dataset: &Dataset) -> Result<()> {
        self.db
            .update(KEY_IMPORTED_DATA, |snapshots: &mut Vec<Dataset>| {
                snapshots.push(dataset.clone());
                Ok(())
            })
            .await?;
        info!(
            version = %dataset.version,
            projects = dataset.projects.len(),
            mentors = dataset.mentors.len(),
            "Dataset snapshot stored"
        );
        Ok(())
    }
}
