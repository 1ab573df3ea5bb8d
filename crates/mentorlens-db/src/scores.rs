//! Persistent fallback for computed score lists.
//!
//! Scores are stored as whole lists, one key per entity type. A stored list
//! that fails to parse is treated as absent so the caller recomputes.

use std::sync::Arc;

use mentorlens_ranker::{MentorScore, ProjectScore};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::{KEY_MENTOR_SCORES, KEY_PROJECT_SCORES};

#[derive(Clone)]
pub struct ScoreRepository {
    db: Arc<Database>,
}

impl ScoreRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        match self.db.read(key).await {
            Err(DbError::Corrupt { key, source }) => {
                warn!(key = %key, error = %source, "Discarding corrupt score cache");
                Ok(None)
            }
            other => other,
        }
    }

    pub async fn load_project_scores(&self) -> Result<Option<Vec<ProjectScore>>> {
        self.load(KEY_PROJECT_SCORES).await
    }

    pub async fn load_mentor_scores(&self) -> Result<Option<Vec<MentorScore>>> {
        self.load(KEY_MENTOR_SCORES).await
    }

    pub async fn save_project_scores(&self, scores: &[ProjectScore]) -> Result<()> {
        self.db.write(KEY_PROJECT_SCORES, scores).await
    }

    pub async fn save_mentor_scores(&self, scores: &[MentorScore]) -> Result<()> {
        self.db.write(KEY_MENTOR_SCORES, scores).await
    }

    /// Drop both persisted lists.
    pub async fn clear(&self) -> Result<()> {
        self.db.remove(KEY_PROJECT_SCORES).await?;
        self.db.remove(KEY_MENTOR_SCORES).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorlens_ranker::{score_mentors, score_projects, MentorWeights, ProjectWeights};
    use mentorlens_test_utils::fixtures;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = ScoreRepository::new(Arc::new(Database::in_memory()));
        assert!(repo.load_project_scores().await.unwrap().is_none());

        let data = fixtures::sample_dataset();
        let projects = score_projects(&data.projects, &ProjectWeights::default()).unwrap();
        let mentors = score_mentors(&data.mentors, &MentorWeights::default()).unwrap();
        repo.save_project_scores(&projects).await.unwrap();
        repo.save_mentor_scores(&mentors).await.unwrap();

        assert_eq!(repo.load_project_scores().await.unwrap(), Some(projects));
        assert_eq!(repo.load_mentor_scores().await.unwrap(), Some(mentors));

        repo.clear().await.unwrap();
        assert!(repo.load_mentor_scores().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_cache_reads_as_absent() {
        let db = Arc::new(Database::in_memory());
        db.write(KEY_PROJECT_SCORES, &serde_json::json!({"not": "a list"})).await.unwrap();
        let repo = ScoreRepository::new(db);
        assert!(repo.load_project_scores().await.unwrap().is_none());
    }
}
