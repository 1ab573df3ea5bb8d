//! User settings repository.

use std::sync::Arc;

use tracing::info;

use crate::database::Database;
use crate::error::Result;
use crate::schema::{UserSettings, KEY_SETTINGS};

#[derive(Clone)]
pub struct SettingsRepository {
    db: Arc<Database>,
}

impl SettingsRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Stored settings, or defaults when absent or corrupt.
    pub async fn get(&self) -> Result<UserSettings> {
        self.db.read_or_default(KEY_SETTINGS).await
    }

    /// Persist `settings`. Weight vectors that do not sum to 1 are normalised
    /// first; vectors that cannot be normalised are rejected.
    pub async fn save(&self, settings: &UserSettings) -> Result<UserSettings> {
        let mut accepted = settings.clone();
        accepted.scoring_weights = settings.scoring_weights.accept()?;
        if accepted.scoring_weights != settings.scoring_weights {
            info!("Scoring weights normalised before saving");
        }
        self.db.write(KEY_SETTINGS, &accepted).await?;
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::schema::Theme;
    use mentorlens_ranker::{ProjectWeights, WeightVector};

    fn repo() -> SettingsRepository {
        SettingsRepository::new(Arc::new(Database::in_memory()))
    }

    #[tokio::test]
    async fn test_defaults_when_absent() {
        let settings = repo().get().await.unwrap();
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.display_preferences.default_sort, "rating-desc");
    }

    #[tokio::test]
    async fn test_save_normalises_weights() {
        let repo = repo();
        let mut settings = UserSettings::default();
        settings.display_preferences.theme = Theme::Dark;
        settings.scoring_weights.project = ProjectWeights {
            technical: 2.0,
            innovation: 2.0,
            feasibility: 2.0,
            impact: 2.0,
            learning: 2.0,
        };

        let saved = repo.save(&settings).await.unwrap();
        assert!(saved.scoring_weights.validate());
        assert!((saved.scoring_weights.project.technical - 0.2).abs() < 1e-12);

        let stored = repo.get().await.unwrap();
        assert_eq!(stored, saved);
        assert_eq!(stored.display_preferences.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_save_rejects_degenerate_weights() {
        let repo = repo();
        let mut settings = UserSettings::default();
        settings.scoring_weights.project = ProjectWeights::from_array([0.0; 5]);
        assert!(matches!(repo.save(&settings).await, Err(DbError::Weights(_))));
        assert_eq!(repo.get().await.unwrap(), UserSettings::default());
    }
}
