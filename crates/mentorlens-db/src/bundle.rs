//! Export, import and wipe of the whole persisted state.

use std::sync::Arc;

use tracing::{info, warn};

use crate::database::{Database, StorageUsage};
use crate::error::{DbError, Result};
use crate::schema::{
    StateBundle, ALL_KEYS, KEY_COMPARISONS, KEY_FAVORITES, KEY_HISTORY,
    KEY_IMPORTED_DATA, KEY_SETTINGS,
};

/// Top-level keys an import document must carry.
pub const REQUIRED_IMPORT_KEYS: [&str; 4] = ["comparisons", "settings", "favorites", "history"];

#[derive(Clone)]
pub struct BundleRepository {
    db: Arc<Database>,
}

impl BundleRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Gather every user-facing collection into one bundle.
    pub async fn snapshot(&self) -> Result<StateBundle> {
        let imported: Vec<mentorlens_common::Dataset> =
            self.db.read_or_default(KEY_IMPORTED_DATA).await?;
        Ok(StateBundle {
            comparisons: self.db.read_or_default(KEY_COMPARISONS).await?,
            settings: self.db.read_or_default(KEY_SETTINGS).await?,
            favorites: self.db.read_or_default(KEY_FAVORITES).await?,
            history: self.db.read_or_default(KEY_HISTORY).await?,
            imported_data: (!imported.is_empty()).then_some(imported),
        })
    }

    /// Pretty-printed JSON of [`BundleRepository::snapshot`].
    pub async fn export(&self) -> Result<String> {
        let bundle = self.snapshot().await?;
        Ok(serde_json::to_string_pretty(&bundle)?)
    }

    /// Overwrite stored state with the document in `json`.
    ///
    /// Nothing is written unless the whole document parses. Weight vectors
    /// that do not sum to 1 are normalised.
    pub async fn import(&self, json: &str) -> Result<StateBundle> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| DbError::InvalidImport(format!("not valid JSON: {e}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| DbError::InvalidImport("expected a JSON object".into()))?;
        let missing: Vec<&str> = REQUIRED_IMPORT_KEYS
            .iter()
            .copied()
            .filter(|key| !object.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(DbError::InvalidImport(format!("missing keys: {}", missing.join(", "))));
        }

        let mut bundle: StateBundle = serde_json::from_value(value)
            .map_err(|e| DbError::InvalidImport(e.to_string()))?;
        let weights = bundle.settings.scoring_weights.accept()?;
        if weights != bundle.settings.scoring_weights {
            warn!("Imported scoring weights did not sum to 1, normalised");
            bundle.settings.scoring_weights = weights;
        }

        let mut writes = vec![
            (KEY_COMPARISONS, serde_json::to_string(&bundle.comparisons)?),
            (KEY_SETTINGS, serde_json::to_string(&bundle.settings)?),
            (KEY_FAVORITES, serde_json::to_string(&bundle.favorites)?),
            (KEY_HISTORY, serde_json::to_string(&bundle.history)?),
        ];
        if let Some(imported) = &bundle.imported_data {
            writes.push((KEY_IMPORTED_DATA, serde_json::to_string(imported)?));
        }
        self.db.write_many(&writes).await?;

        info!(
            comparisons = bundle.comparisons.len(),
            favorites = bundle.favorites.len(),
            history = bundle.history.len(),
            "State imported"
        );
        Ok(bundle)
    }

    /// Remove every key in the namespace, score caches included.
    pub async fn clear_all(&self) -> Result<()> {
        for key in ALL_KEYS {
            self.db.remove(key).await?;
        }
        info!("All stored state cleared");
        Ok(())
    }

    pub async fn usage(&self) -> Result<StorageUsage> {
        self.db.usage().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesRepository;
    use crate::schema::{Comparison, ComparisonItem, KEY_PROJECT_SCORES};
    use mentorlens_ranker::{score_project, ProjectWeights};
    use mentorlens_test_utils::fixtures;
    use pretty_assertions::assert_eq;

    async fn seeded() -> (Arc<Database>, BundleRepository) {
        let db = Arc::new(Database::in_memory());
        let project = fixtures::project("p1");
        let score = score_project(&project, &ProjectWeights::default()).unwrap();
        let comparison =
            Comparison::new("Shortlist", vec![ComparisonItem::project(project, score)]).unwrap();
        db.write(KEY_COMPARISONS, &vec![comparison]).await.unwrap();
        FavoritesRepository::new(db.clone()).add("p1").await.unwrap();
        (db.clone(), BundleRepository::new(db))
    }

    #[tokio::test]
    async fn test_export_then_import_restores_state() {
        let (_db, bundle) = seeded().await;
        let exported = bundle.export().await.unwrap();
        let before = bundle.snapshot().await.unwrap();

        bundle.clear_all().await.unwrap();
        assert!(bundle.snapshot().await.unwrap().comparisons.is_empty());

        bundle.import(&exported).await.unwrap();
        assert_eq!(bundle.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_import_requires_all_keys() {
        let (_db, bundle) = seeded().await;
        let result = bundle.import(r#"{"comparisons": [], "settings": {}}"#).await;
        match result {
            Err(DbError::InvalidImport(msg)) => {
                assert!(msg.contains("favorites"));
                assert!(msg.contains("history"));
            }
            other => panic!("expected InvalidImport, got {other:?}"),
        }
        assert_eq!(bundle.snapshot().await.unwrap().favorites, vec!["p1".to_string()]);
    }

    #[tokio::test]
    async fn test_import_rejects_garbage() {
        let (_db, bundle) = seeded().await;
        assert!(matches!(bundle.import("not json").await, Err(DbError::InvalidImport(_))));
        assert!(matches!(bundle.import("[1, 2]").await, Err(DbError::InvalidImport(_))));
    }

    #[tokio::test]
    async fn test_import_overwrites_and_normalises() {
        let (_db, bundle) = seeded().await;
        let doc = serde_json::json!({
            "comparisons": [],
            "settings": {
                "scoringWeights": {
                    "project": {"technical": 1.0, "innovation": 1.0, "feasibility": 1.0, "impact": 1.0, "learning": 1.0},
                    "mentor": {"expertise": 0.3, "teaching": 0.25, "support": 0.2, "communication": 0.15, "availability": 0.1}
                }
            },
            "favorites": ["m3"],
            "history": []
        });
        let imported = bundle.import(&doc.to_string()).await.unwrap();
        assert!(imported.settings.scoring_weights.validate());

        let state = bundle.snapshot().await.unwrap();
        assert!(state.comparisons.is_empty());
        assert_eq!(state.favorites, vec!["m3".to_string()]);
        assert!((state.settings.scoring_weights.project.impact - 0.2).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_clear_all_drops_score_caches() {
        let (db, bundle) = seeded().await;
        db.write(KEY_PROJECT_SCORES, &Vec::<u8>::new()).await.unwrap();
        bundle.clear_all().await.unwrap();
        assert!(db.get_raw(KEY_PROJECT_SCORES).await.unwrap().is_none());
        assert_eq!(bundle.usage().await.unwrap().used, 0);
    }
}
