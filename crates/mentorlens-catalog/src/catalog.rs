//! Catalog facade.
//!
//! Wires the dataset loader, score cache and repositories together over one
//! [`Database`] handle.

use std::collections::HashMap;
use std::sync::Arc;

use mentorlens_common::Dataset;
use mentorlens_db::{
    BundleRepository, ComparisonRepository, Database, FavoritesRepository, HistoryRepository,
    ImportedDataRepository, ItemKind, ScoreRepository, SettingsRepository, StateBundle,
    UserSettings,
};
use mentorlens_ranker::{MentorScore, ProjectScore, ScoringWeights};
use tracing::{info, warn};

use crate::cache::{ScoreCache, ScoreSet};
use crate::comparison::{ComparisonManager, Selection};
use crate::dataset::DatasetLoader;
use crate::error::{CatalogError, Result};
use crate::search::{
    search_mentors, search_projects, MentorEntry, MentorQuery, Page, Pagination, ProjectEntry,
    ProjectQuery, Scored,
};
use crate::statistics::{self, CatalogStatistics};

pub struct Catalog {
    loader: Arc<DatasetLoader>,
    cache: Arc<ScoreCache>,
    comparisons: ComparisonManager,
    settings: SettingsRepository,
    favorites: FavoritesRepository,
    history: HistoryRepository,
    imported: ImportedDataRepository,
    bundle: BundleRepository,
}

fn join_projects(dataset: &Dataset, scores: &[ProjectScore]) -> Option<Vec<ProjectEntry>> {
    let by_id: HashMap<&str, &ProjectScore> =
        scores.iter().map(|s| (s.project_id.as_str(), s)).collect();
    dataset
        .projects
        .iter()
        .map(|p| {
            by_id.get(p.id.as_str()).map(|s| Scored { entity: p.clone(), score: (*s).clone() })
        })
        .collect()
}

fn join_mentors(dataset: &Dataset, scores: &[MentorScore]) -> Option<Vec<MentorEntry>> {
    let by_id: HashMap<&str, &MentorScore> =
        scores.iter().map(|s| (s.mentor_id.as_str(), s)).collect();
    dataset
        .mentors
        .iter()
        .map(|m| {
            by_id.get(m.id.as_str()).map(|s| Scored { entity: m.clone(), score: (*s).clone() })
        })
        .collect()
}

impl Catalog {
    pub fn new(db: Arc<Database>, loader: Arc<DatasetLoader>) -> Self {
        let settings = SettingsRepository::new(db.clone());
        let cache = Arc::new(ScoreCache::new(
            loader.clone(),
            settings.clone(),
            ScoreRepository::new(db.clone()),
        ));
        Self {
            loader,
            cache,
            comparisons: ComparisonManager::new(ComparisonRepository::new(db.clone())),
            settings,
            favorites: FavoritesRepository::new(db.clone()),
            history: HistoryRepository::new(db.clone()),
            imported: ImportedDataRepository::new(db.clone()),
            bundle: BundleRepository::new(db),
        }
    }

    pub async fn dataset(&self) -> Result<Arc<Dataset>> {
        self.loader.load().await
    }

    pub fn scores(&self) -> &ScoreCache {
        &self.cache
    }

    pub fn comparisons(&self) -> &ComparisonManager {
        &self.comparisons
    }

    /// Stored settings. Writes go through [`Catalog::save_settings`] or
    /// [`Catalog::set_weights`] so cached scores follow the weights.
    pub async fn settings(&self) -> Result<UserSettings> {
        Ok(self.settings.get().await?)
    }

    pub async fn save_settings(&self, settings: &UserSettings) -> Result<ScoreSet> {
        self.cache.save_settings(settings).await
    }

    pub fn favorites(&self) -> &FavoritesRepository {
        &self.favorites
    }

    pub fn history(&self) -> &HistoryRepository {
        &self.history
    }

    pub fn imported(&self) -> &ImportedDataRepository {
        &self.imported
    }

    /// Every project paired with its score. A project missing from the cache
    /// triggers a full recalculation.
    pub async fn projects_with_scores(&self) -> Result<Vec<ProjectEntry>> {
        let dataset = self.dataset().await?;
        let scores = self.cache.get_project_scores().await?;
        if let Some(entries) = join_projects(&dataset, &scores) {
            return Ok(entries);
        }
        warn!("Project score cache is missing entries, recalculating");
        let fresh = self.cache.recalculate_scores().await?;
        join_projects(&dataset, &fresh.projects)
            .ok_or_else(|| CatalogError::NotFound("score for project".into()))
    }

    pub async fn mentors_with_scores(&self) -> Result<Vec<MentorEntry>> {
        let dataset = self.dataset().await?;
        let scores = self.cache.get_mentor_scores().await?;
        if let Some(entries) = join_mentors(&dataset, &scores) {
            return Ok(entries);
        }
        warn!("Mentor score cache is missing entries, recalculating");
        let fresh = self.cache.recalculate_scores().await?;
        join_mentors(&dataset, &fresh.mentors)
            .ok_or_else(|| CatalogError::NotFound("score for mentor".into()))
    }

    pub async fn project(&self, id: &str) -> Result<ProjectEntry> {
        self.projects_with_scores()
            .await?
            .into_iter()
            .find(|e| e.entity.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("project {id}")))
    }

    pub async fn mentor(&self, id: &str) -> Result<MentorEntry> {
        self.mentors_with_scores()
            .await?
            .into_iter()
            .find(|e| e.entity.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("mentor {id}")))
    }

    /// Look up an entity for display and record the visit in history.
    pub async fn view_project(&self, id: &str) -> Result<ProjectEntry> {
        let entry = self.project(id).await?;
        self.history.record(id).await?;
        Ok(entry)
    }

    pub async fn view_mentor(&self, id: &str) -> Result<MentorEntry> {
        let entry = self.mentor(id).await?;
        self.history.record(id).await?;
        Ok(entry)
    }

    pub async fn search_projects(
        &self,
        query: &ProjectQuery,
        pagination: Pagination,
    ) -> Result<Page<ProjectEntry>> {
        Ok(search_projects(self.projects_with_scores().await?, query, pagination))
    }

    pub async fn search_mentors(
        &self,
        query: &MentorQuery,
        pagination: Pagination,
    ) -> Result<Page<MentorEntry>> {
        Ok(search_mentors(self.mentors_with_scores().await?, query, pagination))
    }

    /// Add the entity with its current score to `selection`.
    /// Returns `false` if it was already selected.
    pub async fn select(&self, selection: &mut Selection, kind: ItemKind, id: &str) -> Result<bool> {
        match kind {
            ItemKind::Project => {
                let entry = self.project(id).await?;
                Ok(selection.add_project(entry.entity, entry.score))
            }
            ItemKind::Mentor => {
                let entry = self.mentor(id).await?;
                Ok(selection.add_mentor(entry.entity, entry.score))
            }
        }
    }

    pub async fn statistics(&self) -> Result<CatalogStatistics> {
        let dataset = self.dataset().await?;
        Ok(statistics::compute(&dataset))
    }

    pub async fn weights(&self) -> Result<ScoringWeights> {
        self.cache.weights().await
    }

    pub async fn set_weights(&self, weights: &ScoringWeights) -> Result<ScoreSet> {
        self.cache.set_weights(weights).await
    }

    /// Store the current dataset as an imported snapshot.
    pub async fn snapshot_dataset(&self) -> Result<()> {
        let dataset = self.dataset().await?;
        self.imported.add(&dataset).await?;
        Ok(())
    }

    pub async fn export(&self) -> Result<String> {
        Ok(self.bundle.export().await?)
    }

    /// Overwrite stored state from an export document. In-memory scores are
    /// dropped since the imported weights may differ.
    pub async fn import(&self, json: &str) -> Result<StateBundle> {
        let bundle = self.bundle.import(json).await?;
        self.cache.invalidate().await;
        Ok(bundle)
    }

    pub async fn clear_all(&self) -> Result<()> {
        self.bundle.clear_all().await?;
        self.cache.invalidate().await;
        info!("Catalog state reset");
        Ok(())
    }

    pub async fn usage(&self) -> Result<mentorlens_db::StorageUsage> {
        Ok(self.bundle.usage().await?)
    }
}
