//! Score cache.
//!
//! Holds the computed score list for each entity type. Lookups go to memory
//! first, then to the persisted lists, and compute as a last resort. The
//! whole check-compute-store sequence runs under one async mutex, so
//! concurrent callers never start a second computation and a weight change
//! is never observed half-applied.

use std::collections::HashSet;
use std::sync::Arc;

use mentorlens_common::Dataset;
use mentorlens_db::{DbError, ScoreRepository, SettingsRepository, UserSettings};
use mentorlens_ranker::{
    score_mentors, score_projects, MentorScore, MentorWeights, ProjectScore, ProjectWeights,
    ScoringWeights,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::dataset::DatasetLoader;
use crate::error::Result;

/// Both score lists, computed under the same weights.
#[derive(Debug, Clone)]
pub struct ScoreSet {
    pub projects: Arc<Vec<ProjectScore>>,
    pub mentors: Arc<Vec<MentorScore>>,
}

#[derive(Default)]
struct CacheState {
    projects: Option<Arc<Vec<ProjectScore>>>,
    mentors: Option<Arc<Vec<MentorScore>>>,
}

pub struct ScoreCache {
    loader: Arc<DatasetLoader>,
    settings: SettingsRepository,
    store: ScoreRepository,
    state: Mutex<CacheState>,
}

fn covers<'a>(ids: impl Iterator<Item = &'a str>, scored: impl Iterator<Item = &'a str>) -> bool {
    let scored: HashSet<&str> = scored.collect();
    ids.into_iter().all(|id| scored.contains(id))
}

fn projects_fresh(scores: &[ProjectScore], dataset: &Dataset, weights: &ProjectWeights) -> bool {
    scores.len() == dataset.projects.len()
        && scores.iter().all(|s| s.weights == *weights)
        && covers(
            dataset.projects.iter().map(|p| p.id.as_str()),
            scores.iter().map(|s| s.project_id.as_str()),
        )
}

fn mentors_fresh(scores: &[MentorScore], dataset: &Dataset, weights: &MentorWeights) -> bool {
    scores.len() == dataset.mentors.len()
        && scores.iter().all(|s| s.weights == *weights)
        && covers(
            dataset.mentors.iter().map(|m| m.id.as_str()),
            scores.iter().map(|s| s.mentor_id.as_str()),
        )
}

impl ScoreCache {
    pub fn new(
        loader: Arc<DatasetLoader>,
        settings: SettingsRepository,
        store: ScoreRepository,
    ) -> Self {
        Self {
            loader,
            settings,
            store,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Weights currently in force.
    pub async fn weights(&self) -> Result<ScoringWeights> {
        Ok(self.settings.get().await?.scoring_weights.accept()?)
    }

    pub async fn get_project_scores(&self) -> Result<Arc<Vec<ProjectScore>>> {
        let mut state = self.state.lock().await;
        if let Some(scores) = &state.projects {
            debug!("Project scores served from memory");
            return Ok(scores.clone());
        }

        let weights = self.weights().await?;
        let dataset = self.loader.load().await?;

        if let Some(stored) = self.store.load_project_scores().await? {
            if projects_fresh(&stored, &dataset, &weights.project) {
                debug!(count = stored.len(), "Project scores restored from storage");
                let stored = Arc::new(stored);
                state.projects = Some(stored.clone());
                return Ok(stored);
            }
            debug!("Stored project scores are stale");
        }

        let computed = Arc::new(score_projects(&dataset.projects, &weights.project)?);
        info!(count = computed.len(), "Project scores computed");
        if let Err(e) = self.store.save_project_scores(&computed).await {
            warn!(error = %e, "Failed to persist project scores");
        }
        state.projects = Some(computed.clone());
        Ok(computed)
    }

    pub async fn get_mentor_scores(&self) -> Result<Arc<Vec<MentorScore>>> {
        let mut state = self.state.lock().await;
        if let Some(scores) = &state.mentors {
            debug!("Mentor scores served from memory");
            return Ok(scores.clone());
        }

        let weights = self.weights().await?;
        let dataset = self.loader.load().await?;

        if let Some(stored) = self.store.load_mentor_scores().await? {
            if mentors_fresh(&stored, &dataset, &weights.mentor) {
                debug!(count = stored.len(), "Mentor scores restored from storage");
                let stored = Arc::new(stored);
                state.mentors = Some(stored.clone());
                return Ok(stored);
            }
            debug!("Stored mentor scores are stale");
        }

        let computed = Arc::new(score_mentors(&dataset.mentors, &weights.mentor)?);
        info!(count = computed.len(), "Mentor scores computed");
        if let Err(e) = self.store.save_mentor_scores(&computed).await {
            warn!(error = %e, "Failed to persist mentor scores");
        }
        state.mentors = Some(computed.clone());
        Ok(computed)
    }

    async fn recompute(&self, state: &mut CacheState, weights: &ScoringWeights) -> Result<ScoreSet> {
        let dataset = self.loader.load().await?;
        let projects = Arc::new(score_projects(&dataset.projects, &weights.project)?);
        let mentors = Arc::new(score_mentors(&dataset.mentors, &weights.mentor)?);

        self.store.save_project_scores(&projects).await?;
        self.store.save_mentor_scores(&mentors).await?;

        state.projects = Some(projects.clone());
        state.mentors = Some(mentors.clone());
        info!(projects = projects.len(), mentors = mentors.len(), "Scores recalculated");
        Ok(ScoreSet { projects, mentors })
    }

    /// Recompute both lists under the current weights and overwrite every cache layer.
    pub async fn recalculate_scores(&self) -> Result<ScoreSet> {
        let mut state = self.state.lock().await;
        let weights = self.weights().await?;
        self.recompute(&mut state, &weights).await
    }

    /// Persist new weights and recompute in one step.
    ///
    /// Invalid vectors are normalised; vectors that cannot be normalised are
    /// rejected and nothing changes.
    pub async fn set_weights(&self, weights: &ScoringWeights) -> Result<ScoreSet> {
        let mut state = self.state.lock().await;
        let mut settings = self.settings.get().await?;
        settings.scoring_weights = *weights;
        self.commit(&mut state, settings).await
    }

    /// Persist a full settings value, recomputing scores under its weights.
    pub async fn save_settings(&self, settings: &UserSettings) -> Result<ScoreSet> {
        let mut state = self.state.lock().await;
        self.commit(&mut state, settings.clone()).await
    }

    /// Score both lists under the new weights, then write scores and
    /// settings. On a failed write the previous settings are restored and
    /// the in-memory lists are dropped, so no reader sees scores that
    /// disagree with the stored weights.
    async fn commit(&self, state: &mut CacheState, mut settings: UserSettings) -> Result<ScoreSet> {
        settings.scoring_weights = settings.scoring_weights.accept()?;
        let previous = self.settings.get().await?;
        let dataset = self.loader.load().await?;
        let weights = settings.scoring_weights;
        let projects = Arc::new(score_projects(&dataset.projects, &weights.project)?);
        let mentors = Arc::new(score_mentors(&dataset.mentors, &weights.mentor)?);

        let written: std::result::Result<UserSettings, DbError> = async {
            self.store.save_project_scores(&projects).await?;
            self.store.save_mentor_scores(&mentors).await?;
            self.settings.save(&settings).await
        }
        .await;

        if let Err(e) = written {
            *state = CacheState::default();
            if let Err(restore) = self.settings.save(&previous).await {
                warn!(error = %restore, "Failed to restore previous settings");
            }
            warn!(error = %e, "Weight change rolled back");
            return Err(e.into());
        }

        state.projects = Some(projects.clone());
        state.mentors = Some(mentors.clone());
        info!(
            projects = projects.len(),
            mentors = mentors.len(),
            "Weights changed, scores recalculated"
        );
        Ok(ScoreSet { projects, mentors })
    }

    /// Drop the in-memory lists. Persisted lists are kept.
    pub async fn invalidate(&self) {
        *self.state.lock().await = CacheState::default();
        debug!("Score cache invalidated");
    }

    /// Drop both the in-memory and the persisted lists.
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        *state = CacheState::default();
        self.store.clear().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetSource;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use mentorlens_db::schema::{KEY_MENTOR_SCORES, KEY_PROJECT_SCORES};
    use mentorlens_db::{Database, KvStore, MemoryStore, Theme};
    use mentorlens_ranker::WeightVector;
    use mentorlens_test_utils::fixtures;

    fn cache_on(db: Arc<Database>) -> ScoreCache {
        let loader = Arc::new(DatasetLoader::new(DatasetSource::Inline(Arc::new(
            fixtures::sample_dataset(),
        ))));
        ScoreCache::new(loader, SettingsRepository::new(db.clone()), ScoreRepository::new(db))
    }

    #[tokio::test]
    async fn test_lazy_compute_persists() {
        let db = Arc::new(Database::in_memory());
        let cache = cache_on(db.clone());
        let scores = cache.get_project_scores().await.unwrap();
        assert_eq!(scores.len(), 5);

        let stored = ScoreRepository::new(db).load_project_scores().await.unwrap().unwrap();
        assert_eq!(stored, *scores);
    }

    #[tokio::test]
    async fn test_second_read_hits_memory() {
        let cache = cache_on(Arc::new(Database::in_memory()));
        let a = cache.get_mentor_scores().await.unwrap();
        let b = cache.get_mentor_scores().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_concurrent_first_reads_share_one_computation() {
        let cache = Arc::new(cache_on(Arc::new(Database::in_memory())));
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_project_scores().await.unwrap() })
            })
            .collect();
        let mut results = Vec::new();
        for h in handles {
            results.push(h.await.unwrap());
        }
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[tokio::test]
    async fn test_persisted_scores_survive_restart() {
        let db = Arc::new(Database::in_memory());
        let first = cache_on(db.clone()).get_project_scores().await.unwrap();
        let second = cache_on(db).get_project_scores().await.unwrap();
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[tokio::test]
    async fn test_stale_persisted_scores_are_recomputed() {
        let db = Arc::new(Database::in_memory());
        cache_on(db.clone()).get_project_scores().await.unwrap();

        let mut weights = ScoringWeights::default();
        weights.project = ProjectWeights::from_array([0.2; 5]);
        let settings = SettingsRepository::new(db.clone());
        let mut stored = settings.get().await.unwrap();
        stored.scoring_weights = weights;
        settings.save(&stored).await.unwrap();

        let scores = cache_on(db).get_project_scores().await.unwrap();
        assert!(scores.iter().all(|s| s.weights == weights.project));
    }

    #[tokio::test]
    async fn test_set_weights_recomputes() {
        let cache = cache_on(Arc::new(Database::in_memory()));
        let before = cache.get_mentor_scores().await.unwrap();
        assert!(before.iter().all(|s| s.weights == MentorWeights::default()));

        let mut weights = ScoringWeights::default();
        weights.mentor = MentorWeights::from_array([0.0, 0.0, 0.0, 0.0, 1.0]);
        cache.set_weights(&weights).await.unwrap();

        let after = cache.get_mentor_scores().await.unwrap();
        assert!(after.iter().all(|s| s.weights == weights.mentor));
        // m2 is unavailable, so only the availability dimension counts.
        let m2 = after.iter().find(|s| s.mentor_id == "m2").unwrap();
        assert_eq!(m2.overall, 1.0);
    }

    #[tokio::test]
    async fn test_rejected_weights_change_nothing() {
        let cache = cache_on(Arc::new(Database::in_memory()));
        let before = cache.get_project_scores().await.unwrap();

        let mut weights = ScoringWeights::default();
        weights.project = ProjectWeights::from_array([0.0; 5]);
        assert!(cache.set_weights(&weights).await.is_err());

        let after = cache.get_project_scores().await.unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(cache.weights().await.unwrap(), ScoringWeights::default());
    }

    #[tokio::test]
    async fn test_clear_drops_persisted_lists() {
        let db = Arc::new(Database::in_memory());
        let cache = cache_on(db.clone());
        cache.get_project_scores().await.unwrap();
        cache.clear().await.unwrap();
        assert!(ScoreRepository::new(db).load_project_scores().await.unwrap().is_none());
    }

    /// Memory store whose score writes fail while `failing` is set.
    #[derive(Default)]
    struct FailingScoreStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    #[async_trait]
    impl KvStore for FailingScoreStore {
        async fn get(&self, key: &str) -> mentorlens_db::Result<Option<String>> {
            self.inner.get(key).await
        }
        async fn set(&self, key: &str, value: &str) -> mentorlens_db::Result<()> {
            let score_key = key == KEY_PROJECT_SCORES || key == KEY_MENTOR_SCORES;
            if score_key && self.failing.load(Ordering::SeqCst) {
                return Err(std::io::Error::other("disk full").into());
            }
            self.inner.set(key, value).await
        }
        async fn remove(&self, key: &str) -> mentorlens_db::Result<()> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_failed_weight_change_rolls_back() {
        let backend = Arc::new(FailingScoreStore::default());
        let cache = cache_on(Arc::new(Database::with_backend(backend.clone())));
        cache.get_project_scores().await.unwrap();

        backend.failing.store(true, Ordering::SeqCst);
        let mut weights = ScoringWeights::default();
        weights.project = ProjectWeights::from_array([0.2; 5]);
        assert!(cache.set_weights(&weights).await.is_err());

        let current = cache.weights().await.unwrap();
        assert_eq!(current, ScoringWeights::default());
        let scores = cache.get_project_scores().await.unwrap();
        assert!(scores.iter().all(|s| s.weights == current.project));
        let mentors = cache.get_mentor_scores().await.unwrap();
        assert!(mentors.iter().all(|s| s.weights == current.mentor));
    }

    #[tokio::test]
    async fn test_save_settings_recomputes_under_new_weights() {
        let db = Arc::new(Database::in_memory());
        let cache = cache_on(db.clone());
        cache.get_project_scores().await.unwrap();

        let mut settings = UserSettings::default();
        settings.display_preferences.theme = Theme::Dark;
        settings.scoring_weights.project = ProjectWeights::from_array([2.0; 5]);
        cache.save_settings(&settings).await.unwrap();

        let stored = SettingsRepository::new(db).get().await.unwrap();
        assert_eq!(stored.display_preferences.theme, Theme::Dark);
        assert!(stored.scoring_weights.validate());
        let scores = cache.get_project_scores().await.unwrap();
        assert!(scores.iter().all(|s| s.weights == stored.scoring_weights.project));
    }
}
