//! Comparison sets.
//!
//! A [`Selection`] is the unsaved working set a user assembles; saving it
//! through [`ComparisonManager::create`] freezes every item's entity and
//! score as they were at the time they were selected.

use mentorlens_common::{Mentor, Project};
use mentorlens_db::{
    item_id, Comparison, ComparisonItem, ComparisonRepository, ComparisonUpdate, ItemKind,
};
use mentorlens_ranker::{MentorScore, ProjectScore};
use tracing::info;

use crate::error::{CatalogError, Result};

/// Pre-save working set, de-duplicated by item id.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    items: Vec<ComparisonItem>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, item: ComparisonItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Returns `false` if the project is already selected.
    pub fn add_project(&mut self, project: Project, score: ProjectScore) -> bool {
        self.push(ComparisonItem::project(project, score))
    }

    /// Returns `false` if the mentor is already selected.
    pub fn add_mentor(&mut self, mentor: Mentor, score: MentorScore) -> bool {
        self.push(ComparisonItem::mentor(mentor, score))
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i.id == item_id)
    }

    pub fn contains_entity(&self, kind: ItemKind, entity_id: &str) -> bool {
        self.contains(&item_id(kind, entity_id))
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ComparisonItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// CRUD over saved comparisons.
#[derive(Clone)]
pub struct ComparisonManager {
    repo: ComparisonRepository,
}

impl ComparisonManager {
    pub fn new(repo: ComparisonRepository) -> Self {
        Self { repo }
    }

    /// Save `selection` under `name`. The selection itself is left untouched.
    pub async fn create(&self, name: &str, selection: &Selection) -> Result<Comparison> {
        let comparison = Comparison::new(name, selection.items().to_vec())?;
        self.repo.insert(&comparison).await?;
        info!(id = %comparison.id, name = %comparison.name, items = comparison.items.len(), "Comparison created");
        Ok(comparison)
    }

    pub async fn list(&self) -> Result<Vec<Comparison>> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Comparison> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("comparison {id}")))
    }

    pub async fn update(&self, id: &str, changes: ComparisonUpdate) -> Result<Comparison> {
        Ok(self.repo.update(id, changes).await?)
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<Comparison> {
        self.update(id, ComparisonUpdate { name: Some(name.to_string()), items: None }).await
    }

    /// Idempotent; returns whether a comparison was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.repo.delete(id).await?;
        if removed {
            info!(id = %id, "Comparison deleted");
        }
        Ok(removed)
    }
}
