//! Comparison repository.
//!
//! Provides CRUD operations for saved comparisons. The whole list lives
//! under one key; every mutation is a locked read-modify-write.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::database::Database;
use crate::error::{DbError, Result};
use crate::schema::{Comparison, ComparisonUpdate, KEY_COMPARISONS};

/// Repository for comparison operations.
#[derive(Clone)]
pub struct ComparisonRepository {
    db: Arc<Database>,
}

impl ComparisonRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All saved comparisons in insertion order. A corrupt list reads as empty.
    pub async fn list(&self) -> Result<Vec<Comparison>> {
        self.db.read_or_default(KEY_COMPARISONS).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Comparison>> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }

    /// Append a comparison after validating it.
    pub async fn insert(&self, comparison: &Comparison) -> Result<()> {
        comparison.validate()?;
        self.db
            .update(KEY_COMPARISONS, |list: &mut Vec<Comparison>| {
                if list.iter().any(|c| c.id == comparison.id) {
                    return Err(DbError::Duplicate(comparison.id.clone()));
                }
                list.push(comparison.clone());
                Ok(())
            })
            .await?;
        debug!(id = %comparison.id, items = comparison.items.len(), "Comparison saved");
        Ok(())
    }

    /// Merge `changes` into the comparison with `id` and bump `updated_at`.
    ///
    /// Returns [`DbError::NotFound`] if no comparison has that id.
    pub async fn update(&self, id: &str, changes: ComparisonUpdate) -> Result<Comparison> {
        self.db
            .update(KEY_COMPARISONS, |list: &mut Vec<Comparison>| {
                let existing = list
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| DbError::NotFound(format!("comparison {id}")))?;

                let mut merged = existing.clone();
                if let Some(name) = changes.name {
                    merged.name = name.trim().to_string();
                }
                if let Some(items) = changes.items {
                    merged.items = items;
                }
                merged.updated_at = Utc::now();
                merged.validate()?;

                *existing = merged.clone();
                Ok(merged)
            })
            .await
    }

    /// Remove by id. Returns whether anything was removed; absent ids are a no-op.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.db
            .update(KEY_COMPARISONS, |list: &mut Vec<Comparison>| {
                let before = list.len();
                list.retain(|c| c.id != id);
                Ok(list.len() != before)
            })
            .await
    }
}
