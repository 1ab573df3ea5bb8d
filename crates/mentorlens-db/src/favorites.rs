//! Favorite entity ids.

use std::sync::Arc;

use crate::database::Database;
use crate::error::Result;
use crate::schema::KEY_FAVORITES;

#[derive(Clone)]
pub struct FavoritesRepository {
    db: Arc<Database>,
}

impl FavoritesRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        self.db.read_or_default(KEY_FAVORITES).await
    }

    pub async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.list().await?.iter().any(|f| f == id))
    }

    /// Returns `false` if the id was already a favorite.
    pub async fn add(&self, id: &str) -> Result<bool> {
        self.db
            .update(KEY_FAVORITES, |favorites: &mut Vec<String>| {
                if favorites.iter().any(|f| f == id) {
                    return Ok(false);
                }
                favorites.push(id.to_string());
                Ok(true)
            })
            .await
    }

    /// Returns `false` if the id was not a favorite.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        self.db
            .update(KEY_FAVORITES, |favorites: &mut Vec<String>| {
                let before = favorites.len();
                favorites.retain(|f| f != id);
                Ok(favorites.len() != before)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_remove_are_idempotent() {
        let repo = FavoritesRepository::new(Arc::new(Database::in_memory()));
        assert!(repo.add("p1").await.unwrap());
        assert!(!repo.add("p1").await.unwrap());
        assert!(repo.add("m2").await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec!["p1".to_string(), "m2".to_string()]);
        assert!(repo.contains("m2").await.unwrap());

        assert!(repo.remove("p1").await.unwrap());
        assert!(!repo.remove("p1").await.unwrap());
        assert_eq!(repo.list().await.unwrap(), vec!["m2".to_string()]);
    }
}
