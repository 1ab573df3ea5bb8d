//! Recently viewed entity ids, most recent first.

use std::sync::Arc;

use crate::database::Database;
use crate::error::Result;
use crate::schema::KEY_HISTORY;

pub const HISTORY_LIMIT: usize = 50;

#[derive(Clone)]
pub struct HistoryRepository {
    db: Arc<Database>,
}

impl HistoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        self.db.read_or_default(KEY_HISTORY).await
    }

    /// Move `id` to the front, dropping the oldest entries past [`HISTORY_LIMIT`].
    pub async fn record(&self, id: &str) -> Result<()> {
        self.db
            .update(KEY_HISTORY, |history: &mut Vec<String>| {
                history.retain(|h| h != id);
                history.insert(0, id.to_string());
                history.truncate(HISTORY_LIMIT);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_moves_to_front() {
        let repo = HistoryRepository::new(Arc::new(Database::in_memory()));
        repo.record("p1").await.unwrap();
        repo.record("p2").await.unwrap();
        repo.record("p1").await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec!["p1".to_string(), "p2".to_string()]);
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let repo = HistoryRepository::new(Arc::new(Database::in_memory()));
        for i in 0..(HISTORY_LIMIT + 5) {
            repo.record(&format!("p{i}")).await.unwrap();
        }
        let history = repo.list().await.unwrap();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0], format!("p{}", HISTORY_LIMIT + 4));
        assert!(!history.contains(&"p0".to_string()));
    }
}
