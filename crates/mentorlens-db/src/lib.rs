//! mentorlens-db — Persistent key-value storage for MentorLens.
//!
//! Every collection is stored as one JSON value under a fixed key. The
//! [`Database`] handle serialises writes; repositories wrap one key each.
//!
//! # Example
//!
//! ```rust,no_run
//! use mentorlens_db::{Database, FavoritesRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = std::sync::Arc::new(Database::open("./.mentorlens").await?);
//!     let favorites = FavoritesRepository::new(db.clone());
//!     favorites.add("p1").await?;
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod comparisons;
pub mod database;
pub mod error;
pub mod favorites;
pub mod history;
pub mod imported;
pub mod schema;
pub mod scores;
pub mod settings;
pub mod store;

pub use bundle::BundleRepository;
pub use comparisons::ComparisonRepository;
pub use database::{Database, StorageUsage, DEFAULT_IO_TIMEOUT, STORAGE_QUOTA_BYTES};
pub use error::{DbError, Result};
pub use favorites::FavoritesRepository;
pub use history::{HistoryRepository, HISTORY_LIMIT};
pub use imported::ImportedDataRepository;
pub use schema::{
    item_id, Comparison, ComparisonItem, ComparisonUpdate, DefaultFilters, DisplayPreferences,
    ItemKind, ItemSnapshot, Language, StateBundle, Theme, UserSettings,
};
pub use scores::ScoreRepository;
pub use settings::SettingsRepository;
pub use store::{FileStore, KvStore, MemoryStore};
