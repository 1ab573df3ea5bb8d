//! mentorlens-catalog — Dataset access, score caching, comparisons and search.
//!
//! [`Catalog`] is the entry point: it owns the dataset loader and the score
//! cache and exposes the repositories from `mentorlens-db`.

pub mod cache;
pub mod catalog;
pub mod comparison;
pub mod dataset;
pub mod error;
pub mod search;
pub mod statistics;

pub use cache::{ScoreCache, ScoreSet};
pub use catalog::Catalog;
pub use comparison::{ComparisonManager, Selection};
pub use dataset::{parse_dataset, DatasetLoader, DatasetSource, DEFAULT_FETCH_TIMEOUT};
pub use error::{CatalogError, Result};
pub use search::{
    paginate, MentorEntry, MentorQuery, MentorSortKey, Page, Pagination, ProjectEntry,
    ProjectQuery, ProjectSortKey, ScoreRange, Scored, SortOrder, DEFAULT_PAGE_SIZE,
};
pub use statistics::{CatalogStatistics, Count};
