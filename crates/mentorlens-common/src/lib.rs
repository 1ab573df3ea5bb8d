//! mentorlens-common — Dataset entity types and validation shared across all mentorlens crates.

pub mod entities;
pub mod error;

// Re-export commonly used types
pub use entities::{
    Award, Dataset, Difficulty, Education, Experience, Mentor, Project, ProjectStatus,
    Publication, PublicationType, Review, ReviewAspects, Statistics,
};
pub use error::{EntityError, Result};
