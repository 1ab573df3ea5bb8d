//! mentorlens-ranker — Weighted multi-dimension scoring for projects and mentors.

pub mod error;
pub mod normalise;
pub mod scorer;
pub mod weights;

pub use error::{Result, ScoringError};
pub use scorer::{
    score_mentor, score_mentors, score_project, score_projects, MentorDimensions, MentorScore,
    ProjectDimensions, ProjectScore,
};
pub use weights::{MentorWeights, ProjectWeights, RawWeights, ScoringWeights, WeightMap, WeightVector};
