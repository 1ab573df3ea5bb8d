//! Dataset entity types.
//! These are Rust representations of the records in the static dataset document.
//! Field names follow the dataset's camelCase JSON layout.

use serde::{Deserialize, Serialize};

use crate::error::{EntityError, Result};

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Ongoing,
    Completed,
    Cancelled,
    Planning,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Planning => "planning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub mentor_id: String,
    /// Denormalised copy of the owning mentor's name.
    pub mentor_name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub category: String,
    pub difficulty: Difficulty,
    /// Months.
    pub estimated_duration: u32,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Project {
    /// Check the fields scoring depends on.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(EntityError::EmptyId { entity: "project" });
        }
        if self.title.trim().is_empty() {
            return Err(EntityError::MissingField {
                entity: "project",
                id: self.id.clone(),
                field: "title",
            });
        }
        if self.estimated_duration == 0 {
            return Err(EntityError::OutOfRange {
                entity: "project",
                id: self.id.clone(),
                field: "estimatedDuration",
                value: 0.0,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mentor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub office: String,
    #[serde(default)]
    pub research_fields: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub awards: Vec<Award>,
    /// 0–5, externally sourced.
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub student_count: u32,
    pub is_available: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Mentor {
    /// Check the fields scoring depends on.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(EntityError::EmptyId { entity: "mentor" });
        }
        if self.name.trim().is_empty() {
            return Err(EntityError::MissingField {
                entity: "mentor",
                id: self.id.clone(),
                field: "name",
            });
        }
        if !self.rating.is_finite() || !(0.0..=5.0).contains(&self.rating) {
            return Err(EntityError::OutOfRange {
                entity: "mentor",
                id: self.id.clone(),
                field: "rating",
                value: self.rating,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub major: String,
    pub year: i32,
    #[serde(default)]
    pub is_highest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    Journal,
    Conference,
    Book,
    Patent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub journal: String,
    pub year: i32,
    #[serde(default)]
    pub citations: u32,
    #[serde(rename = "type")]
    pub kind: PublicationType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
}

// ---------------------------------------------------------------------------
// Reviews and statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub mentor_id: String,
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    pub rating: f64,
    #[serde(default)]
    pub content: String,
    pub aspects: ReviewAspects,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAspects {
    pub teaching: f64,
    pub research: f64,
    pub communication: f64,
    pub support: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_mentors: u32,
    pub total_students: u32,
    pub total_reviews: u32,
    pub average_rating: f64,
    pub field_distribution: Vec<FieldShare>,
    pub rating_distribution: Vec<RatingShare>,
    pub monthly_trends: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldShare {
    pub field: String,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingShare {
    pub rating: f64,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub mentors: u32,
    pub students: u32,
    pub matches: u32,
}

// ---------------------------------------------------------------------------
// Dataset root
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub last_updated: String,
    pub mentors: Vec<Mentor>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub research_fields: Vec<String>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub project_categories: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Dataset {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn mentor(&self, id: &str) -> Option<&Mentor> {
        self.mentors.iter().find(|m| m.id == id)
    }
}
