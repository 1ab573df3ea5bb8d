//! Persisted value types and storage keys.

use chrono::{DateTime, Utc};
use mentorlens_common::{Dataset, Mentor, Project};
use mentorlens_ranker::{MentorScore, ProjectScore, ScoringWeights};
use serde::{Deserialize, Serialize};

use crate::error::{DbError, Result};

// ── Keys ────────────────────────────────────────────────────────────────────

pub const KEY_COMPARISONS: &str = "mentor-project-comparisons";
pub const KEY_SETTINGS: &str = "mentor-project-settings";
pub const KEY_FAVORITES: &str = "mentor-project-favorites";
pub const KEY_HISTORY: &str = "mentor-project-history";
pub const KEY_IMPORTED_DATA: &str = "mentor-project-imported-data";
pub const KEY_PROJECT_SCORES: &str = "mentor-project-scores";
pub const KEY_MENTOR_SCORES: &str = "mentor-mentor-scores";

pub const ALL_KEYS: [&str; 7] = [
    KEY_COMPARISONS,
    KEY_SETTINGS,
    KEY_FAVORITES,
    KEY_HISTORY,
    KEY_IMPORTED_DATA,
    KEY_PROJECT_SCORES,
    KEY_MENTOR_SCORES,
];

// ── Comparisons ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Project,
    Mentor,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Mentor => "mentor",
        }
    }
}

/// Composite item id: `{type}-{entityId}`.
pub fn item_id(kind: ItemKind, entity_id: &str) -> String {
    format!("{}-{}", kind.as_str(), entity_id)
}

/// Frozen copy of an entity and its score at the moment it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemSnapshot {
    Project { data: Project, score: ProjectScore },
    Mentor { data: Mentor, score: MentorScore },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonItem {
    pub id: String,
    #[serde(flatten)]
    pub snapshot: ItemSnapshot,
}

impl ComparisonItem {
    pub fn project(data: Project, score: ProjectScore) -> Self {
        Self {
            id: item_id(ItemKind::Project, &data.id),
            snapshot: ItemSnapshot::Project { data, score },
        }
    }

    pub fn mentor(data: Mentor, score: MentorScore) -> Self {
        Self {
            id: item_id(ItemKind::Mentor, &data.id),
            snapshot: ItemSnapshot::Mentor { data, score },
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.snapshot {
            ItemSnapshot::Project { .. } => ItemKind::Project,
            ItemSnapshot::Mentor { .. } => ItemKind::Mentor,
        }
    }

    pub fn entity_id(&self) -> &str {
        match &self.snapshot {
            ItemSnapshot::Project { data, .. } => &data.id,
            ItemSnapshot::Mentor { data, .. } => &data.id,
        }
    }

    /// Snapshot overall score.
    pub fn overall(&self) -> f64 {
        match &self.snapshot {
            ItemSnapshot::Project { score, .. } => score.overall,
            ItemSnapshot::Mentor { score, .. } => score.overall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub id: String,
    pub name: String,
    pub items: Vec<ComparisonItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comparison {
    /// Build a new comparison with a fresh id, validating name and items.
    pub fn new(name: &str, items: Vec<ComparisonItem>) -> Result<Self> {
        let now = Utc::now();
        let comparison = Self {
            id: format!("comparison-{}", uuid::Uuid::new_v4()),
            name: name.trim().to_string(),
            items,
            created_at: now,
            updated_at: now,
        };
        comparison.validate()?;
        Ok(comparison)
    }

    /// Non-empty name, at least one item, unique item ids.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DbError::Validation("comparison name must not be empty".into()));
        }
        if self.items.is_empty() {
            return Err(DbError::Validation("comparison must contain at least one item".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(DbError::Duplicate(item.id.clone()));
            }
        }
        Ok(())
    }
}

/// Partial update applied by `ComparisonRepository::update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonUpdate {
    pub name: Option<String>,
    pub items: Option<Vec<ComparisonItem>>,
}

// ── Settings ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPreferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_items_per_page() -> usize { 12 }
fn default_sort() -> String { "rating-desc".to_string() }

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: Language::default(),
            items_per_page: default_items_per_page(),
            default_sort: default_sort(),
        }
    }
}

/// Filters pre-selected when a listing opens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultFilters {
    pub departments: Vec<String>,
    pub research_fields: Vec<String>,
    pub difficulty: Vec<String>,
    pub status: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub scoring_weights: ScoringWeights,
    #[serde(default)]
    pub display_preferences: DisplayPreferences,
    #[serde(default)]
    pub filters: DefaultFilters,
}

// ── Export bundle ───────────────────────────────────────────────────────────

/// Everything `export` writes and `import` overwrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBundle {
    pub comparisons: Vec<Comparison>,
    pub settings: UserSettings,
    pub favorites: Vec<String>,
    pub history: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_data: Option<Vec<Dataset>>,
}
