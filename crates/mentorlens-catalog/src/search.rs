//! Filtering, sorting and pagination over scored entities.
//!
//! Facets are optional: an empty list means no restriction. Values within a
//! facet are OR'd and facets are AND'd together.

use std::cmp::Ordering;

use mentorlens_common::{Difficulty, Mentor, Project, ProjectStatus};
use mentorlens_ranker::{MentorScore, ProjectScore};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// An entity paired with its current score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<T, S> {
    pub entity: T,
    pub score: S,
}

pub type ProjectEntry = Scored<Project, ProjectScore>;
pub type MentorEntry = Scored<Mentor, MentorScore>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSortKey {
    #[default]
    Score,
    Title,
    Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorSortKey {
    #[default]
    Score,
    Name,
    Rating,
}

/// Inclusive bounds on `score.overall`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 0.0, max: 5.0 }
    }
}

impl ScoreRange {
    pub fn contains(&self, overall: f64) -> bool {
        overall >= self.min && overall <= self.max
    }
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Slice one page out of an already filtered and sorted list.
///
/// Page numbers below 1 and page sizes of 0 are raised to 1. A page past the
/// end is empty.
pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> Page<T> {
    let page = pagination.page.max(1);
    let page_size = pagination.page_size.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size).min(total);
    let items = items.into_iter().skip(start).take(page_size).collect();
    Page { items, total, page, page_size, total_pages }
}

fn matches_text(needle: &str, fields: &[&str], lists: &[&[String]]) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(needle))
        || lists.iter().any(|l| l.iter().any(|v| v.to_lowercase().contains(needle)))
}

fn facet<T: PartialEq>(selected: &[T], value: &T) -> bool {
    selected.is_empty() || selected.contains(value)
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

// ── Projects ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectQuery {
    /// Case-insensitive substring over title, description, keywords and mentor name.
    pub text: Option<String>,
    pub categories: Vec<String>,
    pub difficulties: Vec<Difficulty>,
    pub statuses: Vec<ProjectStatus>,
    pub mentor_ids: Vec<String>,
    pub score: ScoreRange,
    pub sort_by: ProjectSortKey,
    pub order: SortOrder,
}

impl ProjectQuery {
    pub fn matches(&self, entry: &ProjectEntry) -> bool {
        let p = &entry.entity;
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let fields = [p.title.as_str(), p.description.as_str(), p.mentor_name.as_str()];
            if !matches_text(&needle, &fields, &[&p.keywords]) {
                return false;
            }
        }
        facet(&self.categories, &p.category)
            && facet(&self.difficulties, &p.difficulty)
            && facet(&self.statuses, &p.status)
            && facet(&self.mentor_ids, &p.mentor_id)
            && self.score.contains(entry.score.overall)
    }

    fn compare(&self, a: &ProjectEntry, b: &ProjectEntry) -> Ordering {
        let ordering = match self.sort_by {
            ProjectSortKey::Score => a.score.overall.total_cmp(&b.score.overall),
            ProjectSortKey::Title => compare_text(&a.entity.title, &b.entity.title),
            ProjectSortKey::Duration => {
                a.entity.estimated_duration.cmp(&b.entity.estimated_duration)
            }
        };
        self.order.apply(ordering)
    }

    /// Filter and sort without paginating.
    pub fn apply(&self, entries: Vec<ProjectEntry>) -> Vec<ProjectEntry> {
        let mut hits: Vec<_> = entries.into_iter().filter(|e| self.matches(e)).collect();
        hits.sort_by(|a, b| self.compare(a, b));
        hits
    }
}

pub fn search_projects(
    entries: Vec<ProjectEntry>,
    query: &ProjectQuery,
    pagination: Pagination,
) -> Page<ProjectEntry> {
    paginate(query.apply(entries), pagination)
}

// ── Mentors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentorQuery {
    /// Case-insensitive substring over name, department, research fields and description.
    pub text: Option<String>,
    pub departments: Vec<String>,
    /// Matches when the mentor lists any of these fields.
    pub research_fields: Vec<String>,
    pub available: Option<bool>,
    pub min_rating: Option<f64>,
    pub score: ScoreRange,
    pub sort_by: MentorSortKey,
    pub order: SortOrder,
}

impl MentorQuery {
    pub fn matches(&self, entry: &MentorEntry) -> bool {
        let m = &entry.entity;
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let fields = [m.name.as_str(), m.department.as_str(), m.description.as_str()];
            if !matches_text(&needle, &fields, &[&m.research_fields]) {
                return false;
            }
        }
        let fields_ok = self.research_fields.is_empty()
            || self.research_fields.iter().any(|f| m.research_fields.contains(f));
        facet(&self.departments, &m.department)
            && fields_ok
            && self.available.map_or(true, |a| m.is_available == a)
            && self.min_rating.map_or(true, |r| m.rating >= r)
            && self.score.contains(entry.score.overall)
    }

    fn compare(&self, a: &MentorEntry, b: &MentorEntry) -> Ordering {
        let ordering = match self.sort_by {
            MentorSortKey::Score => a.score.overall.total_cmp(&b.score.overall),
            MentorSortKey::Name => compare_text(&a.entity.name, &b.entity.name),
            MentorSortKey::Rating => a.entity.rating.total_cmp(&b.entity.rating),
        };
        self.order.apply(ordering)
    }

    pub fn apply(&self, entries: Vec<MentorEntry>) -> Vec<MentorEntry> {
        let mut hits: Vec<_> = entries.into_iter().filter(|e| self.matches(e)).collect();
        hits.sort_by(|a, b| self.compare(a, b));
        hits
    }
}

pub fn search_mentors(
    entries: Vec<MentorEntry>,
    query: &MentorQuery,
    pagination: Pagination,
) -> Page<MentorEntry> {
    paginate(query.apply(entries), pagination)
}
