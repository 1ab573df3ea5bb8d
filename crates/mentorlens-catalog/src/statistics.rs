//! Aggregate counts over a dataset.

use mentorlens_common::Dataset;
use mentorlens_ranker::normalise::round_half_up;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatistics {
    pub total_projects: usize,
    pub total_mentors: usize,
    pub available_mentors: usize,
    pub total_publications: usize,
    pub total_awards: usize,
    /// Mean mentor rating, two decimals. Zero for an empty dataset.
    pub average_rating: f64,
    pub average_students_per_mentor: f64,
    pub projects_by_category: Vec<Count>,
    pub projects_by_difficulty: Vec<Count>,
    pub mentors_by_department: Vec<Count>,
    pub mentors_by_title: Vec<Count>,
}

/// Tally `names` in order of first appearance.
fn tally<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Count> {
    let mut counts: Vec<Count> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|c| c.name == name) {
            Some(c) => c.count += 1,
            None => counts.push(Count { name: name.to_string(), count: 1 }),
        }
    }
    counts
}

fn mean(total: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        round_half_up(total / n as f64, 2)
    }
}

pub fn compute(dataset: &Dataset) -> CatalogStatistics {
    let mentors = &dataset.mentors;
    let projects = &dataset.projects;
    CatalogStatistics {
        total_projects: projects.len(),
        total_mentors: mentors.len(),
        available_mentors: mentors.iter().filter(|m| m.is_available).count(),
        total_publications: mentors.iter().map(|m| m.publications.len()).sum(),
        total_awards: mentors.iter().map(|m| m.awards.len()).sum(),
        average_rating: mean(mentors.iter().map(|m| m.rating).sum(), mentors.len()),
        average_students_per_mentor: mean(
            mentors.iter().map(|m| m.student_count as f64).sum(),
            mentors.len(),
        ),
        projects_by_category: tally(projects.iter().map(|p| p.category.as_str())),
        projects_by_difficulty: tally(projects.iter().map(|p| p.difficulty.as_str())),
        mentors_by_department: tally(mentors.iter().map(|m| m.department.as_str())),
        mentors_by_title: tally(mentors.iter().map(|m| m.title.as_str())),
    }
}
