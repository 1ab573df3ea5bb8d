//! Per-dimension and overall score computation.
//!
//! overall = round_half_up(Σ(dimension_d × weight_d), 2)
//!
//! Every dimension is a pure function of the entity, bounded to [0, 5].

use chrono::{DateTime, Utc};
use mentorlens_common::{Difficulty, Mentor, Project};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalise::{clamp_score, round_half_up, weighted_sum};
use crate::weights::{MentorWeights, ProjectWeights, WeightVector};

/// Keyword terms that mark a project as frontier work.
pub const INNOVATION_TERMS: &[&str] = &[
    "AI", "机器学习", "深度学习", "VR", "AR", "区块链", "量子",
    "创新", "前沿", "新兴", "突破", "革命性",
];

/// Keyword terms that mark a project as socially impactful.
pub const IMPACT_TERMS: &[&str] = &[
    "社会", "医疗", "教育", "环境", "安全", "健康", "可持续发展",
    "公益", "改善", "解决", "优化", "提升",
];

// ── Score types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectDimensions {
    pub technical: f64,
    pub innovation: f64,
    pub feasibility: f64,
    pub impact: f64,
    pub learning: f64,
}

impl ProjectDimensions {
    pub fn as_array(&self) -> [f64; 5] {
        [self.technical, self.innovation, self.feasibility, self.impact, self.learning]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MentorDimensions {
    pub expertise: f64,
    pub teaching: f64,
    pub support: f64,
    pub communication: f64,
    pub availability: f64,
}

impl MentorDimensions {
    pub fn as_array(&self) -> [f64; 5] {
        [self.expertise, self.teaching, self.support, self.communication, self.availability]
    }
}

/// Derived score for one project. Replaced, never mutated, when inputs change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScore {
    pub project_id: String,
    pub overall: f64,
    pub dimensions: ProjectDimensions,
    pub weights: ProjectWeights,
    pub calculated_at: DateTime<Utc>,
}

/// Derived score for one mentor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorScore {
    pub mentor_id: String,
    pub overall: f64,
    pub dimensions: MentorDimensions,
    pub weights: MentorWeights,
    pub calculated_at: DateTime<Utc>,
}

// ── Project dimensions ───────────────────────────────────────────────────────

fn count_matching(keywords: &[String], vocabulary: &[&str]) -> usize {
    keywords
        .iter()
        .filter(|kw| vocabulary.iter().any(|term| kw.contains(term)))
        .count()
}

fn technical(project: &Project) -> f64 {
    let base = match project.difficulty {
        Difficulty::Beginner => 2.0,
        Difficulty::Intermediate => 4.0,
        Difficulty::Advanced => 5.0,
    };
    let skill_bonus = (project.skills.len() as f64 * 0.2).min(1.0);
    clamp_score(base + skill_bonus)
}

fn innovation(project: &Project) -> f64 {
    let hits = count_matching(&project.keywords, INNOVATION_TERMS);
    clamp_score(2.0 + hits as f64 * 0.5)
}

fn feasibility(project: &Project) -> f64 {
    let duration = match project.estimated_duration {
        0..=6 => 4.0,
        7..=12 => 3.0,
        _ => 2.0,
    };
    let requirements = match project.requirements.len() {
        0..=3 => 4.0,
        4..=6 => 3.0,
        _ => 2.0,
    };
    clamp_score((duration + requirements) / 2.0)
}

fn impact(project: &Project) -> f64 {
    let hits = count_matching(&project.keywords, IMPACT_TERMS);
    clamp_score(2.0 + hits as f64 * 0.6)
}

fn learning(project: &Project) -> f64 {
    let skills = (project.skills.len() as f64 * 0.3).min(3.0);
    let complexity = match project.difficulty {
        Difficulty::Advanced => 2.0,
        Difficulty::Intermediate => 1.5,
        Difficulty::Beginner => 1.0,
    };
    clamp_score(skills + complexity)
}

/// Compute the five project dimensions. Assumes a validated project.
pub fn project_dimensions(project: &Project) -> ProjectDimensions {
    ProjectDimensions {
        technical: technical(project),
        innovation: innovation(project),
        feasibility: feasibility(project),
        impact: impact(project),
        learning: learning(project),
    }
}

// ── Mentor dimensions ────────────────────────────────────────────────────────

fn expertise(mentor: &Mentor) -> f64 {
    let publications = (mentor.publications.len() as f64 * 0.1).min(1.0);
    let awards = (mentor.awards.len() as f64 * 0.2).min(1.0);
    clamp_score(mentor.rating + publications + awards)
}

fn teaching(mentor: &Mentor) -> f64 {
    let ratio = mentor.student_count as f64 / mentor.review_count.max(1) as f64;
    let bonus = if ratio > 0.5 { 0.5 } else { 0.0 };
    clamp_score(mentor.rating + bonus)
}

fn support(mentor: &Mentor) -> f64 {
    let bonus = if mentor.is_available { 0.5 } else { 0.0 };
    clamp_score(mentor.rating + bonus)
}

fn communication(mentor: &Mentor) -> f64 {
    let base = match mentor.review_count {
        n if n > 10 => 4.0,
        n if n > 5 => 3.0,
        _ => 2.0,
    };
    // Ratings below 1.0 would otherwise push this negative.
    clamp_score(base + (mentor.rating - 3.0))
}

fn availability(mentor: &Mentor) -> f64 {
    if mentor.is_available { 5.0 } else { 1.0 }
}

/// Compute the five mentor dimensions. Assumes a validated mentor.
pub fn mentor_dimensions(mentor: &Mentor) -> MentorDimensions {
    MentorDimensions {
        expertise: expertise(mentor),
        teaching: teaching(mentor),
        support: support(mentor),
        communication: communication(mentor),
        availability: availability(mentor),
    }
}

// ── Overall scores ───────────────────────────────────────────────────────────

/// Score one project under `weights`.
///
/// Fails on a malformed project or an invalid weight vector instead of
/// producing a zero score.
pub fn score_project(project: &Project, weights: &ProjectWeights) -> Result<ProjectScore> {
    project.validate()?;
    weights.check()?;
    let dimensions = project_dimensions(project);
    let overall = round_half_up(weighted_sum(&dimensions.as_array(), &weights.as_array()), 2);
    Ok(ProjectScore {
        project_id: project.id.clone(),
        overall,
        dimensions,
        weights: *weights,
        calculated_at: Utc::now(),
    })
}

/// Score one mentor under `weights`.
pub fn score_mentor(mentor: &Mentor, weights: &MentorWeights) -> Result<MentorScore> {
    mentor.validate()?;
    weights.check()?;
    let dimensions = mentor_dimensions(mentor);
    let overall = round_half_up(weighted_sum(&dimensions.as_array(), &weights.as_array()), 2);
    Ok(MentorScore {
        mentor_id: mentor.id.clone(),
        overall,
        dimensions,
        weights: *weights,
        calculated_at: Utc::now(),
    })
}

/// Score every project; the first malformed project aborts the batch.
pub fn score_projects(projects: &[Project], weights: &ProjectWeights) -> Result<Vec<ProjectScore>> {
    projects.iter().map(|p| score_project(p, weights)).collect()
}

pub fn score_mentors(mentors: &[Mentor], weights: &MentorWeights) -> Result<Vec<MentorScore>> {
    mentors.iter().map(|m| score_mentor(m, weights)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use mentorlens_test_utils::fixtures;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_project_scenario() {
        let mut project = fixtures::project("p-ref");
        project.difficulty = Difficulty::Advanced;
        project.skills = strings(&["Rust", "Python", "SQL", "Docker", "Linux"]);
        project.keywords = strings(&["AI", "区块链"]);
        project.requirements = strings(&["GPA 3.5", "English"]);
        project.estimated_duration = 4;

        let score = score_project(&project, &ProjectWeights::default()).unwrap();
        assert_eq!(
            score.dimensions,
            ProjectDimensions {
                technical: 5.0,
                innovation: 3.0,
                feasibility: 4.0,
                impact: 2.0,
                learning: 3.5,
            }
        );
        // 3.575 rounds half-up.
        assert_eq!(score.overall, 3.58);
        assert_eq!(score.weights, ProjectWeights::default());
    }

    #[test]
    fn test_tie_sums_round_up() {
        // (skills, duration, requirements, keywords) → overall under default weights
        let cases: [(usize, u32, usize, &[&str], f64); 4] = [
            (1, 4, 0, &[], 2.35),
            (1, 8, 0, &[], 2.25),
            (1, 14, 8, &[], 1.95),
            (1, 4, 0, &["AI"], 2.45),
        ];
        for (skills, duration, requirements, keywords, expected) in cases {
            let mut project = fixtures::project("p-tie");
            project.difficulty = Difficulty::Beginner;
            project.skills = (0..skills).map(|i| format!("skill-{i}")).collect();
            project.estimated_duration = duration;
            project.requirements = (0..requirements).map(|i| format!("req-{i}")).collect();
            project.keywords = strings(keywords);

            let score = score_project(&project, &ProjectWeights::default()).unwrap();
            assert_eq!(score.overall, expected, "dimensions {:?}", score.dimensions);
        }
    }

    #[test]
    fn test_technical_skill_bonus_capped() {
        let mut project = fixtures::project("p1");
        project.difficulty = Difficulty::Beginner;
        project.skills = (0..12).map(|i| format!("skill-{i}")).collect();
        assert_eq!(project_dimensions(&project).technical, 3.0);
    }

    #[test]
    fn test_impact_keywords() {
        let mut project = fixtures::project("p1");
        project.keywords = strings(&["医疗影像", "环境监测", "Rust"]);
        assert!((project_dimensions(&project).impact - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_feasibility_tiers() {
        let mut project = fixtures::project("p1");
        project.estimated_duration = 12;
        project.requirements = strings(&["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(project_dimensions(&project).feasibility, 2.5);
        project.estimated_duration = 13;
        assert_eq!(project_dimensions(&project).feasibility, 2.0);
    }

    #[test]
    fn test_mentor_dimensions() {
        let mut mentor = fixtures::mentor("m1");
        mentor.rating = 4.5;
        mentor.review_count = 12;
        mentor.student_count = 2;
        mentor.is_available = false;
        mentor.publications = (0..15).map(fixtures::publication).collect();
        mentor.awards = (0..2).map(fixtures::award).collect();

        let dims = mentor_dimensions(&mentor);
        assert_eq!(dims.expertise, 5.0);
        assert_eq!(dims.teaching, 4.5);
        assert_eq!(dims.support, 4.5);
        assert_eq!(dims.communication, 5.0);
        assert_eq!(dims.availability, 1.0);
    }

    #[test]
    fn test_teaching_ratio_bonus() {
        let mut mentor = fixtures::mentor("m1");
        mentor.rating = 3.0;
        mentor.review_count = 0;
        mentor.student_count = 1;
        assert_eq!(mentor_dimensions(&mentor).teaching, 3.5);
        mentor.review_count = 4;
        mentor.student_count = 2;
        assert_eq!(mentor_dimensions(&mentor).teaching, 3.0);
    }

    #[test]
    fn test_low_rating_communication_not_negative() {
        let mut mentor = fixtures::mentor("m1");
        mentor.rating = 0.0;
        mentor.review_count = 0;
        assert_eq!(mentor_dimensions(&mentor).communication, 0.0);
    }

    #[test]
    fn test_scores_bounded_for_dataset() {
        let dataset = fixtures::sample_dataset();
        let weight_sets = [
            ProjectWeights::default(),
            ProjectWeights::from_array([1.0, 0.0, 0.0, 0.0, 0.0]),
            ProjectWeights::from_array([0.0, 0.0, 0.0, 0.5, 0.5]),
        ];
        for weights in &weight_sets {
            for score in score_projects(&dataset.projects, weights).unwrap() {
                for d in score.dimensions.as_array() {
                    assert!((0.0..=5.0).contains(&d));
                }
                assert!((0.0..=5.0).contains(&score.overall));
                let expected = round_half_up(weighted_sum(&score.dimensions.as_array(), &weights.as_array()), 2);
                assert_eq!(score.overall, expected);
            }
        }
        for score in score_mentors(&dataset.mentors, &MentorWeights::default()).unwrap() {
            for d in score.dimensions.as_array() {
                assert!((0.0..=5.0).contains(&d));
            }
            assert!((0.0..=5.0).contains(&score.overall));
        }
    }

    #[test]
    fn test_scoring_is_reproducible() {
        let mentor = fixtures::mentor("m1");
        let a = score_mentor(&mentor, &MentorWeights::default()).unwrap();
        let b = score_mentor(&mentor, &MentorWeights::default()).unwrap();
        assert_eq!(a.dimensions, b.dimensions);
        assert_eq!(a.overall, b.overall);
    }

    #[test]
    fn test_malformed_entity_is_an_error() {
        let mut project = fixtures::project("p1");
        project.id = String::new();
        assert!(matches!(
            score_project(&project, &ProjectWeights::default()),
            Err(ScoringError::InvalidEntity(_))
        ));

        let mut mentor = fixtures::mentor("m1");
        mentor.rating = f64::NAN;
        assert!(score_mentors(&[mentor], &MentorWeights::default()).is_err());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let project = fixtures::project("p1");
        let weights = ProjectWeights::from_array([1.0, 1.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            score_project(&project, &weights),
            Err(ScoringError::WeightSum { vector: "project", .. })
        ));
    }
}
