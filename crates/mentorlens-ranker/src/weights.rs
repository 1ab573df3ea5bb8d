//! Weight vectors for project and mentor scoring.
//!
//! Each entity type has a five-component vector whose values must sum to 1.0
//! within [`WEIGHT_TOLERANCE`]. Vectors that miss the sum are normalised by
//! dividing every component by the vector's sum.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

/// Accepted deviation of a weight vector's sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Dimension name → weight, as submitted through settings or import.
pub type WeightMap = BTreeMap<String, f64>;

/// A fixed five-dimension weight vector.
pub trait WeightVector: Sized {
    /// Vector label used in errors ("project" / "mentor").
    const NAME: &'static str;
    /// Dimension names in scoring order.
    const DIMENSIONS: [&'static str; 5];

    fn as_array(&self) -> [f64; 5];
    fn from_array(values: [f64; 5]) -> Self;

    fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// True if the components sum to 1.0 within tolerance.
    fn is_unit(&self) -> bool {
        (self.sum() - 1.0).abs() < WEIGHT_TOLERANCE
    }

    /// Full boundary check: finite, non-negative components summing to ~1.0.
    fn check(&self) -> Result<()> {
        for (name, value) in Self::DIMENSIONS.iter().zip(self.as_array()) {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidWeight {
                    vector: Self::NAME,
                    dimension: (*name).to_string(),
                    value,
                });
            }
        }
        if !self.is_unit() {
            return Err(ScoringError::WeightSum { vector: Self::NAME, sum: self.sum() });
        }
        Ok(())
    }

    /// Return a copy whose components sum to 1.0. `self` is left untouched.
    fn normalised(&self) -> Result<Self> {
        let values = self.as_array();
        let sum = checked_sum(Self::NAME, values.iter().copied())?;
        Ok(Self::from_array(values.map(|v| v / sum)))
    }

    fn to_map(&self) -> WeightMap {
        Self::DIMENSIONS
            .iter()
            .zip(self.as_array())
            .map(|(name, value)| ((*name).to_string(), value))
            .collect()
    }

    /// Build from a map that must carry exactly the five known dimensions.
    fn from_map(map: &WeightMap) -> Result<Self> {
        if let Some(unknown) = map.keys().find(|k| !Self::DIMENSIONS.contains(&k.as_str())) {
            return Err(ScoringError::UnknownDimension {
                vector: Self::NAME,
                dimension: unknown.clone(),
            });
        }
        let mut values = [0.0; 5];
        for (slot, name) in values.iter_mut().zip(Self::DIMENSIONS) {
            *slot = *map.get(name).ok_or(ScoringError::MissingDimension {
                vector: Self::NAME,
                dimension: name,
            })?;
        }
        Ok(Self::from_array(values))
    }
}

fn checked_sum(vector: &'static str, values: impl Iterator<Item = f64>) -> Result<f64> {
    let sum: f64 = values.sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(ScoringError::Degenerate { vector, sum });
    }
    Ok(sum)
}

fn map_is_unit(map: &WeightMap) -> bool {
    let sum: f64 = map.values().sum();
    (sum - 1.0).abs() < WEIGHT_TOLERANCE
}

fn normalise_map(vector: &'static str, map: &WeightMap) -> Result<WeightMap> {
    let sum = checked_sum(vector, map.values().copied())?;
    Ok(map.iter().map(|(k, v)| (k.clone(), v / sum)).collect())
}

// ── Project weights ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectWeights {
    pub technical: f64,
    pub innovation: f64,
    pub feasibility: f64,
    pub impact: f64,
    pub learning: f64,
}

impl Default for ProjectWeights {
    fn default() -> Self {
        Self {
            technical:   0.25,
            innovation:  0.20,
            feasibility: 0.20,
            impact:      0.20,
            learning:    0.15,
        }
    }
}

impl WeightVector for ProjectWeights {
    const NAME: &'static str = "project";
    const DIMENSIONS: [&'static str; 5] =
        ["technical", "innovation", "feasibility", "impact", "learning"];

    fn as_array(&self) -> [f64; 5] {
        [self.technical, self.innovation, self.feasibility, self.impact, self.learning]
    }

    fn from_array([technical, innovation, feasibility, impact, learning]: [f64; 5]) -> Self {
        Self { technical, innovation, feasibility, impact, learning }
    }
}

// ── Mentor weights ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MentorWeights {
    pub expertise: f64,
    pub teaching: f64,
    pub support: f64,
    pub communication: f64,
    pub availability: f64,
}

impl Default for MentorWeights {
    fn default() -> Self {
        Self {
            expertise:     0.30,
            teaching:      0.25,
            support:       0.20,
            communication: 0.15,
            availability:  0.10,
        }
    }
}

impl WeightVector for MentorWeights {
    const NAME: &'static str = "mentor";
    const DIMENSIONS: [&'static str; 5] =
        ["expertise", "teaching", "support", "communication", "availability"];

    fn as_array(&self) -> [f64; 5] {
        [self.expertise, self.teaching, self.support, self.communication, self.availability]
    }

    fn from_array([expertise, teaching, support, communication, availability]: [f64; 5]) -> Self {
        Self { expertise, teaching, support, communication, availability }
    }
}

// ── Combined vectors ─────────────────────────────────────────────────────────

/// The pair of weight vectors held in user settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub project: ProjectWeights,
    pub mentor: MentorWeights,
}

impl ScoringWeights {
    /// True iff both vectors individually sum to 1.0 within tolerance.
    pub fn validate(&self) -> bool {
        self.project.is_unit() && self.mentor.is_unit()
    }

    pub fn check(&self) -> Result<()> {
        self.project.check()?;
        self.mentor.check()
    }

    /// Normalise each vector independently.
    pub fn normalised(&self) -> Result<Self> {
        Ok(Self {
            project: self.project.normalised()?,
            mentor: self.mentor.normalised()?,
        })
    }

    /// Accept as-is if valid, otherwise normalise, then run the full check.
    pub fn accept(&self) -> Result<Self> {
        let accepted = if self.validate() { *self } else { self.normalised()? };
        accepted.check()?;
        Ok(accepted)
    }
}

/// Untyped weight vectors, keyed by dimension name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWeights {
    #[serde(default)]
    pub project: WeightMap,
    #[serde(default)]
    pub mentor: WeightMap,
}

impl RawWeights {
    /// True iff both maps individually sum to 1.0 within tolerance.
    pub fn validate(&self) -> bool {
        map_is_unit(&self.project) && map_is_unit(&self.mentor)
    }

    /// Normalise each map independently. Empty maps fall back to the defaults.
    pub fn normalised(&self) -> Result<Self> {
        let project = if self.project.is_empty() {
            ProjectWeights::default().to_map()
        } else {
            normalise_map(ProjectWeights::NAME, &self.project)?
        };
        let mentor = if self.mentor.is_empty() {
            MentorWeights::default().to_map()
        } else {
            normalise_map(MentorWeights::NAME, &self.mentor)?
        };
        Ok(Self { project, mentor })
    }
}

impl From<ScoringWeights> for RawWeights {
    fn from(w: ScoringWeights) -> Self {
        Self { project: w.project.to_map(), mentor: w.mentor.to_map() }
    }
}

impl TryFrom<RawWeights> for ScoringWeights {
    type Error = ScoringError;

    fn try_from(raw: RawWeights) -> Result<Self> {
        Ok(Self {
            project: ProjectWeights::from_map(&raw.project)?,
            mentor: MentorWeights::from_map(&raw.mentor)?,
        })
    }
}
