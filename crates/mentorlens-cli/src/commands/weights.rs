use anyhow::bail;
use mentorlens_catalog::Catalog;
use mentorlens_ranker::{RawWeights, ScoringWeights};
use tracing::info;

use super::print_json;
use crate::cli::WeightsAction;

/// Apply `name=value` overrides on top of `current`.
///
/// Vectors that no longer sum to 1 are rejected unless `normalise` is set.
pub fn apply_overrides(
    current: ScoringWeights,
    project: &[(String, f64)],
    mentor: &[(String, f64)],
    normalise: bool,
) -> anyhow::Result<ScoringWeights> {
    let mut raw = RawWeights::from(current);
    raw.project.extend(project.iter().cloned());
    raw.mentor.extend(mentor.iter().cloned());

    let raw = if raw.validate() {
        raw
    } else if normalise {
        raw.normalised()?
    } else {
        bail!("each weight vector must sum to 1.0 (±0.01); pass --normalise to rescale");
    };
    Ok(ScoringWeights::try_from(raw)?)
}

pub async fn run(catalog: &Catalog, action: WeightsAction) -> anyhow::Result<()> {
    match action {
        WeightsAction::Show => print_json(&catalog.weights().await?),
        WeightsAction::Set { project, mentor, normalise } => {
            let current = catalog.weights().await?;
            let weights = apply_overrides(current, &project, &mentor, normalise)?;
            let scores = catalog.set_weights(&weights).await?;
            info!(
                projects = scores.projects.len(),
                mentors = scores.mentors.len(),
                "Weights updated"
            );
            print_json(&catalog.weights().await?)
        }
        WeightsAction::Reset => {
            catalog.set_weights(&ScoringWeights::default()).await?;
            print_json(&catalog.weights().await?)
        }
    }
}
