use mentorlens_catalog::Catalog;

use super::print_json;
use crate::cli::ScoreTarget;

pub async fn run(catalog: &Catalog, target: ScoreTarget) -> anyhow::Result<()> {
    match target {
        ScoreTarget::Projects { recalculate: true } => {
            print_json(&*catalog.scores().recalculate_scores().await?.projects)
        }
        ScoreTarget::Projects { recalculate: false } => {
            print_json(&*catalog.scores().get_project_scores().await?)
        }
        ScoreTarget::Mentors { recalculate: true } => {
            print_json(&*catalog.scores().recalculate_scores().await?.mentors)
        }
        ScoreTarget::Mentors { recalculate: false } => {
            print_json(&*catalog.scores().get_mentor_scores().await?)
        }
    }
}
