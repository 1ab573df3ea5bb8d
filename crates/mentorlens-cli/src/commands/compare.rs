use mentorlens_catalog::{Catalog, Selection};
use mentorlens_db::ItemKind;
use tracing::debug;

use super::print_json;
use crate::cli::CompareAction;

pub async fn run(catalog: &Catalog, action: CompareAction) -> anyhow::Result<()> {
    let comparisons = catalog.comparisons();
    match action {
        CompareAction::List => print_json(&comparisons.list().await?),
        CompareAction::Show { id } => print_json(&comparisons.get(&id).await?),
        CompareAction::Create { name, projects, mentors } => {
            let mut selection = Selection::new();
            let requested = projects
                .iter()
                .map(|id| (ItemKind::Project, id))
                .chain(mentors.iter().map(|id| (ItemKind::Mentor, id)));
            for (kind, id) in requested {
                if !catalog.select(&mut selection, kind, id).await? {
                    debug!(kind = kind.as_str(), id = %id, "Already selected, skipping");
                }
            }
            print_json(&comparisons.create(&name, &selection).await?)
        }
        CompareAction::Rename { id, name } => print_json(&comparisons.rename(&id, &name).await?),
        CompareAction::Delete { id } => {
            let removed = comparisons.delete(&id).await?;
            print_json(&serde_json::json!({ "id": id, "removed": removed }))
        }
    }
}
