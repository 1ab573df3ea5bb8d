use mentorlens_catalog::{Catalog, MentorQuery, Pagination, ProjectQuery, ScoreRange};

use super::print_json;
use crate::cli::{PageArgs, SearchTarget};
use crate::config::Config;

fn pagination(args: &PageArgs, config: &Config) -> Pagination {
    Pagination {
        page: args.page,
        page_size: args.page_size.unwrap_or(config.display.items_per_page),
    }
}

pub async fn run(catalog: &Catalog, config: &Config, target: SearchTarget) -> anyhow::Result<()> {
    match target {
        SearchTarget::Projects {
            text,
            categories,
            difficulties,
            statuses,
            mentor_ids,
            min_score,
            max_score,
            sort,
            order,
            page,
        } => {
            let query = ProjectQuery {
                text,
                categories,
                difficulties,
                statuses,
                mentor_ids,
                score: ScoreRange { min: min_score, max: max_score },
                sort_by: sort,
                order,
            };
            let results = catalog.search_projects(&query, pagination(&page, config)).await?;
            print_json(&results)
        }
        SearchTarget::Mentors {
            text,
            departments,
            research_fields,
            available,
            min_rating,
            min_score,
            max_score,
            sort,
            order,
            page,
        } => {
            let query = MentorQuery {
                text,
                departments,
                research_fields,
                available,
                min_rating,
                score: ScoreRange { min: min_score, max: max_score },
                sort_by: sort,
                order,
            };
            let results = catalog.search_mentors(&query, pagination(&page, config)).await?;
            print_json(&results)
        }
    }
}
