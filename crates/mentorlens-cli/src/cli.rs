//! Command-line definitions.

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use mentorlens_catalog::{MentorSortKey, ProjectSortKey, SortOrder};
use mentorlens_common::{Difficulty, ProjectStatus};

#[derive(Parser)]
#[command(name = "mentorlens")]
#[command(about = "Score, search and compare research projects and mentors")]
#[command(version)]
pub struct Cli {
    /// Config file (default: $MENTORLENS_CONFIG or ./mentorlens.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset path or http(s) URL, overriding the config file
    #[arg(long, global = true)]
    pub dataset: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print computed scores
    Scores {
        #[command(subcommand)]
        target: ScoreTarget,
    },

    /// Filter, sort and paginate entities
    Search {
        #[command(subcommand)]
        target: SearchTarget,
    },

    /// Show or change scoring weights
    Weights {
        #[command(subcommand)]
        action: WeightsAction,
    },

    /// Manage saved comparisons
    Compare {
        #[command(subcommand)]
        action: CompareAction,
    },

    /// Manage favorite entity ids
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Write all stored state as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Overwrite stored state from an export file
    Import {
        #[arg(index = 1)]
        file: PathBuf,
    },

    /// Dataset statistics
    Stats,

    /// Storage usage against the nominal quota
    Usage,
}

#[derive(Subcommand)]
pub enum ScoreTarget {
    Projects {
        /// Recompute instead of reading the cache
        #[arg(long)]
        recalculate: bool,
    },
    Mentors {
        #[arg(long)]
        recalculate: bool,
    },
}

#[derive(clap::Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Results per page (default: display.items_per_page)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand)]
pub enum SearchTarget {
    Projects {
        #[arg(long)]
        text: Option<String>,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long = "difficulty", value_parser = parse_variant::<Difficulty>)]
        difficulties: Vec<Difficulty>,
        #[arg(long = "status", value_parser = parse_variant::<ProjectStatus>)]
        statuses: Vec<ProjectStatus>,
        #[arg(long = "mentor")]
        mentor_ids: Vec<String>,
        #[arg(long, default_value_t = 0.0)]
        min_score: f64,
        #[arg(long, default_value_t = 5.0)]
        max_score: f64,
        #[arg(long, value_parser = parse_variant::<ProjectSortKey>, default_value = "score")]
        sort: ProjectSortKey,
        #[arg(long, value_parser = parse_variant::<SortOrder>, default_value = "desc")]
        order: SortOrder,
        #[command(flatten)]
        page: PageArgs,
    },
    Mentors {
        #[arg(long)]
        text: Option<String>,
        #[arg(long = "department")]
        departments: Vec<String>,
        #[arg(long = "field")]
        research_fields: Vec<String>,
        #[arg(long)]
        available: Option<bool>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        min_score: f64,
        #[arg(long, default_value_t = 5.0)]
        max_score: f64,
        #[arg(long, value_parser = parse_variant::<MentorSortKey>, default_value = "score")]
        sort: MentorSortKey,
        #[arg(long, value_parser = parse_variant::<SortOrder>, default_value = "desc")]
        order: SortOrder,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand)]
pub enum WeightsAction {
    Show,
    /// Override individual dimensions, e.g. `--project technical=0.4`
    Set {
        #[arg(long = "project", value_parser = parse_assignment)]
        project: Vec<(String, f64)>,
        #[arg(long = "mentor", value_parser = parse_assignment)]
        mentor: Vec<(String, f64)>,
        /// Scale each vector to sum to 1 instead of rejecting it
        #[arg(long, alias = "normalize")]
        normalise: bool,
    },
    /// Restore the default weights
    Reset,
}

#[derive(Subcommand)]
pub enum CompareAction {
    List,
    Show {
        id: String,
    },
    Create {
        name: String,
        #[arg(long = "project")]
        projects: Vec<String>,
        #[arg(long = "mentor")]
        mentors: Vec<String>,
    },
    Rename {
        id: String,
        name: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    List,
    Add { id: String },
    Remove { id: String },
}

/// Parse a lowercase enum variant through its serde name.
pub fn parse_variant<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_lowercase()))
        .map_err(|_| format!("unknown value `{s}`"))
}

/// `name=value` with a numeric value.
pub fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    Ok((name.trim().to_string(), value))
}
