//! One search: fetch postings → rank → filter → respond.
//!
//! Both entry points (typed skills and résumé upload) converge on
//! [`run_search`] once they have a skill set and a location.

pub mod handlers;

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::links::ExternalLinks;
use crate::matching::{filter, ScoringPolicy};
use crate::models::job::MatchResult;
use crate::models::skills::SkillSet;
use crate::state::AppState;

pub use crate::resume::parser::DEFAULT_LOCATION;

/// Per-request knobs after defaults have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub min_score: f64,
    pub keyword: Option<String>,
    pub limit: usize,
}

impl SearchParams {
    /// Fills unset fields from config and rejects nonsensical values.
    pub fn resolve(
        state: &AppState,
        min_score: Option<f64>,
        keyword: Option<String>,
        limit: Option<usize>,
    ) -> Result<Self, AppError> {
        let min_score = min_score.unwrap_or(state.config.default_min_score);
        if !min_score.is_finite() || min_score < 0.0 {
            return Err(AppError::Validation(
                "min_score must be a non-negative number".to_string(),
            ));
        }

        let limit = limit.unwrap_or(state.config.result_limit);
        if limit == 0 {
            return Err(AppError::Validation(
                "limit must be greater than zero".to_string(),
            ));
        }

        let keyword = keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            min_score,
            keyword,
            limit,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub skills: SkillSet,
    pub location: String,
    /// Years of experience detected in a résumé; absent for typed searches.
    pub experience: Option<u32>,
    pub scoring_policy: ScoringPolicy,
    /// Ranked postings before the score and keyword filters.
    pub total_ranked: usize,
    pub results: Vec<MatchResult>,
    pub links: ExternalLinks,
}

pub async fn run_search(
    state: &AppState,
    skills: SkillSet,
    location: String,
    experience: Option<u32>,
    params: SearchParams,
) -> Result<SearchResponse, AppError> {
    let postings = state.job_source.fetch_postings().await;
    let ranked = state.matcher.rank(&skills, &postings, params.limit);
    let total_ranked = ranked.len();
    let results = filter(ranked, params.min_score, params.keyword.as_deref());

    info!(
        "Search [{}] over {} postings: {} ranked, {} after filters",
        skills.joined(),
        postings.len(),
        total_ranked,
        results.len()
    );

    let links = ExternalLinks::build(&skills, &location)?;

    Ok(SearchResponse {
        skills,
        location,
        experience,
        scoring_policy: state.matcher.policy(),
        total_ranked,
        results,
        links,
    })
}
