//! Job Matcher: ranks postings against a skill set, filters ranked results,
//! and attaches the salary heuristic.
//!
//! Stateless between calls: every `rank` rebuilds its scores from scratch.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::salary::{SalaryEstimate, SalaryEstimator};
use super::scorer::{PostingScorer, ScoringPolicy};
use crate::models::job::{JobPosting, MatchResult};
use crate::models::skills::SkillSet;

pub const DEFAULT_RESULT_LIMIT: usize = 30;

#[derive(Clone)]
pub struct JobMatcher {
    scorer: Arc<dyn PostingScorer>,
    salary: SalaryEstimator,
}

impl JobMatcher {
    pub fn new(scorer: Arc<dyn PostingScorer>, salary: SalaryEstimator) -> Self {
        Self { scorer, salary }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.scorer.policy()
    }

    /// Scores every posting, sorts descending by score (stable, so ties keep
    /// input order) and keeps the first `limit`.
    ///
    /// Zero-score postings are kept; thresholds belong to [`filter`].
    /// An empty `skills` set is scored as-is; callers substitute defaults.
    pub fn rank(
        &self,
        skills: &SkillSet,
        postings: &[JobPosting],
        limit: usize,
    ) -> Vec<MatchResult> {
        if postings.is_empty() {
            return Vec::new();
        }

        let scores = self.scorer.score(skills, postings);
        let mut scored: Vec<(&JobPosting, f64)> = postings.iter().zip(scores).collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        debug!(
            "Ranked {} postings with {} scorer, kept {}",
            postings.len(),
            self.scorer.policy(),
            scored.len()
        );

        scored
            .into_iter()
            .map(|(posting, score)| MatchResult {
                title: posting.title.clone(),
                company: posting.company.clone(),
                location: posting.location.clone(),
                url: posting.url.clone(),
                score,
                estimated_salary: self.estimate_salary(&posting.title),
            })
            .collect()
    }

    pub fn estimate_salary(&self, job_title: &str) -> String {
        self.salary.estimate_label(job_title)
    }

    pub fn salary_estimate(&self, job_title: &str) -> Option<SalaryEstimate> {
        self.salary.estimate(job_title)
    }
}

/// Drops results scoring strictly below `min_score`, then (when `keyword` is
/// non-blank) results whose title lacks it case-insensitively. Order is kept.
pub fn filter(results: Vec<MatchResult>, min_score: f64, keyword: Option<&str>) -> Vec<MatchResult> {
    let needle = keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase);

    results
        .into_iter()
        .filter(|r| r.score >= min_score)
        .filter(|r| match &needle {
            Some(k) => r.title.to_lowercase().contains(k.as_str()),
            None => true,
        })
        .collect()
}
