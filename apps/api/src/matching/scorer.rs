//! Posting scorers: pluggable, trait-based strategies that measure a skill
//! set against a batch of postings.
//!
//! Two policies exist and their scores are not interchangeable:
//! - `KeywordOverlapScorer`: integer count of skills found as substrings.
//! - `TfidfScorer`: cosine similarity in `[0, 1]`, rounded to 2 decimals.
//!
//! `JobMatcher` holds an `Arc<dyn PostingScorer>` chosen at startup via config.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::tfidf::TfidfSpace;
use crate::models::job::JobPosting;
use crate::models::skills::SkillSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    Keyword,
    Tfidf,
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPolicy::Keyword => write!(f, "keyword"),
            ScoringPolicy::Tfidf => write!(f, "tfidf"),
        }
    }
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(ScoringPolicy::Keyword),
            "tfidf" => Ok(ScoringPolicy::Tfidf),
            other => Err(format!(
                "unknown scoring policy '{other}' (expected keyword or tfidf)"
            )),
        }
    }
}

/// Implement this to swap scoring backends without touching the matcher,
/// the handlers, or the filter logic.
pub trait PostingScorer: Send + Sync {
    fn policy(&self) -> ScoringPolicy;

    /// One score per posting, in input order.
    fn score(&self, skills: &SkillSet, postings: &[JobPosting]) -> Vec<f64>;
}

/// Builds the scorer for a configured policy.
pub fn scorer_for(policy: ScoringPolicy) -> Box<dyn PostingScorer> {
    match policy {
        ScoringPolicy::Keyword => Box::new(KeywordOverlapScorer),
        ScoringPolicy::Tfidf => Box::new(TfidfScorer),
    }
}

/// Counts how many skills occur as substrings of the lowercased
/// title + description. No normalization.
pub struct KeywordOverlapScorer;

impl PostingScorer for KeywordOverlapScorer {
    fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::Keyword
    }

    fn score(&self, skills: &SkillSet, postings: &[JobPosting]) -> Vec<f64> {
        postings
            .iter()
            .map(|posting| {
                let text = posting.match_text().to_lowercase();
                skills.iter().filter(|s| text.contains(s)).count() as f64
            })
            .collect()
    }
}

/// Cosine similarity between the space-joined skills and each posting,
/// over a TF-IDF space fitted to `{skills, posting_1, .., posting_n}`.
pub struct TfidfScorer;

impl PostingScorer for TfidfScorer {
    fn policy(&self) -> ScoringPolicy {
        ScoringPolicy::Tfidf
    }

    fn score(&self, skills: &SkillSet, postings: &[JobPosting]) -> Vec<f64> {
        if postings.is_empty() {
            return Vec::new();
        }

        let mut corpus: Vec<String> = Vec::with_capacity(postings.len() + 1);
        corpus.push(skills.joined());
        corpus.extend(postings.iter().map(JobPosting::match_text));

        let space = TfidfSpace::fit(&corpus);
        space
            .similarities_to(0)
            .into_iter()
            .map(round_to_hundredths)
            .collect()
    }
}

fn round_to_hundredths(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, description: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: description.to_string(),
            url: format!("https://jobs.example.com/{}", title.replace(' ', "-")),
        }
    }

    #[test]
    fn test_policy_parses_case_insensitively() {
        assert_eq!("TFIDF".parse::<ScoringPolicy>(), Ok(ScoringPolicy::Tfidf));
        assert_eq!(" keyword ".parse::<ScoringPolicy>(), Ok(ScoringPolicy::Keyword));
        assert!("bm25".parse::<ScoringPolicy>().is_err());
    }

    #[test]
    fn test_scorer_for_returns_matching_policy() {
        assert_eq!(scorer_for(ScoringPolicy::Keyword).policy(), ScoringPolicy::Keyword);
        assert_eq!(scorer_for(ScoringPolicy::Tfidf).policy(), ScoringPolicy::Tfidf);
    }

    #[test]
    fn test_keyword_counts_substring_hits() {
        let skills = SkillSet::from_csv("python,react,sql");
        let postings = vec![
            posting("Python Developer", "React experience needed"),
            posting("Chef", "cooking"),
            posting("Data Engineer", "PostgreSQL and python"),
        ];
        let scores = KeywordOverlapScorer.score(&skills, &postings);
        assert_eq!(scores, vec![2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_keyword_multiword_skill_matches_phrase() {
        let skills = SkillSet::from_csv("machine learning");
        let postings = vec![posting("ML Engineer", "Applied Machine Learning team")];
        assert_eq!(KeywordOverlapScorer.score(&skills, &postings), vec![1.0]);
    }

    #[test]
    fn test_tfidf_scores_are_unit_interval_and_rounded() {
        let skills = SkillSet::from_csv("python,react");
        let postings = vec![
            posting("Python Developer", "react experience needed"),
            posting("Chef", "cooking"),
            posting("Frontend Engineer", "react typescript css"),
        ];
        let scores = TfidfScorer.score(&skills, &postings);
        assert_eq!(scores.len(), 3);
        for s in &scores {
            assert!((0.0..=1.0).contains(s), "score out of range: {s}");
            assert!(((s * 100.0).round() - s * 100.0).abs() < 1e-9);
        }
        assert!(scores[0] > scores[1]);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_tfidf_empty_postings() {
        let skills = SkillSet::from_csv("python");
        assert!(TfidfScorer.score(&skills, &[]).is_empty());
    }

    #[test]
    fn test_tfidf_empty_skills_scores_zero() {
        let postings = vec![posting("Python Developer", "django")];
        assert_eq!(TfidfScorer.score(&SkillSet::default(), &postings), vec![0.0]);
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_eq!(round_to_hundredths(0.456), 0.46);
        assert_eq!(round_to_hundredths(0.0), 0.0);
        assert_eq!(round_to_hundredths(1.0), 1.0);
    }

    #[test]
    fn test_policy_serializes_as_config_name() {
        for policy in [ScoringPolicy::Keyword, ScoringPolicy::Tfidf] {
            let json = serde_json::to_value(policy).unwrap();
            assert_eq!(json, policy.to_string());
            assert_eq!(policy.to_string().parse::<ScoringPolicy>(), Ok(policy));
        }
    }
}
