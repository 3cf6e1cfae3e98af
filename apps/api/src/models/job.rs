use serde::{Deserialize, Serialize};

/// A single job listing as received from the job source.
///
/// `url` doubles as the identifier; postings carry no other identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
}

impl JobPosting {
    /// Text the scorers match against: title followed by description.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A ranked posting. Produced fresh per search and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    /// Keyword-overlap count or TF-IDF cosine, depending on the scoring policy.
    pub score: f64,
    /// Heuristic range label such as `"$68k – $92k"`.
    pub estimated_salary: String,
}
