//! Salary heuristic: nearest canonical title by TF-IDF similarity, widened
//! to a ±15% band.
//!
//! This is informational only. The figures come from a fixed table and say
//! nothing about real compensation for a given posting.

use serde::Serialize;

use super::reference::SalaryEntry;
use super::tfidf::TfidfSpace;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryEstimate {
    pub canonical_title: String,
    pub base_salary: u32,
    pub low: u32,
    pub high: u32,
}

impl SalaryEstimate {
    fn from_entry(entry: &SalaryEntry) -> Self {
        let base = u64::from(entry.base_salary);
        Self {
            canonical_title: entry.title.clone(),
            base_salary: entry.base_salary,
            low: (base * 85 / 100) as u32,
            high: (base * 115 / 100) as u32,
        }
    }

    /// `"$68k – $92k"`, thousands floored.
    pub fn label(&self) -> String {
        format!("${}k – ${}k", self.low / 1000, self.high / 1000)
    }
}

#[derive(Debug, Clone)]
pub struct SalaryEstimator {
    table: Vec<SalaryEntry>,
}

impl SalaryEstimator {
    /// `table` must be non-empty; `ReferenceData::validate` enforces this at startup.
    pub fn new(table: Vec<SalaryEntry>) -> Self {
        Self { table }
    }

    /// Picks the canonical title most similar to `job_title`.
    ///
    /// Ties (including "no overlap at all", e.g. an empty title) resolve to
    /// the earliest table entry. Returns `None` only for an empty table.
    pub fn estimate(&self, job_title: &str) -> Option<SalaryEstimate> {
        let first = self.table.first()?;

        let mut corpus: Vec<&str> = Vec::with_capacity(self.table.len() + 1);
        corpus.push(job_title);
        corpus.extend(self.table.iter().map(|e| e.title.as_str()));
        let space = TfidfSpace::fit(&corpus);

        let mut best = first;
        let mut best_score = f64::NEG_INFINITY;
        for (entry, score) in self.table.iter().zip(space.similarities_to(0)) {
            if score > best_score {
                best = entry;
                best_score = score;
            }
        }

        Some(SalaryEstimate::from_entry(best))
    }

    pub fn estimate_label(&self, job_title: &str) -> String {
        label_or_unavailable(self.estimate(job_title).as_ref())
    }
}

/// The estimate's label, or `"Not available"` when there is no anchor.
pub fn label_or_unavailable(estimate: Option<&SalaryEstimate>) -> String {
    estimate
        .map(SalaryEstimate::label)
        .unwrap_or_else(|| "Not available".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::reference::ReferenceData;

    fn estimator() -> SalaryEstimator {
        SalaryEstimator::new(ReferenceData::default().salary_table)
    }

    #[test]
    fn test_exact_title_maps_to_its_base() {
        let est = estimator().estimate("Software Engineer").unwrap();
        assert_eq!(est.canonical_title, "software engineer");
        assert_eq!(est.base_salary, 80_000);
        assert_eq!(est.label(), "$68k – $92k");
    }

    #[test]
    fn test_label_matches_estimate() {
        assert_eq!(estimator().estimate_label("Software Engineer"), "$68k – $92k");
    }

    #[test]
    fn test_closest_title_wins() {
        let est = estimator().estimate("Senior Data Scientist (Remote)").unwrap();
        assert_eq!(est.canonical_title, "data scientist");
        assert_eq!(est.label(), "$97k – $132k");
    }

    #[test]
    fn test_empty_title_falls_back_to_first_entry() {
        let est = estimator().estimate("").unwrap();
        assert_eq!(est.canonical_title, "junior software engineer");
        assert_eq!(est.label(), "$51k – $69k");
    }

    #[test]
    fn test_unrelated_title_falls_back_to_first_entry() {
        let est = estimator().estimate("Pastry Chef").unwrap();
        assert_eq!(est.base_salary, 60_000);
    }

    #[test]
    fn test_empty_table_yields_placeholder_label() {
        let est = SalaryEstimator::new(vec![]);
        assert!(est.estimate("anything").is_none());
        assert_eq!(est.estimate_label("anything"), "Not available");
    }
}
