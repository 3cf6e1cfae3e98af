//! Fixed reference tables consumed by the matcher and the résumé parser.
//!
//! Defaults mirror the built-in tables; a JSON file with the same shape can
//! replace them at startup (`REFERENCE_DATA_PATH`).

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryEntry {
    pub title: String,
    pub base_salary: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Skills detected in résumé text by substring match.
    #[serde(default = "default_skill_vocabulary")]
    pub skill_vocabulary: Vec<String>,
    /// Canonical titles used as salary anchors. Order breaks similarity ties.
    #[serde(default = "default_salary_table")]
    pub salary_table: Vec<SalaryEntry>,
    /// Place names recognised in résumé text, first hit wins.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
    /// Substituted when no skill is detected.
    #[serde(default = "default_skill")]
    pub default_skill: String,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            skill_vocabulary: default_skill_vocabulary(),
            salary_table: default_salary_table(),
            locations: default_locations(),
            default_skill: default_skill(),
        }
    }
}

impl ReferenceData {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference data: {}", path.display()))?;
        let data: ReferenceData =
            serde_json::from_str(&raw).context("Failed to parse reference data")?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.salary_table.is_empty() {
            bail!("salary_table must contain at least one entry");
        }
        if self.default_skill.trim().is_empty() {
            bail!("default_skill must not be empty");
        }
        Ok(())
    }
}

fn default_skill_vocabulary() -> Vec<String> {
    [
        "python",
        "java",
        "javascript",
        "react",
        "django",
        "fastapi",
        "machine learning",
        "data science",
        "sql",
        "mongodb",
        "node",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_salary_table() -> Vec<SalaryEntry> {
    [
        ("junior software engineer", 60_000),
        ("software engineer", 80_000),
        ("senior software engineer", 110_000),
        ("backend developer", 90_000),
        ("full stack developer", 95_000),
        ("machine learning engineer", 120_000),
        ("data scientist", 115_000),
        ("devops engineer", 105_000),
        ("frontend developer", 85_000),
        ("cloud architect", 130_000),
    ]
    .iter()
    .map(|(title, base)| SalaryEntry {
        title: title.to_string(),
        base_salary: *base,
    })
    .collect()
}

fn default_locations() -> Vec<String> {
    [
        "united states",
        "united kingdom",
        "canada",
        "germany",
        "france",
        "netherlands",
        "india",
        "australia",
        "brazil",
        "new york",
        "san francisco",
        "london",
        "berlin",
        "toronto",
        "bangalore",
        "remote",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_skill() -> String {
    "developer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_salary_table_starts_with_lowest_entry() {
        let data = ReferenceData::default();
        let min = data.salary_table.iter().map(|e| e.base_salary).min();
        assert_eq!(Some(data.salary_table[0].base_salary), min);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let data: ReferenceData =
            serde_json::from_str(r#"{"skill_vocabulary": ["rust", "go"]}"#).unwrap();
        assert_eq!(data.skill_vocabulary, vec!["rust", "go"]);
        assert_eq!(data.salary_table.len(), 10);
        assert_eq!(data.default_skill, "developer");
    }

    #[test]
    fn test_empty_salary_table_is_rejected() {
        let data = ReferenceData {
            salary_table: vec![],
            ..ReferenceData::default()
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = ReferenceData::load(Path::new("/nonexistent/reference.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read reference data"));
    }
}
