use serde::Serialize;

/// Ordered list of normalized (lowercase, trimmed) skill tokens for one search.
///
/// Order is preserved from the input; duplicates are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    /// Builds a skill set from any iterator of raw skill strings.
    /// Blank entries are skipped.
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for raw in skills {
            let skill = raw.as_ref().trim().to_lowercase();
            if !skill.is_empty() && !out.contains(&skill) {
                out.push(skill);
            }
        }
        Self(out)
    }

    /// Parses comma-separated user input, e.g. `"Python, React ,, SQL"`.
    pub fn from_csv(input: &str) -> Self {
        Self::new(input.split(','))
    }

    /// Substitutes a single-element set when this one is empty.
    pub fn or_default(self, default_skill: &str) -> Self {
        if self.is_empty() {
            Self::new([default_skill])
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Space-joined form used for the TF-IDF query document and outbound links.
    pub fn joined(&self) -> String {
        self.0.join(" ")
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
