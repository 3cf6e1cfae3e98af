//! Résumé text → skills, years of experience, location.
//!
//! Detection is deliberately shallow: vocabulary substring hits for skills,
//! the first `<number> year(s)` phrase for experience, and the first
//! gazetteer hit (whole words) for location.

use serde::Serialize;

use crate::matching::reference::ReferenceData;
use crate::models::skills::SkillSet;

pub const DEFAULT_LOCATION: &str = "Anywhere";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeProfile {
    /// May be empty; the search pipeline substitutes the default skill.
    pub skills: SkillSet,
    pub experience_years: Option<u32>,
    pub location: String,
}

pub fn parse_resume_text(text: &str, reference: &ReferenceData) -> ResumeProfile {
    let text = text.to_lowercase();
    ResumeProfile {
        skills: detect_skills(&text, &reference.skill_vocabulary),
        experience_years: detect_experience_years(&text),
        location: detect_location(&text, &reference.locations)
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
    }
}

/// Vocabulary entries occurring anywhere in `text`, in vocabulary order.
fn detect_skills(text: &str, vocabulary: &[String]) -> SkillSet {
    SkillSet::new(
        vocabulary
            .iter()
            .filter(|skill| text.contains(skill.to_lowercase().as_str())),
    )
}

/// First `<digits><whitespace+>year` phrase ("5 years", "1 year"). `None`
/// when that first phrase does not fit a `u32`.
fn detect_experience_years(text: &str) -> Option<u32> {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let digits: String = chars[start..i].iter().collect();

        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        let followed_by_year = j > i
            && chars[j..]
                .iter()
                .take(4)
                .copied()
                .eq("year".chars());

        if followed_by_year {
            return digits.parse::<u32>().ok();
        }
    }
    None
}

/// First gazetteer entry found in `text` on word boundaries.
fn detect_location(text: &str, locations: &[String]) -> Option<String> {
    let mut best: Option<(usize, &String)> = None;
    for location in locations {
        let needle = location.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = find_whole_word(text, &needle) {
            if best.map_or(true, |(p, _)| pos < p) {
                best = Some((pos, location));
            }
        }
    }
    best.map(|(_, loc)| title_case(loc))
}

fn find_whole_word(haystack: &str, needle: &str) -> Option<usize> {
    let is_word = |c: Option<char>| c.map_or(false, |c| c.is_alphanumeric());
    haystack.match_indices(needle).find_map(|(pos, m)| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + m.len()..].chars().next();
        (!is_word(before) && !is_word(after)).then_some(pos)
    })
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe, Berlin, Germany\n\
        Senior engineer with 7 years of experience in Python and React.\n\
        Built Django services backed by PostgreSQL; 2 years leading a team.";

    #[test]
    fn test_detects_vocabulary_skills_in_vocabulary_order() {
        let profile = parse_resume_text(RESUME, &ReferenceData::default());
        assert_eq!(
            profile.skills.as_slice(),
            ["python", "react", "django", "sql"]
        );
    }

    #[test]
    fn test_first_experience_phrase_wins() {
        let profile = parse_resume_text(RESUME, &ReferenceData::default());
        assert_eq!(profile.experience_years, Some(7));
    }

    #[test]
    fn test_experience_requires_whitespace_before_year() {
        assert_eq!(detect_experience_years("10years here, then 3 year stint"), Some(3));
        assert_eq!(detect_experience_years("no numbers"), None);
        assert_eq!(detect_experience_years("class of 2019"), None);
    }

    #[test]
    fn test_overflowing_first_phrase_is_not_skipped() {
        assert_eq!(detect_experience_years("99999999999 years then 3 years"), None);
        assert_eq!(detect_experience_years("4294967295 years"), Some(u32::MAX));
    }

    #[test]
    fn test_experience_accepts_multiple_spaces_and_newlines() {
        assert_eq!(detect_experience_years("12 \n years"), Some(12));
    }

    #[test]
    fn test_location_is_earliest_whole_word_hit() {
        let profile = parse_resume_text(RESUME, &ReferenceData::default());
        assert_eq!(profile.location, "Berlin");
    }

    #[test]
    fn test_location_ignores_partial_words() {
        let locations = vec!["india".to_string()];
        assert_eq!(detect_location("indiana university", &locations), None);
        assert_eq!(
            detect_location("based in india.", &locations),
            Some("India".to_string())
        );
    }

    #[test]
    fn test_defaults_when_nothing_detected() {
        let profile = parse_resume_text("", &ReferenceData::default());
        assert!(profile.skills.is_empty());
        assert_eq!(profile.experience_years, None);
        assert_eq!(profile.location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_custom_vocabulary_is_used() {
        let reference = ReferenceData {
            skill_vocabulary: vec!["rust".to_string(), "kubernetes".to_string()],
            ..ReferenceData::default()
        };
        let profile = parse_resume_text("Rust and Kubernetes on AWS", &reference);
        assert_eq!(profile.skills.as_slice(), ["rust", "kubernetes"]);
    }
}
