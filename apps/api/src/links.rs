use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use crate::models::skills::SkillSet;

const LINKEDIN_SEARCH: &str = "https://www.linkedin.com/jobs/search/";
const INDEED_SEARCH: &str = "https://www.indeed.com/jobs";

/// Search URLs on external job boards for the same skills and location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalLinks {
    pub linkedin: String,
    pub indeed: String,
}

impl ExternalLinks {
    pub fn build(skills: &SkillSet, location: &str) -> Result<Self> {
        let query = skills.joined();
        let linkedin = search_url(
            LINKEDIN_SEARCH,
            &[("keywords", query.as_str()), ("location", location)],
        )
        .context("Failed to build LinkedIn search URL")?;
        let indeed = search_url(INDEED_SEARCH, &[("q", query.as_str()), ("l", location)])
            .context("Failed to build Indeed search URL")?;

        Ok(Self { linkedin, indeed })
    }
}

/// Percent-encodes `params` onto `base`, with spaces as `%20`.
fn search_url(base: &str, params: &[(&str, &str)]) -> Result<String> {
    let mut url = Url::parse_with_params(base, params)?;
    // Form encoding writes spaces as `+`; a literal plus is already `%2B`.
    let query = url.query().map(|q| q.replace('+', "%20"));
    url.set_query(query.as_deref());
    Ok(url.into())
}
