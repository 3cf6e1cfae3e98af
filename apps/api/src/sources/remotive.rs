use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{JobSource, SourceError};
use crate::models::job::JobPosting;

pub const DEFAULT_JOB_SOURCE_URL: &str = "https://remotive.com/api/remote-jobs";

#[derive(Debug, Deserialize)]
struct RemotivePayload {
    #[serde(default)]
    jobs: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    title: Option<String>,
    company_name: Option<String>,
    candidate_required_location: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

impl From<RemotiveJob> for JobPosting {
    fn from(job: RemotiveJob) -> Self {
        JobPosting {
            title: job.title.unwrap_or_else(|| "N/A".to_string()),
            company: job.company_name.unwrap_or_else(|| "N/A".to_string()),
            location: job
                .candidate_required_location
                .unwrap_or_else(|| "Remote".to_string()),
            description: job.description.unwrap_or_default(),
            url: job.url.unwrap_or_else(|| "#".to_string()),
        }
    }
}

/// Fetches remote postings from the Remotive public API.
#[derive(Clone)]
pub struct RemotiveSource {
    client: Client,
    url: String,
}

impl RemotiveSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn try_fetch(&self) -> Result<Vec<JobPosting>, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_payload(&body)
    }
}

/// Decodes a `{"jobs": [...]}` payload. Entries that are not objects of the
/// expected shape are skipped; null or missing fields get placeholders.
pub fn parse_payload(body: &str) -> Result<Vec<JobPosting>, SourceError> {
    let payload: RemotivePayload = serde_json::from_str(body)?;
    let total = payload.jobs.len();

    let postings: Vec<JobPosting> = payload
        .jobs
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<RemotiveJob>(raw) {
            Ok(job) => Some(JobPosting::from(job)),
            Err(e) => {
                debug!("Skipping malformed job entry: {e}");
                None
            }
        })
        .collect();

    if postings.len() < total {
        warn!("Skipped {} malformed job entries", total - postings.len());
    }
    Ok(postings)
}

#[async_trait]
impl JobSource for RemotiveSource {
    async fn fetch_postings(&self) -> Vec<JobPosting> {
        match self.try_fetch().await {
            Ok(postings) => {
                info!("Fetched {} postings from {}", postings.len(), self.url);
                postings
            }
            Err(e) => {
                warn!("Job fetch from {} failed: {e}", self.url);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload_maps_fields() {
        let body = r#"{"jobs":[{
            "title":"Rust Engineer",
            "company_name":"Ferrous",
            "candidate_required_location":"Europe",
            "description":"<p>async rust</p>",
            "url":"https://remotive.com/job/1",
            "salary":""
        }]}"#;
        let postings = parse_payload(body).unwrap();
        assert_eq!(
            postings,
            vec![JobPosting {
                title: "Rust Engineer".into(),
                company: "Ferrous".into(),
                location: "Europe".into(),
                description: "<p>async rust</p>".into(),
                url: "https://remotive.com/job/1".into(),
            }]
        );
    }

    #[test]
    fn test_parse_payload_fills_placeholders_for_missing_and_null() {
        let body = r#"{"jobs":[{"title":null,"url":null}]}"#;
        let postings = parse_payload(body).unwrap();
        assert_eq!(postings.len(), 1);
        let p = &postings[0];
        assert_eq!(p.title, "N/A");
        assert_eq!(p.company, "N/A");
        assert_eq!(p.location, "Remote");
        assert_eq!(p.description, "");
        assert_eq!(p.url, "#");
    }

    #[test]
    fn test_parse_payload_skips_malformed_entries() {
        let body = r#"{"jobs":[42, {"title": 7}, {"title":"Ok"}]}"#;
        let postings = parse_payload(body).unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Ok");
    }

    #[test]
    fn test_parse_payload_missing_jobs_key_is_empty() {
        assert!(parse_payload(r#"{"job-count":0}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_payload_rejects_invalid_json() {
        assert!(matches!(
            parse_payload("<html>"),
            Err(SourceError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades_to_empty() {
        let source =
            RemotiveSource::new("http://127.0.0.1:9/api", Duration::from_millis(200)).unwrap();
        assert!(source.fetch_postings().await.is_empty());
    }
}
