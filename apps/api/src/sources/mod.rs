//! Where job postings come from.
//!
//! A `JobSource` never fails: transport and decoding problems are logged and
//! surface as an empty list, so a search with no postings is still a valid
//! (empty) search.

pub mod cache;
pub mod remotive;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::JobPosting;

pub use cache::CachedJobSource;
pub use remotive::RemotiveSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job API returned status {0}")]
    Status(u16),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_postings(&self) -> Vec<JobPosting>;
}
