use std::sync::Arc;
use std::time::Duration;

use crate::bookmarks::BookmarkStore;
use crate::config::Config;
use crate::matching::{scorer_for, JobMatcher, ReferenceData, SalaryEstimator};
use crate::sources::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub matcher: Arc<JobMatcher>,
    /// Usually a `CachedJobSource` over Remotive; tests inject fakes.
    pub job_source: Arc<dyn JobSource>,
    pub bookmarks: Arc<BookmarkStore>,
    /// Skill vocabulary, salary anchors and gazetteer used by the résumé parser.
    pub reference: Arc<ReferenceData>,
}

impl AppState {
    pub fn new(config: Config, reference: ReferenceData, job_source: Arc<dyn JobSource>) -> Self {
        let matcher = JobMatcher::new(
            Arc::from(scorer_for(config.scoring_policy)),
            SalaryEstimator::new(reference.salary_table.clone()),
        );
        let bookmarks = BookmarkStore::new(Duration::from_secs(config.session_ttl_secs));
        Self {
            config,
            matcher: Arc::new(matcher),
            job_source,
            bookmarks: Arc::new(bookmarks),
            reference: Arc::new(reference),
        }
    }
}
