//! Time-boxed memoization of the raw postings list.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::JobSource;
use crate::models::job::JobPosting;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

struct CacheEntry {
    postings: Vec<JobPosting>,
    fetched_at: Instant,
}

/// Wraps a `JobSource` and serves its last non-empty result until it is
/// `ttl` old. The lock is held across the refill so concurrent searches on a
/// cold cache trigger one upstream fetch.
pub struct CachedJobSource {
    inner: Arc<dyn JobSource>,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl CachedJobSource {
    pub fn new(inner: Arc<dyn JobSource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: Mutex::new(None),
        }
    }
}

#[async_trait]
impl JobSource for CachedJobSource {
    async fn fetch_postings(&self) -> Vec<JobPosting> {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                debug!("Serving {} cached postings", cached.postings.len());
                return cached.postings.clone();
            }
        }

        let postings = self.inner.fetch_postings().await;
        if postings.is_empty() {
            // Keep failing fetches retryable on the next search.
            *entry = None;
        } else {
            *entry = Some(CacheEntry {
                postings: postings.clone(),
                fetched_at: Instant::now(),
            });
        }
        postings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        empty: bool,
    }

    impl CountingSource {
        fn new(empty: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                empty,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobSource for CountingSource {
        async fn fetch_postings(&self) -> Vec<JobPosting> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.empty {
                return Vec::new();
            }
            vec![JobPosting {
                title: format!("Job {n}"),
                company: "Acme".into(),
                location: "Remote".into(),
                description: String::new(),
                url: format!("https://example.com/{n}"),
            }]
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_serves_cached_postings_within_ttl() {
        let inner = CountingSource::new(false);
        let cache = CachedJobSource::new(inner.clone(), DEFAULT_CACHE_TTL);

        let first = cache.fetch_postings().await;
        tokio::time::advance(Duration::from_secs(599)).await;
        let second = cache.fetch_postings().await;

        assert_eq!(first, second);
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetches_after_ttl() {
        let inner = CountingSource::new(false);
        let cache = CachedJobSource::new(inner.clone(), DEFAULT_CACHE_TTL);

        let first = cache.fetch_postings().await;
        tokio::time::advance(Duration::from_secs(600)).await;
        let second = cache.fetch_postings().await;

        assert_eq!(inner.calls(), 2);
        assert_ne!(first[0].url, second[0].url);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_fetch_is_not_cached() {
        let inner = CountingSource::new(true);
        let cache = CachedJobSource::new(inner.clone(), DEFAULT_CACHE_TTL);

        assert!(cache.fetch_postings().await.is_empty());
        assert!(cache.fetch_postings().await.is_empty());
        assert_eq!(inner.calls(), 2);
    }
}
