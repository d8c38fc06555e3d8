//! In-memory cache for downloaded sanctions lists.
//!
//! Lists change rarely, so each source's names are held for a
//! configurable TTL before being re-downloaded. A failed refresh falls
//! back to the stale copy rather than dropping the list entirely.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, warn};

use super::NameListSource;
use crate::TARGET_PIPELINE;

#[derive(Debug, Clone)]
struct CachedList {
    names: Vec<String>,
    fetched_at: DateTime<Utc>,
}

pub struct ListCache {
    entries: DashMap<String, CachedList>,
    ttl: Duration,
}

impl ListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached names for `source`, refreshing them when the
    /// TTL has lapsed. Fetch failures are logged and absorbed: the
    /// stale copy is returned if one exists, otherwise an empty list.
    pub async fn get_or_fetch(&self, source: &dyn NameListSource) -> Vec<String> {
        let key = source.name().to_string();

        if let Some(entry) = self.entries.get(&key) {
            if Utc::now() - entry.fetched_at < self.ttl {
                debug!(
                    target: TARGET_PIPELINE,
                    "Using cached list for {} ({} names)",
                    key,
                    entry.names.len()
                );
                return entry.names.clone();
            }
        }

        match source.fetch().await {
            Ok(names) => {
                self.entries.insert(
                    key,
                    CachedList {
                        names: names.clone(),
                        fetched_at: Utc::now(),
                    },
                );
                names
            }
            Err(e) => {
                warn!(
                    target: TARGET_PIPELINE,
                    "Failed to refresh list {}: {}", key, e
                );
                self.entries
                    .get(&key)
                    .map(|entry| entry.names.clone())
                    .unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl NameListSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch(&self) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(anyhow!("source unavailable"))
            } else {
                Ok(vec!["Acme Ltd".to_string()])
            }
        }
    }

    #[tokio::test]
    async fn fresh_entry_is_not_refetched() {
        let cache = ListCache::new(Duration::hours(24));
        let source = CountingSource::new(false);

        let first = cache.get_or_fetch(&source).await;
        let second = cache.get_or_fetch(&source).await;

        assert_eq!(first, vec!["Acme Ltd".to_string()]);
        assert_eq!(second, first);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let cache = ListCache::new(Duration::zero());
        let source = CountingSource::new(false);

        cache.get_or_fetch(&source).await;
        cache.get_or_fetch(&source).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fetch_failure_returns_stale_copy() {
        let cache = ListCache::new(Duration::zero());
        let good = CountingSource::new(false);
        let bad = CountingSource::new(true);

        // Both sources share the same cache key.
        let seeded = cache.get_or_fetch(&good).await;
        assert!(!seeded.is_empty());

        let stale = cache.get_or_fetch(&bad).await;
        assert_eq!(stale, seeded);
    }

    #[tokio::test]
    async fn fetch_failure_without_cache_yields_empty() {
        let cache = ListCache::new(Duration::hours(24));
        let bad = CountingSource::new(true);

        let names = cache.get_or_fetch(&bad).await;
        assert!(names.is_empty());
    }
}
