use crate::bom_reconciliation::domain::TrackerLookup;
use crate::ports::outbound::ReleaseRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingReleaseRepository wraps a ReleaseRepository and memoizes lookups.
///
/// BOMs from several inputs often name the same purl more than once; each
/// distinct purl is sent to the tracker at most once per run. Failed
/// lookups are not cached.
pub struct CachingReleaseRepository<R: ReleaseRepository> {
    inner: R,
    cache: Arc<DashMap<String, TrackerLookup>>,
}

impl<R: ReleaseRepository> CachingReleaseRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: ReleaseRepository> ReleaseRepository for CachingReleaseRepository<R> {
    async fn lookup_release(&self, purl: &str) -> Result<TrackerLookup> {
        if let Some(cached) = self.cache.get(purl) {
            return Ok(cached.clone());
        }

        let lookup = self.inner.lookup_release(purl).await?;
        self.cache.insert(purl.to_string(), lookup.clone());

        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_reconciliation::domain::ReleaseRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRepository {
        call_count: AtomicUsize,
        fail: bool,
    }

    impl CountingRepository {
        fn new(fail: bool) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail,
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReleaseRepository for CountingRepository {
        async fn lookup_release(&self, purl: &str) -> Result<TrackerLookup> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(TrackerLookup {
                component_exists: true,
                release: Some(ReleaseRecord {
                    release_id: format!("id-{}", purl),
                    ..ReleaseRecord::default()
                }),
            })
        }
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_cached() {
        let repo = CachingReleaseRepository::new(CountingRepository::new(false));

        let first = repo.lookup_release("pkg:npm/a@1").await.unwrap();
        let second = repo.lookup_release("pkg:npm/a@1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.inner.calls(), 1);
        assert_eq!(repo.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_distinct_purls_cached_separately() {
        let repo = CachingReleaseRepository::new(CountingRepository::new(false));
        repo.lookup_release("pkg:npm/a@1").await.unwrap();
        repo.lookup_release("pkg:npm/a@2").await.unwrap();
        assert_eq!(repo.inner.calls(), 2);
        assert_eq!(repo.cache_size(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let repo = CachingReleaseRepository::new(CountingRepository::new(true));
        assert!(repo.lookup_release("pkg:npm/a@1").await.is_err());
        assert!(repo.lookup_release("pkg:npm/a@1").await.is_err());
        assert_eq!(repo.inner.calls(), 2);
        assert_eq!(repo.cache_size(), 0);
    }
}
