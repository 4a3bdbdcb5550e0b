use async_trait::async_trait;
use bom_reconciler::bom_reconciliation::domain::{ReleaseRecord, TrackerLookup};
use bom_reconciler::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock ReleaseRepository keyed by normalized purl
#[derive(Default)]
pub struct MockReleaseRepository {
    lookups: HashMap<String, TrackerLookup>,
    failing: HashSet<String>,
    pub calls: AtomicUsize,
}

impl MockReleaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, purl: &str, release_id: &str, clearing_state: &str) -> Self {
        self.lookups.insert(
            purl.to_string(),
            TrackerLookup {
                component_exists: true,
                release: Some(ReleaseRecord {
                    release_id: release_id.to_string(),
                    clearing_state: Some(clearing_state.to_string()),
                    ..ReleaseRecord::default()
                }),
            },
        );
        self
    }

    pub fn with_component_only(mut self, purl: &str) -> Self {
        self.lookups.insert(
            purl.to_string(),
            TrackerLookup {
                component_exists: true,
                release: None,
            },
        );
        self
    }

    pub fn with_failure(mut self, purl: &str) -> Self {
        self.failing.insert(purl.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseRepository for MockReleaseRepository {
    async fn lookup_release(&self, purl: &str) -> Result<TrackerLookup> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(purl) {
            anyhow::bail!("Mock tracker failure for {}", purl);
        }
        Ok(self.lookups.get(purl).cloned().unwrap_or_default())
    }
}
