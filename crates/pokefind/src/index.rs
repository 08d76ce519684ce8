//! Index cache keyed on catalog content

use crate::tracing::prefix;
use parking_lot::RwLock;
use pokefind_core::{Catalog, IndexConfig, IndexStrategy, MatchCandidate, MatchIndex, SearchParams};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

struct CachedIndex {
    hash: u64,
    len: usize,
    index: Arc<dyn MatchIndex>,
}

impl CachedIndex {
    fn covers(&self, catalog: &Catalog) -> bool {
        self.hash == catalog.content_hash() && self.len == catalog.len()
    }
}

/// Holds the index for the most recent catalog snapshot.
///
/// Rebuilds only when the catalog content changes; queries against an
/// unchanged catalog share one built index.
pub struct IndexCache {
    strategy: Box<dyn IndexStrategy>,
    config: IndexConfig,
    current: RwLock<Option<CachedIndex>>,
    builds: AtomicUsize,
}

impl IndexCache {
    pub fn new(strategy: impl IndexStrategy + 'static, config: IndexConfig) -> Self {
        Self {
            strategy: Box::new(strategy),
            config,
            current: RwLock::new(None),
            builds: AtomicUsize::new(0),
        }
    }

    /// Index over `catalog`, building it if the cached one is for other content.
    pub fn index_for(&self, catalog: &Catalog) -> Arc<dyn MatchIndex> {
        if let Some(cached) = self.current.read().as_ref() {
            if cached.covers(catalog) {
                return Arc::clone(&cached.index);
            }
        }

        let mut current = self.current.write();
        if let Some(cached) = current.as_ref() {
            if cached.covers(catalog) {
                return Arc::clone(&cached.index);
            }
        }

        let index: Arc<dyn MatchIndex> = Arc::from(self.strategy.build_with(catalog, &self.config));
        self.builds.fetch_add(1, Ordering::Relaxed);
        info!("{} index built over {} names", prefix::INDEX, catalog.len());

        *current = Some(CachedIndex {
            hash: catalog.content_hash(),
            len: catalog.len(),
            index: Arc::clone(&index),
        });
        index
    }

    /// Number of index builds so far.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

/// Ranked candidates, truncated to `limit`.
pub fn top_candidates(
    index: &dyn MatchIndex,
    query: &str,
    params: &SearchParams,
    limit: usize,
) -> Vec<MatchCandidate> {
    if index.is_empty() || query.trim().is_empty() {
        return Vec::new();
    }
    let mut candidates = index.query(query, params);
    candidates.truncate(limit);
    candidates
}
