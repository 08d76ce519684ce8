//! Name suggestions
//!
//! Synchronous, precision-profile matching over the current catalog. No
//! network calls: suggestions are names only.

use crate::catalog::CatalogLoader;
use crate::generation::{Fenced, Generation};
use crate::index::{top_candidates, IndexCache};
use crate::tracing::prefix;
use parking_lot::Mutex;
use pokefind_core::{Catalog, MatchIndex, SearchParams};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Top `limit` catalog names for `query`. Empty for a blank query or an
/// empty index.
pub fn suggest(
    index: &dyn MatchIndex,
    query: &str,
    params: &SearchParams,
    limit: usize,
) -> Vec<String> {
    top_candidates(index, query, params, limit)
        .into_iter()
        .map(|c| c.name)
        .collect()
}

struct FeedShared {
    catalog: watch::Receiver<Catalog>,
    index: Arc<IndexCache>,
    params: SearchParams,
    limit: usize,
    query: Mutex<String>,
    state: Fenced<Vec<String>>,
}

impl FeedShared {
    fn new(
        catalog: watch::Receiver<Catalog>,
        index: Arc<IndexCache>,
        params: SearchParams,
        limit: usize,
    ) -> Self {
        Self {
            catalog,
            index,
            params,
            limit,
            query: Mutex::new(String::new()),
            state: Fenced::new(Vec::new()),
        }
    }

    /// Take a fresh token together with the query it belongs to, replacing
    /// the query first when `next` is given.
    fn begin(&self, next: Option<String>) -> (Generation, String) {
        let mut query = self.query.lock();
        if let Some(next) = next {
            *query = next;
        }
        let token = self.state.fence();
        (token, query.clone())
    }

    /// Compute suggestions for `query` and publish them if `token` is still current.
    fn refresh(&self, token: Generation, query: &str) -> Vec<String> {
        let catalog = self.catalog.borrow().clone();
        let index = self.index.index_for(&catalog);
        let names = suggest(index.as_ref(), query, &self.params, self.limit);
        if !self.state.commit(token, |s| s.clone_from(&names)) {
            debug!(
                "{} dropped suggestions for '{}' (generation {})",
                prefix::SEARCH,
                query,
                token.value()
            );
        }
        names
    }
}

/// Suggestions for a changing query, recomputed when the catalog arrives.
///
/// Every edit and every catalog-driven refresh takes a new generation, so a
/// slow recompute for an older query never replaces newer suggestions.
pub struct SuggestionFeed {
    shared: Arc<FeedShared>,
    listener: JoinHandle<()>,
}

impl SuggestionFeed {
    pub(crate) fn new(
        catalog: &CatalogLoader,
        index: Arc<IndexCache>,
        params: SearchParams,
        limit: usize,
    ) -> Self {
        let shared = Arc::new(FeedShared::new(catalog.subscribe(), index, params, limit));

        let mut updates = catalog.subscribe();
        let listener = tokio::spawn({
            let shared = Arc::clone(&shared);
            async move {
                while updates.changed().await.is_ok() {
                    let (token, query) = shared.begin(None);
                    shared.refresh(token, &query);
                }
            }
        });

        Self { shared, listener }
    }

    /// Replace the query and return its suggestions.
    pub fn set_query(&self, query: impl Into<String>) -> Vec<String> {
        let (token, query) = self.shared.begin(Some(query.into()));
        self.shared.refresh(token, &query)
    }

    pub fn current(&self) -> Vec<String> {
        self.shared.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.shared.state.subscribe()
    }

    pub fn generation(&self) -> Generation {
        self.shared.state.generation()
    }

    pub fn close(&self) {
        self.listener.abort();
    }
}

impl Drop for SuggestionFeed {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokefind_core::{IndexConfig, IndexStrategy, Strategy};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suggest_typo() {
        let catalog = Catalog::from_names(["pikachu", "raichu", "bulbasaur"]);
        let index = Strategy::Bitap.build(&catalog);
        assert_eq!(
            suggest(index.as_ref(), "pikachu", &SearchParams::PRECISION, 8),
            vec!["pikachu"]
        );
        assert_eq!(
            suggest(index.as_ref(), "pikachuu", &SearchParams::PRECISION, 8),
            vec!["pikachu"]
        );
    }

    #[test]
    fn test_suggest_limit() {
        let catalog = Catalog::from_names((0..20).map(|i| format!("porygon{i}")));
        let index = Strategy::Bitap.build(&catalog);
        assert_eq!(
            suggest(index.as_ref(), "porygon", &SearchParams::PRECISION, 8).len(),
            8
        );
    }

    #[test]
    fn test_suggest_blank_and_empty() {
        let index = Strategy::Bitap.build(&Catalog::from_names(["mew"]));
        assert!(suggest(index.as_ref(), " ", &SearchParams::PRECISION, 8).is_empty());

        let empty = Strategy::Bitap.build(&Catalog::empty());
        assert!(suggest(empty.as_ref(), "mew", &SearchParams::PRECISION, 8).is_empty());
    }

    #[test]
    fn test_late_refresh_for_old_query_dropped() {
        let (_tx, catalog) = watch::channel(Catalog::from_names(["pikachu", "raichu"]));
        let index = Arc::new(IndexCache::new(Strategy::Bitap, IndexConfig::default()));
        let shared = FeedShared::new(catalog, index, SearchParams::PRECISION, 8);

        let (stale, old_query) = shared.begin(Some("raichu".to_string()));
        let (token, query) = shared.begin(Some("pikachu".to_string()));
        assert_eq!(shared.refresh(token, &query), vec!["pikachu"]);

        // The older recompute finishes last
        shared.refresh(stale, &old_query);
        assert_eq!(shared.state.snapshot(), vec!["pikachu"]);
    }

    #[test]
    fn test_catalog_refresh_reads_latest_query() {
        let (_tx, catalog) = watch::channel(Catalog::from_names(["eevee", "mew"]));
        let index = Arc::new(IndexCache::new(Strategy::Bitap, IndexConfig::default()));
        let shared = FeedShared::new(catalog, index, SearchParams::PRECISION, 8);

        shared.begin(Some("eeve".to_string()));
        let (token, query) = shared.begin(None);
        assert_eq!(query, "eeve");
        shared.refresh(token, &query);
        assert_eq!(shared.state.snapshot(), vec!["eevee"]);
    }
}
