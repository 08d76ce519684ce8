//! Debounced detailed search
//!
//! [`DetailedSearch`] turns a stream of query edits into at most one detail
//! batch per quiet period:
//!
//! ```text
//! Idle --set_query--> Pending --debounce elapsed--> Running --batch done--> Idle
//!                      ^   |                          |
//!                      +---+ set_query restarts timer  +--set_query--> Pending (batch discarded)
//! ```
//!
//! Each edit advances the generation, so a batch started for an older query
//! can finish but never overwrite state. Previous results stay visible until
//! the next batch commits; a blank query clears them immediately without
//! scheduling anything. When the catalog arrives after a
//! query was entered, the current query is scheduled again.

use crate::catalog::CatalogLoader;
use crate::config::SearchConfig;
use crate::generation::{Fenced, Generation};
use crate::index::{top_candidates, IndexCache};
use crate::resolver::DetailResolver;
use crate::tracing::prefix;
use parking_lot::{Mutex, MutexGuard};
use pokefind_core::{Catalog, EntityDetail, SearchParams};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Outcome of the most recent committed search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// No search has completed for the current query
    #[default]
    Idle,
    Found,
    /// Search ran and no candidate cleared the threshold
    NoMatches,
    /// A detail fetch failed; results were cleared
    Failed,
}

/// Observable state of a [`DetailedSearch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedResults {
    pub query: String,
    pub results: Vec<EntityDetail>,
    pub loading: bool,
    pub status: SearchStatus,
}

/// Where the scheduler is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    /// Waiting out the debounce window
    Pending,
    /// Detail batch in flight
    Running,
}

struct Pending {
    query: String,
    timer: Option<JoinHandle<()>>,
}

struct Shared {
    catalog: watch::Receiver<Catalog>,
    index: Arc<IndexCache>,
    resolver: DetailResolver,
    state: Fenced<DetailedResults>,
    pending: Mutex<Pending>,
    params: SearchParams,
    max_candidates: usize,
    debounce: Duration,
}

impl Shared {
    fn schedule(self: &Arc<Self>, query: String) {
        let mut pending = self.pending.lock();
        self.arm(&mut pending, query);
    }

    /// Re-run whatever query is pending now. The read and the re-arm happen
    /// under one lock, so a concurrent edit is never rolled back.
    fn reschedule_current(self: &Arc<Self>) {
        let mut pending = self.pending.lock();
        let query = pending.query.clone();
        if query.trim().is_empty() {
            return;
        }
        info!("{} catalog changed, re-running '{}'", prefix::SEARCH, query);
        self.arm(&mut pending, query);
    }

    fn arm(self: &Arc<Self>, pending: &mut MutexGuard<'_, Pending>, query: String) {
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.query = query.clone();

        let blank = query.trim().is_empty();
        let token = self.state.advance(|s| {
            s.query = query.clone();
            s.loading = false;
            s.status = SearchStatus::Idle;
            if blank {
                s.results.clear();
            }
        });

        if blank {
            debug!("{} blank query, results cleared", prefix::SEARCH);
            return;
        }

        let shared = Arc::clone(self);
        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(shared.debounce).await;
            shared.run(query, token);
        }));
    }

    fn run(self: Arc<Self>, query: String, token: Generation) {
        if !self.state.commit(token, |s| s.loading = true) {
            return;
        }

        let catalog = self.catalog.borrow().clone();
        let index = self.index.index_for(&catalog);
        let names: Vec<String> =
            top_candidates(index.as_ref(), &query, &self.params, self.max_candidates)
                .into_iter()
                .map(|c| c.name)
                .collect();
        debug!(
            "{} '{}' -> {} candidates (generation {})",
            prefix::SEARCH,
            query,
            names.len(),
            token.value()
        );

        tokio::spawn(async move {
            self.resolver.resolve_into(names, token, &self.state).await;
        });
    }
}

/// Debounced, generation-fenced detailed search session.
///
/// Dropping the session cancels any pending timer; in-flight batches run to
/// completion but their results are discarded.
pub struct DetailedSearch {
    shared: Arc<Shared>,
    listener: JoinHandle<()>,
}

impl DetailedSearch {
    pub(crate) fn new(
        catalog: &CatalogLoader,
        index: Arc<IndexCache>,
        resolver: DetailResolver,
        config: &SearchConfig,
    ) -> Self {
        let shared = Arc::new(Shared {
            catalog: catalog.subscribe(),
            index,
            resolver,
            state: Fenced::new(DetailedResults::default()),
            pending: Mutex::new(Pending {
                query: String::new(),
                timer: None,
            }),
            params: config.recall,
            max_candidates: config.max_candidates,
            debounce: config.debounce(),
        });

        let mut updates = catalog.subscribe();
        let listener = tokio::spawn({
            let shared = Arc::clone(&shared);
            async move {
                while updates.changed().await.is_ok() {
                    shared.reschedule_current();
                }
            }
        });

        Self { shared, listener }
    }

    /// Replace the query, restarting the debounce window.
    pub fn set_query(&self, query: impl Into<String>) {
        self.shared.schedule(query.into());
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailedResults> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> DetailedResults {
        self.shared.state.snapshot()
    }

    pub fn generation(&self) -> Generation {
        self.shared.state.generation()
    }

    pub fn phase(&self) -> SearchPhase {
        let waiting = self
            .shared
            .pending
            .lock()
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished());
        if waiting {
            SearchPhase::Pending
        } else if self.shared.state.snapshot().loading {
            SearchPhase::Running
        } else {
            SearchPhase::Idle
        }
    }

    /// Cancel pending work and fence off in-flight batches.
    pub fn close(&self) {
        if let Some(timer) = self.shared.pending.lock().timer.take() {
            timer.abort();
        }
        self.listener.abort();
        self.shared.state.advance(|s| s.loading = false);
    }
}

impl Drop for DetailedSearch {
    fn drop(&mut self) {
        self.close();
    }
}
