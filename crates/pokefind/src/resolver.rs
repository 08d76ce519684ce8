//! Detail resolver
//!
//! Fans a candidate list out into concurrent detail fetches. The batch
//! succeeds only if every fetch does; records come back in candidate order.

use crate::error::{Error, Result};
use crate::generation::{Fenced, Generation};
use crate::scheduler::{DetailedResults, SearchStatus};
use crate::source::PokedexSource;
use crate::tracing::prefix;
use futures::future::try_join_all;
use pokefind_core::EntityDetail;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Clone)]
pub struct DetailResolver {
    source: Arc<dyn PokedexSource>,
}

impl DetailResolver {
    pub fn new(source: Arc<dyn PokedexSource>) -> Self {
        Self { source }
    }

    /// Fetch one record per name, concurrently, preserving input order.
    ///
    /// The first failure fails the whole batch with [`Error::BatchResolve`].
    pub async fn resolve(&self, names: &[String]) -> Result<Vec<EntityDetail>> {
        let source = &self.source;
        let fetches = names.iter().map(|name| async move {
            source
                .fetch_detail(name)
                .await
                .map_err(|e| Error::BatchResolve {
                    failed: name.clone(),
                    source: Box::new(e),
                })
        });
        try_join_all(fetches).await
    }

    /// Resolve `names` and publish the outcome if `token` is still current.
    ///
    /// Returns whether the outcome was committed.
    pub(crate) async fn resolve_into(
        &self,
        names: Vec<String>,
        token: Generation,
        state: &Fenced<DetailedResults>,
    ) -> bool {
        let outcome = self.resolve(&names).await;
        if let Err(e) = &outcome {
            error!("{} Error searching pokemon: {}", prefix::FETCH, e);
        }

        let committed = state.commit(token, |s| {
            s.loading = false;
            match outcome {
                Ok(results) => {
                    s.status = if results.is_empty() {
                        SearchStatus::NoMatches
                    } else {
                        SearchStatus::Found
                    };
                    s.results = results;
                }
                Err(_) => {
                    s.results.clear();
                    s.status = SearchStatus::Failed;
                }
            }
        });

        if !committed {
            warn!(
                "{} discarding stale batch of {} (generation {})",
                prefix::SEARCH,
                names.len(),
                token.value()
            );
        }
        committed
    }
}
