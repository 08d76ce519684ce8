//! Single-record lookup by exact name

use crate::error::Result;
use crate::generation::Fenced;
use crate::source::PokedexSource;
use crate::tracing::prefix;
use pokefind_core::EntityDetail;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, warn};

/// Observable state of an [`EntityLookup`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityState {
    pub name: Option<String>,
    pub entity: Option<EntityDetail>,
    pub loading: bool,
    /// Display message of the last failure, cleared when a new lookup starts
    pub error: Option<String>,
}

struct LookupShared {
    source: Arc<dyn PokedexSource>,
    state: Fenced<EntityState>,
}

/// Tracks the detail record for one selected name.
///
/// Only the most recent name's outcome is ever published.
pub struct EntityLookup {
    shared: Arc<LookupShared>,
}

impl EntityLookup {
    pub(crate) fn new(source: Arc<dyn PokedexSource>) -> Self {
        Self {
            shared: Arc::new(LookupShared {
                source,
                state: Fenced::new(EntityState::default()),
            }),
        }
    }

    /// Select a name. `None` or a blank name leaves the state untouched.
    pub fn set_name(&self, name: Option<&str>) {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return;
        };
        let name = name.to_lowercase();

        let token = self.shared.state.advance(|s| {
            s.name = Some(name.clone());
            s.loading = true;
            s.error = None;
        });

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let outcome = shared.source.fetch_detail(&name).await;
            if let Err(e) = &outcome {
                error!("{} lookup of '{}' failed: {}", prefix::FETCH, name, e);
            }

            let committed = shared.state.commit(token, |s| {
                s.loading = false;
                match outcome {
                    Ok(detail) => s.entity = Some(detail),
                    Err(e) => {
                        s.entity = None;
                        s.error = Some(e.to_string());
                    }
                }
            });
            if !committed {
                warn!("{} discarding stale lookup of '{}'", prefix::FETCH, name);
            }
        });
    }

    /// One-shot fetch that bypasses the observable state.
    pub async fn fetch(&self, name: &str) -> Result<EntityDetail> {
        self.shared
            .source
            .fetch_detail(&name.trim().to_lowercase())
            .await
    }

    pub fn subscribe(&self) -> watch::Receiver<EntityState> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> EntityState {
        self.shared.state.snapshot()
    }
}
