//! Catalog loader
//!
//! Fetches the name listing once per process and publishes it as a
//! [`Catalog`] snapshot on a watch channel. Until a fetch succeeds the
//! published catalog is empty; a failed fetch is logged and leaves it empty.

use crate::source::PokedexSource;
use crate::tracing::prefix;
use pokefind_core::Catalog;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info};

pub struct CatalogLoader {
    source: Arc<dyn PokedexSource>,
    limit: usize,
    tx: watch::Sender<Catalog>,
    /// Serializes fetches so concurrent loads collapse into one request
    load_lock: Mutex<()>,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn PokedexSource>, limit: usize) -> Self {
        let (tx, _rx) = watch::channel(Catalog::empty());
        Self {
            source,
            limit,
            tx,
            load_lock: Mutex::new(()),
        }
    }

    /// Current snapshot (empty until the first successful load).
    pub fn snapshot(&self) -> Catalog {
        self.tx.borrow().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.tx.borrow().to_vec()
    }

    /// Receiver notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Catalog> {
        self.tx.subscribe()
    }

    /// Fetch the catalog unless one is already loaded.
    ///
    /// Never fails: on error the published catalog stays empty and a later
    /// call retries.
    pub async fn load(&self) -> Catalog {
        let _guard = self.load_lock.lock().await;

        let current = self.snapshot();
        if !current.is_empty() {
            debug!("{} catalog already loaded ({} names)", prefix::FETCH, current.len());
            return current;
        }

        match self.source.fetch_catalog(self.limit).await {
            Ok(names) => {
                let catalog = Catalog::from_names(names.into_iter().take(self.limit));
                info!("{} catalog loaded: {} names", prefix::FETCH, catalog.len());
                self.tx.send_replace(catalog.clone());
                catalog
            }
            Err(e) => {
                error!("{} Error fetching catalog: {}", prefix::FETCH, e);
                current
            }
        }
    }
}
