//! Pokedex facade
//!
//! Owns the catalog loader, the index cache and the source, and hands out
//! search sessions that share them.

use crate::catalog::CatalogLoader;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::index::{top_candidates, IndexCache};
use crate::lookup::EntityLookup;
use crate::resolver::DetailResolver;
use crate::scheduler::DetailedSearch;
use crate::source::{HttpSource, PokedexSource};
use crate::suggest::{suggest, SuggestionFeed};
use crate::tracing::prefix;
use pokefind_core::{Catalog, MatchCandidate};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

pub struct Pokedex {
    config: SearchConfig,
    source: Arc<dyn PokedexSource>,
    catalog: Arc<CatalogLoader>,
    index: Arc<IndexCache>,
}

impl Pokedex {
    pub fn new(config: SearchConfig, source: Arc<dyn PokedexSource>) -> Result<Self> {
        config.validate()?;
        let catalog = Arc::new(CatalogLoader::new(
            Arc::clone(&source),
            config.catalog_limit,
        ));
        let index = Arc::new(IndexCache::new(config.strategy, config.index_config()));
        Ok(Self {
            config,
            source,
            catalog,
            index,
        })
    }

    /// Facade over the PokeAPI-compatible endpoint at `config.base_url`.
    pub fn from_config(config: SearchConfig) -> Result<Self> {
        let source = HttpSource::new(&config)?;
        Self::new(config, Arc::new(source))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Load the catalog if it is not loaded yet.
    pub async fn load_catalog(&self) -> Catalog {
        self.catalog.load().await
    }

    pub fn catalog_names(&self) -> Vec<String> {
        self.catalog.names()
    }

    pub fn subscribe_catalog(&self) -> watch::Receiver<Catalog> {
        self.catalog.subscribe()
    }

    /// Precision-profile suggestions against the current catalog.
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let catalog = self.catalog.snapshot();
        let index = self.index.index_for(&catalog);
        suggest(
            index.as_ref(),
            query,
            &self.config.precision,
            self.config.max_suggestions,
        )
    }

    /// Recall-profile candidates, the names a detailed search would resolve.
    pub fn candidates(&self, query: &str) -> Vec<MatchCandidate> {
        let catalog = self.catalog.snapshot();
        let index = self.index.index_for(&catalog);
        top_candidates(
            index.as_ref(),
            query,
            &self.config.recall,
            self.config.max_candidates,
        )
    }

    pub fn suggestion_feed(&self) -> SuggestionFeed {
        let feed = SuggestionFeed::new(
            &self.catalog,
            Arc::clone(&self.index),
            self.config.precision,
            self.config.max_suggestions,
        );
        self.ensure_catalog();
        feed
    }

    pub fn detailed_search(&self) -> DetailedSearch {
        let search = DetailedSearch::new(
            &self.catalog,
            Arc::clone(&self.index),
            DetailResolver::new(Arc::clone(&self.source)),
            &self.config,
        );
        self.ensure_catalog();
        search
    }

    pub fn lookup(&self) -> EntityLookup {
        EntityLookup::new(Arc::clone(&self.source))
    }

    /// Number of index builds so far.
    pub fn index_builds(&self) -> usize {
        self.index.build_count()
    }

    /// Start a background catalog load if nothing is loaded yet.
    fn ensure_catalog(&self) {
        if !self.catalog.snapshot().is_empty() {
            return;
        }
        debug!("{} catalog empty, loading in background", prefix::FETCH);
        let catalog = Arc::clone(&self.catalog);
        tokio::spawn(async move {
            catalog.load().await;
        });
    }
}
