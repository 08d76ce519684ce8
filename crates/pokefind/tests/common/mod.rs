//! Shared fixtures for pokefind integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pokefind::{
    DetailedResults, DetailedSearch, EntityDetail, Error, PokedexSource, Pokedex, Result,
    SearchConfig, SearchStatus,
};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const KANTO: &[&str] = &[
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "pichu",
    "pikachu",
    "raichu",
    "eevee",
    "porygon",
    "mew",
    "mewtwo",
];

/// In-memory source with per-name delays and failure injection.
pub struct MockSource {
    names: Vec<String>,
    catalog_delay: Option<Duration>,
    catalog_fails: AtomicBool,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    catalog_calls: AtomicUsize,
    requested_limit: Mutex<Option<usize>>,
    detail_calls: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            catalog_delay: None,
            catalog_fails: AtomicBool::new(false),
            delays: HashMap::new(),
            failing: HashSet::new(),
            catalog_calls: AtomicUsize::new(0),
            requested_limit: Mutex::new(None),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn kanto() -> Self {
        Self::new(KANTO)
    }

    pub fn with_catalog_delay(mut self, ms: u64) -> Self {
        self.catalog_delay = Some(Duration::from_millis(ms));
        self
    }

    pub fn with_failing_catalog(self) -> Self {
        self.catalog_fails.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_detail_delay(mut self, name: &str, ms: u64) -> Self {
        let delay = Duration::from_millis(ms);
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub fn with_failing_detail(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_catalog_fails(&self, fails: bool) {
        self.catalog_fails.store(fails, Ordering::SeqCst);
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn requested_limit(&self) -> Option<usize> {
        *self.requested_limit.lock()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().clone()
    }
}

#[async_trait]
impl PokedexSource for MockSource {
    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<String>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        *self.requested_limit.lock() = Some(limit);

        if let Some(delay) = self.catalog_delay {
            tokio::time::sleep(delay).await;
        }
        if self.catalog_fails.load(Ordering::SeqCst) {
            return Err(Error::CatalogFetch("injected failure".to_string()));
        }
        Ok(self.names.clone())
    }

    async fn fetch_detail(&self, name: &str) -> Result<EntityDetail> {
        self.detail_calls.lock().push(name.to_string());

        if let Some(delay) = self.delays.get(name).copied() {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(name) {
            return Err(Error::DetailFetch {
                name: name.to_string(),
                reason: "injected failure".to_string(),
            });
        }

        match self.names.iter().position(|n| n == name) {
            Some(idx) => Ok(EntityDetail::new(json!({ "id": idx + 1, "name": name }))),
            None => Err(Error::NotFound {
                name: name.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn pokedex(source: &Arc<MockSource>) -> Pokedex {
    pokedex_with(source, SearchConfig::default())
}

pub fn pokedex_with(source: &Arc<MockSource>, config: SearchConfig) -> Pokedex {
    let source: Arc<dyn PokedexSource> = source.clone();
    Pokedex::new(config, source).unwrap()
}

/// Wait until a batch for `query` has been committed.
pub async fn settled(search: &DetailedSearch, query: &str) -> DetailedResults {
    let mut rx = search.subscribe();
    let state = rx
        .wait_for(|s| s.query == query && !s.loading && s.status != SearchStatus::Idle)
        .await
        .unwrap();
    (*state).clone()
}

pub fn result_names(state: &DetailedResults) -> Vec<String> {
    state
        .results
        .iter()
        .filter_map(|d| d.name().map(str::to_string))
        .collect()
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
