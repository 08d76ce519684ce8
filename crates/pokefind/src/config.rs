//! Search configuration

use crate::error::{Error, Result};
use pokefind_core::{IndexConfig, SearchParams, Strategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public PokeAPI root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Configuration for the search coordination layer.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// API root; catalog at `{base_url}/pokemon`, details at `{base_url}/pokemon/{name}`
    pub base_url: String,
    /// Upper bound on catalog size requested from the listing endpoint
    pub catalog_limit: usize,
    /// Quiet period before a detailed search runs
    pub debounce_ms: u64,
    /// Candidates resolved into detail records per query
    pub max_candidates: usize,
    /// Names returned per suggestion list
    pub max_suggestions: usize,
    /// Profile used ahead of detail resolution
    pub recall: SearchParams,
    /// Profile used for suggestions
    pub precision: SearchParams,
    /// Fuzzy index strategy
    pub strategy: Strategy,
    /// Catalog size at which scoring goes parallel (`parallel` feature)
    pub parallel_threshold: usize,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog_limit: 1500,
            debounce_ms: 300,
            max_candidates: 12,
            max_suggestions: 8,
            recall: SearchParams::RECALL,
            precision: SearchParams::PRECISION,
            strategy: Strategy::Bitap,
            parallel_threshold: IndexConfig::default().parallel_threshold,
            request_timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        if self.catalog_limit == 0 {
            return Err(Error::Config("catalog_limit must be positive".to_string()));
        }
        if self.max_candidates == 0 {
            return Err(Error::Config("max_candidates must be positive".to_string()));
        }
        if self.max_suggestions == 0 {
            return Err(Error::Config("max_suggestions must be positive".to_string()));
        }
        self.recall.validate()?;
        self.precision.validate()?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            parallel_threshold: self.parallel_threshold,
        }
    }
}
