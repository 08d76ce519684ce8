//! Fuzzy Name Index
//!
//! Approximate matching over catalog names, behind a replaceable strategy:
//!
//! - [`IndexStrategy::build`] turns a [`Catalog`] snapshot into a [`MatchIndex`]
//! - [`MatchIndex::query`] returns ranked [`MatchCandidate`]s, best (lowest score) first
//!
//! # Strategies
//!
//! 1. **Bitap** (default) - location-aware bitap with error budget derived from
//!    the threshold. Score is `errors / pattern_len + |location| / distance`;
//!    exact string equality scores 0, every other match at least 0.001.
//! 2. **EditDistance** - normalized Levenshtein (`1 - similarity`). Ignores
//!    `distance`, useful when match position should not matter.
//!
//! # Profiles
//!
//! | Profile | threshold | distance | min match len |
//! |---|---|---|---|
//! | [`SearchParams::RECALL`] | 0.4 | 100 | 1 |
//! | [`SearchParams::PRECISION`] | 0.3 | 50 | 1 |
//!
//! Queries are trimmed and lower-cased; blank queries return nothing without
//! scanning the catalog.

mod bitap;
mod edit_distance;
mod index;

pub use edit_distance::EditDistanceIndex;
pub use index::BitapIndex;

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A ranked candidate (lower score = closer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub name: String,
    pub score: f64,
}

impl MatchCandidate {
    pub(crate) fn new(name: &str, score: f64) -> Self {
        Self {
            name: name.to_string(),
            score,
        }
    }
}

/// Matching parameters for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum accepted score (0.0 = exact only, 1.0 = anything)
    pub threshold: f64,
    /// How far from the start of a name a match may drift before the
    /// location penalty alone exceeds the threshold
    pub distance: usize,
    /// Shortest run of matched characters that counts as a match
    pub min_match_len: usize,
}

impl SearchParams {
    /// Tolerant profile used ahead of detail resolution.
    pub const RECALL: SearchParams = SearchParams {
        threshold: 0.4,
        distance: 100,
        min_match_len: 1,
    };

    /// Tighter profile used for suggestions.
    pub const PRECISION: SearchParams = SearchParams {
        threshold: 0.3,
        distance: 50,
        min_match_len: 1,
    };

    pub fn validate(&self) -> Result<(), IndexError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(IndexError::InvalidThreshold(self.threshold));
        }
        if self.min_match_len == 0 {
            return Err(IndexError::InvalidMinMatchLen);
        }
        Ok(())
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::RECALL
    }
}

/// Invalid search parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    #[error("threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("min_match_len must be at least 1")]
    InvalidMinMatchLen,
}

/// Build-time options shared by all strategies.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Catalog size at which scoring switches to rayon (`parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1000,
        }
    }
}

/// A built, read-only index over one catalog snapshot.
pub trait MatchIndex: Send + Sync {
    /// Ranked candidates for `query`, ascending score, ties in catalog order.
    fn query(&self, query: &str, params: &SearchParams) -> Vec<MatchCandidate>;

    /// Number of indexed names.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns a catalog snapshot into a [`MatchIndex`].
pub trait IndexStrategy: Send + Sync {
    fn build_with(&self, catalog: &Catalog, config: &IndexConfig) -> Box<dyn MatchIndex>;

    fn build(&self, catalog: &Catalog) -> Box<dyn MatchIndex> {
        self.build_with(catalog, &IndexConfig::default())
    }
}

/// Built-in strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Bitap,
    EditDistance,
}

impl IndexStrategy for Strategy {
    fn build_with(&self, catalog: &Catalog, config: &IndexConfig) -> Box<dyn MatchIndex> {
        match self {
            Strategy::Bitap => Box::new(BitapIndex::build(catalog, config.clone())),
            Strategy::EditDistance => Box::new(EditDistanceIndex::build(catalog, config.clone())),
        }
    }
}

/// Normalize a raw query; `None` when nothing is left to match.
pub(crate) fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Ascending score, then catalog position.
pub(crate) fn rank(mut scored: Vec<(usize, f64)>, names: &[String]) -> Vec<MatchCandidate> {
    scored.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored
        .into_iter()
        .map(|(idx, score)| MatchCandidate::new(&names[idx], score))
        .collect()
}
