//! EditDistanceIndex - position-independent alternative to bitap

use super::{normalize_query, rank, IndexConfig, MatchCandidate, MatchIndex, SearchParams};
use crate::catalog::Catalog;
use strsim::normalized_levenshtein;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Whole-string Levenshtein index.
///
/// Score is `1 - normalized_levenshtein(query, name)`; a candidate is kept
/// when the score is within `threshold`. `distance` has no meaning here and is
/// ignored. Queries shorter than `min_match_len` characters match nothing.
pub struct EditDistanceIndex {
    names: Vec<String>,
    config: IndexConfig,
}

impl EditDistanceIndex {
    pub fn build(catalog: &Catalog, config: IndexConfig) -> Self {
        Self {
            names: catalog.to_vec(),
            config,
        }
    }

    fn score_single(&self, idx: usize, query: &str, threshold: f64) -> Option<(usize, f64)> {
        let name = &self.names[idx];
        let score = if name == query {
            0.0
        } else {
            1.0 - normalized_levenshtein(query, name)
        };
        (score <= threshold).then_some((idx, score))
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    #[cfg(feature = "parallel")]
    fn score_all(&self, query: &str, threshold: f64) -> Vec<(usize, f64)> {
        if self.names.len() >= self.config.parallel_threshold {
            (0..self.names.len())
                .into_par_iter()
                .filter_map(|idx| self.score_single(idx, query, threshold))
                .collect()
        } else {
            (0..self.names.len())
                .filter_map(|idx| self.score_single(idx, query, threshold))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, query: &str, threshold: f64) -> Vec<(usize, f64)> {
        (0..self.names.len())
            .filter_map(|idx| self.score_single(idx, query, threshold))
            .collect()
    }
}

impl MatchIndex for EditDistanceIndex {
    fn query(&self, query: &str, params: &SearchParams) -> Vec<MatchCandidate> {
        let Some(query) = normalize_query(query) else {
            return Vec::new();
        };
        if query.chars().count() < params.min_match_len {
            return Vec::new();
        }

        rank(self.score_all(&query, params.threshold), &self.names)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}
