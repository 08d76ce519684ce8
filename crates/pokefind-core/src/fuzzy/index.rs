//! BitapIndex - default fuzzy index

use super::bitap::Pattern;
use super::{normalize_query, rank, IndexConfig, MatchCandidate, MatchIndex, SearchParams};
use crate::catalog::Catalog;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Bitap index over one catalog snapshot.
///
/// Names are pre-split into chars once at build time; each query compiles its
/// pattern once and scores every name against it.
pub struct BitapIndex {
    names: Vec<String>,
    chars: Vec<Vec<char>>,
    /// Field-length norm per name (`1 / sqrt(word count)`, 3 decimals)
    norms: Vec<f64>,
    config: IndexConfig,
}

impl BitapIndex {
    pub fn build(catalog: &Catalog, config: IndexConfig) -> Self {
        let names = catalog.to_vec();
        let chars = names.iter().map(|n| n.chars().collect()).collect();
        let norms = names.iter().map(|n| field_norm(n)).collect();

        Self {
            names,
            chars,
            norms,
            config,
        }
    }

    fn score_single(
        &self,
        idx: usize,
        pattern: &Pattern,
        params: &SearchParams,
    ) -> Option<(usize, f64)> {
        pattern
            .search_in(&self.chars[idx], params)
            .map(|score| (idx, score.powf(self.norms[idx])))
    }

    /// Score every name - parallel for large catalogs when enabled
    #[cfg(feature = "parallel")]
    fn score_all(&self, pattern: &Pattern, params: &SearchParams) -> Vec<(usize, f64)> {
        if self.names.len() >= self.config.parallel_threshold {
            (0..self.names.len())
                .into_par_iter()
                .filter_map(|idx| self.score_single(idx, pattern, params))
                .collect()
        } else {
            self.score_sequential(pattern, params)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn score_all(&self, pattern: &Pattern, params: &SearchParams) -> Vec<(usize, f64)> {
        self.score_sequential(pattern, params)
    }

    fn score_sequential(&self, pattern: &Pattern, params: &SearchParams) -> Vec<(usize, f64)> {
        (0..self.names.len())
            .filter_map(|idx| self.score_single(idx, pattern, params))
            .collect()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}

impl MatchIndex for BitapIndex {
    fn query(&self, query: &str, params: &SearchParams) -> Vec<MatchCandidate> {
        let Some(query) = normalize_query(query) else {
            return Vec::new();
        };
        if self.names.is_empty() {
            return Vec::new();
        }

        let pattern = Pattern::new(&query);
        rank(self.score_all(&pattern, params), &self.names)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

fn field_norm(name: &str) -> f64 {
    let words = name.split(' ').filter(|w| !w.is_empty()).count().max(1);
    (1000.0 / (words as f64).sqrt()).round() / 1000.0
}
