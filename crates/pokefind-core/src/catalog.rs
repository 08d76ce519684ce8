//! Catalog snapshots
//!
//! A catalog is the ordered list of searchable names, fetched once per process.
//! Snapshots are immutable and cheap to clone; the content hash lets index
//! caches detect when a rebuild is actually needed.

use ahash::AHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Immutable, ordered snapshot of catalog names.
///
/// Names are lower-cased and unique (first occurrence wins). Order is the
/// order the source returned them in, which doubles as the tie-breaker when
/// two candidates score the same.
#[derive(Debug, Clone)]
pub struct Catalog {
    names: Arc<[String]>,
    hash: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalog {
    /// The empty catalog, published before the first fetch completes.
    pub fn empty() -> Self {
        Self::from_names(std::iter::empty::<String>())
    }

    /// Build a snapshot from raw names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.into().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect();

        let hash = compute_hash(&names);
        Self {
            names: names.into(),
            hash,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Hash of the ordered name list, used for rebuild detection.
    pub fn content_hash(&self) -> u64 {
        self.hash
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.to_vec()
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.names == other.names
    }
}

impl Eq for Catalog {}

fn compute_hash(names: &[String]) -> u64 {
    let mut hasher = AHasher::default();
    names.len().hash(&mut hasher);
    for name in names {
        name.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lowercases_and_dedups() {
        let catalog = Catalog::from_names(["Pikachu", "raichu", "pikachu", " Eevee "]);
        assert_eq!(catalog.names(), &["pikachu", "raichu", "eevee"]);
    }

    #[test]
    fn test_preserves_source_order() {
        let catalog = Catalog::from_names(["zubat", "abra", "mew"]);
        assert_eq!(catalog.to_vec(), vec!["zubat", "abra", "mew"]);
    }

    #[test]
    fn test_empty() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn test_hash_tracks_content() {
        let a = Catalog::from_names(["pikachu", "raichu"]);
        let b = Catalog::from_names(["pikachu", "raichu"]);
        let c = Catalog::from_names(["raichu", "pikachu"]);

        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.content_hash(), c.content_hash());
        assert_ne!(a.content_hash(), Catalog::empty().content_hash());
    }

    #[test]
    fn test_blank_names_dropped() {
        let catalog = Catalog::from_names(["", "  ", "ditto"]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("ditto"));
    }
}
