//! pokefind Core
//!
//! Runtime-free kernel for typo-tolerant name search: immutable catalog
//! snapshots, pluggable fuzzy index strategies and the detail record type.
//! Nothing in this crate performs I/O or spawns tasks; the async coordination
//! layer lives in the `pokefind` crate.
//!
//! # Features
//!
//! - `parallel` - Score large catalogs on the rayon pool
//!
//! # Example
//!
//! ```rust
//! use pokefind_core::{Catalog, IndexStrategy, MatchIndex, SearchParams, Strategy};
//!
//! let catalog = Catalog::from_names(["pikachu", "raichu", "bulbasaur"]);
//! let index = Strategy::Bitap.build(&catalog);
//!
//! let matches = index.query("pikachuu", &SearchParams::PRECISION);
//! assert_eq!(matches[0].name, "pikachu");
//! ```

pub mod catalog;
pub mod entity;
pub mod fuzzy;

// Re-export main types at crate root
pub use catalog::Catalog;
pub use entity::EntityDetail;
pub use fuzzy::{
    BitapIndex, EditDistanceIndex, IndexConfig, IndexError, IndexStrategy, MatchCandidate,
    MatchIndex, SearchParams, Strategy,
};
