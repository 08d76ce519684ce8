//! pokefind
//!
//! Async coordination for typo-tolerant Pokémon name search on top of
//! `pokefind-core`:
//!
//! - [`CatalogLoader`] fetches the name catalog once and publishes snapshots
//! - [`DetailedSearch`] debounces query edits, runs the recall profile and
//!   resolves the top candidates into detail records
//! - [`SuggestionFeed`] / [`Pokedex::suggestions`] give precision-profile name
//!   suggestions without network calls
//! - [`EntityLookup`] tracks the detail record for one selected name
//!
//! All observable state is published on `tokio::sync::watch` channels and is
//! fenced by generation tokens, so a slow response for an old input never
//! overwrites a newer one.
//!
//! # Example
//!
//! ```rust,no_run
//! use pokefind::{Pokedex, SearchConfig};
//!
//! # async fn run() -> pokefind::Result<()> {
//! pokefind::tracing::init();
//!
//! let pokedex = Pokedex::from_config(SearchConfig::default())?;
//! pokedex.load_catalog().await;
//!
//! let search = pokedex.detailed_search();
//! search.set_query("pikachuu");
//!
//! let mut results = search.subscribe();
//! if let Ok(state) = results.wait_for(|s| !s.loading && !s.results.is_empty()).await {
//!     println!("{} results for {}", state.results.len(), state.query);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod lookup;
pub mod pokedex;
pub mod resolver;
pub mod scheduler;
pub mod source;
pub mod suggest;
pub mod tracing;

pub use catalog::CatalogLoader;
pub use config::SearchConfig;
pub use error::{Error, Result};
pub use generation::Generation;
pub use index::IndexCache;
pub use lookup::{EntityLookup, EntityState};
pub use pokedex::Pokedex;
pub use resolver::DetailResolver;
pub use scheduler::{DetailedResults, DetailedSearch, SearchPhase, SearchStatus};
pub use source::{HttpSource, PokedexSource};
pub use suggest::{suggest, SuggestionFeed};

pub use pokefind_core::{Catalog, EntityDetail, MatchCandidate, SearchParams, Strategy};
