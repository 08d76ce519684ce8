//! Remote data sources
//!
//! The catalog loader, detail resolver and entity lookup only ever talk to a
//! [`PokedexSource`]; [`HttpSource`] is the PokeAPI-backed implementation.

mod http;

pub use http::HttpSource;

use crate::error::Result;
use async_trait::async_trait;
use pokefind_core::EntityDetail;

/// Read-only access to the catalog listing and per-name detail records.
#[async_trait]
pub trait PokedexSource: Send + Sync {
    /// Fetch up to `limit` catalog names in source order.
    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<String>>;

    /// Fetch the detail record for `name`.
    ///
    /// A non-success response surfaces as [`crate::Error::NotFound`].
    async fn fetch_detail(&self, name: &str) -> Result<EntityDetail>;
}
