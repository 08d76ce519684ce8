//! Error types for search coordination.

use pokefind_core::IndexError;
use thiserror::Error;

/// Error type for pokefind operations.
///
/// None of these are fatal: catalog failures degrade to an empty catalog,
/// batch failures to an empty result list, lookup failures to a message.
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog listing could not be fetched
    #[error("catalog fetch failed: {0}")]
    CatalogFetch(String),

    /// Detail request failed in transport or decoding
    #[error("detail fetch failed for '{name}': {reason}")]
    DetailFetch { name: String, reason: String },

    /// Detail endpoint answered with a non-success status
    #[error("pokemon not found: {name}")]
    NotFound { name: String, status: u16 },

    /// A member of a fan-out batch failed, failing the whole batch
    #[error("batch resolve failed at '{failed}': {source}")]
    BatchResolve {
        failed: String,
        #[source]
        source: Box<Error>,
    },

    /// HTTP transport error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid search parameters
    #[error("invalid search params: {0}")]
    Index(#[from] IndexError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using pokefind Error.
pub type Result<T> = std::result::Result<T, Error>;
