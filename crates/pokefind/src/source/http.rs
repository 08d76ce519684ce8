//! PokeAPI HTTP source

use super::PokedexSource;
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::tracing::prefix;
use async_trait::async_trait;
use pokefind_core::EntityDetail;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CatalogPage {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

/// [`PokedexSource`] backed by a PokeAPI-compatible REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Config(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base_url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, base_url })
    }

    /// `{base}/pokemon?limit={limit}`
    pub fn catalog_url(&self, limit: usize) -> Url {
        let mut url = self.endpoint(&["pokemon"]);
        let limit = limit.to_string();
        url.query_pairs_mut().append_pair("limit", &limit);
        url
    }

    /// `{base}/pokemon/{name}`, name lower-cased and path-escaped
    pub fn detail_url(&self, name: &str) -> Url {
        let name = name.trim().to_lowercase();
        self.endpoint(&["pokemon", name.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl PokedexSource for HttpSource {
    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<String>> {
        let url = self.catalog_url(limit);
        debug!("{} GET {}", prefix::FETCH, url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} catalog request returned {}", prefix::FETCH, status);
            return Err(Error::CatalogFetch(format!("{} returned {}", url, status)));
        }

        let page: CatalogPage = response.json().await?;
        Ok(page.results.into_iter().map(|r| r.name).collect())
    }

    async fn fetch_detail(&self, name: &str) -> Result<EntityDetail> {
        let url = self.detail_url(name);
        debug!("{} GET {}", prefix::FETCH, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::DetailFetch {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::NotFound {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| Error::DetailFetch {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(EntityDetail::new(body))
    }
}
