// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use async_trait::async_trait;
use rustemon::model::pokemon::Pokemon;
use serde::Deserialize;

use crate::{
    entities::{DexEntry, IndexEntry},
    utils::{DexError, id_from_resource_url},
};

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Read-only access to the remote catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Retrieves the `{id, name}` listing in a single request of `limit` items
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, DexError>;

    /// Retrieves one full record
    async fn fetch_detail(&self, id: i64) -> Result<DexEntry, DexError>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, DexError> {
        (**self).fetch_index(limit).await
    }

    async fn fetch_detail(&self, id: i64) -> Result<DexEntry, DexError> {
        (**self).fetch_detail(id).await
    }
}

/// Listing page as returned by PokeApi, only the parts we read
#[derive(Debug, Deserialize)]
struct IndexPage {
    results: Vec<IndexResource>,
}

#[derive(Debug, Deserialize)]
struct IndexResource {
    name: String,
    url: String,
}

/// [`CatalogSource`] backed by the PokeApi REST endpoints
#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl PokeApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn index_url(&self, limit: usize) -> String {
        format!("{}?limit={limit}", self.base_url)
    }

    fn detail_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }
}

#[async_trait]
impl CatalogSource for PokeApi {
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, DexError> {
        let url = self.index_url(limit);
        tracing::debug!(%url, "Fetching catalog index");

        let page: IndexPage = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(index_from_page(page))
    }

    async fn fetch_detail(&self, id: i64) -> Result<DexEntry, DexError> {
        let url = self.detail_url(id);
        tracing::debug!(%url, "Fetching catalog entry");

        let pokemon: Pokemon = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(DexEntry::from(pokemon))
    }
}

/// Resolves ids from the resource urls, falling back to the 1-based listing position
fn index_from_page(page: IndexPage) -> Vec<IndexEntry> {
    page.results
        .into_iter()
        .enumerate()
        .map(|(position, resource)| IndexEntry {
            id: id_from_resource_url(&resource.url).unwrap_or(position as i64 + 1),
            name: resource.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoint_urls() {
        let api = PokeApi::new("http://localhost:8080/api/v2/pokemon/");

        assert_eq!(api.base_url(), "http://localhost:8080/api/v2/pokemon");
        assert_eq!(
            api.index_url(1000),
            "http://localhost:8080/api/v2/pokemon?limit=1000"
        );
        assert_eq!(api.detail_url(25), "http://localhost:8080/api/v2/pokemon/25");
    }

    #[test]
    fn reads_index_page() {
        let body = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=3&limit=3",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "deoxys-attack", "url": "https://pokeapi.co/api/v2/pokemon/10001/"},
                {"name": "missingno", "url": "not-a-url"}
            ]
        }"#;

        let page: IndexPage = serde_json::from_str(body).unwrap();
        let index = index_from_page(page);

        assert_eq!(
            index,
            vec![
                IndexEntry::new(1, "bulbasaur"),
                IndexEntry::new(10001, "deoxys-attack"),
                IndexEntry::new(3, "missingno"),
            ]
        );
    }
}
