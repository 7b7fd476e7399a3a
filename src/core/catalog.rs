// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt};
use tokio::sync::OnceCell;

use crate::{
    config::Config,
    core::api::CatalogSource,
    entities::{DexEntry, IndexEntry},
    utils::DexError,
};

/// Result cap for a submitted search
pub const SEARCH_LIMIT: usize = 20;
/// Result cap for inline suggestions while typing
pub const SUGGESTION_LIMIT: usize = 8;
/// Page size requested for the full index
pub const INDEX_LIMIT: usize = 1000;
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    pub index_limit: usize,
    pub search_limit: usize,
    pub suggestion_limit: usize,
    pub max_concurrent_requests: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            index_limit: INDEX_LIMIT,
            search_limit: SEARCH_LIMIT,
            suggestion_limit: SUGGESTION_LIMIT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl From<&Config> for CatalogSettings {
    fn from(config: &Config) -> Self {
        Self {
            index_limit: config.index_limit,
            search_limit: config.search_limit,
            suggestion_limit: config.suggestion_limit,
            max_concurrent_requests: config.max_concurrent_requests,
        }
    }
}

/// Case-insensitive substring filter over `index`, in index order, capped at `limit`
pub fn search_by_name(term: &str, index: &[IndexEntry], limit: usize) -> Vec<IndexEntry> {
    let term = term.to_lowercase();

    index
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&term))
        .take(limit)
        .cloned()
        .collect()
}

/// Catalog access for one view.
///
/// The index is fetched on first use and kept for as long as this value lives.
pub struct Catalog<S> {
    source: S,
    settings: CatalogSettings,
    index: OnceCell<Arc<Vec<IndexEntry>>>,
}

impl<S: CatalogSource> Catalog<S> {
    pub fn new(source: S) -> Self {
        Self::with_settings(source, CatalogSettings::default())
    }

    pub fn with_settings(source: S, settings: CatalogSettings) -> Self {
        Self {
            source,
            settings: CatalogSettings {
                max_concurrent_requests: settings.max_concurrent_requests.max(1),
                ..settings
            },
            index: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// The full name index, fetched once, failures are not cached
    pub async fn fetch_index(&self) -> Result<Arc<Vec<IndexEntry>>, DexError> {
        self.index
            .get_or_try_init(|| async {
                let index = self.source.fetch_index(self.settings.index_limit).await?;
                tracing::info!(entries = index.len(), "Catalog index loaded");
                Ok::<_, DexError>(Arc::new(index))
            })
            .await
            .cloned()
    }

    /// Index entries matching a submitted search
    pub async fn search(&self, term: &str) -> Result<Vec<IndexEntry>, DexError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let index = self.fetch_index().await?;
        Ok(search_by_name(term, &index, self.settings.search_limit))
    }

    /// Index entries to suggest while `term` is being typed
    pub async fn suggestions(&self, term: &str) -> Result<Vec<IndexEntry>, DexError> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let index = self.fetch_index().await?;
        Ok(search_by_name(term, &index, self.settings.suggestion_limit))
    }

    pub async fn fetch_detail(&self, id: i64) -> Result<DexEntry, DexError> {
        self.source.fetch_detail(id).await
    }

    /// Fetches every id concurrently, results follow `ids` order.
    ///
    /// At most `max_concurrent_requests` are in flight. The first failure
    /// fails the whole batch, partial results are dropped.
    pub async fn fetch_details(&self, ids: &[i64]) -> Result<Vec<DexEntry>, DexError> {
        futures::stream::iter(ids.iter().copied())
            .map(|id| self.source.fetch_detail(id))
            .buffered(self.settings.max_concurrent_requests)
            .try_collect()
            .await
    }

    /// Searches the index then resolves the matches to full entries
    pub async fn search_details(&self, term: &str) -> Result<Vec<DexEntry>, DexError> {
        let matches = self.search(term).await?;
        let ids: Vec<i64> = matches.iter().map(|entry| entry.id).collect();
        self.fetch_details(&ids).await
    }
}
