// SPDX-License-Identifier: GPL-3.0-only

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::{
    core::{Catalog, CatalogSource, Collection, CollectionEvent, CollectionStore, KeyValueStore},
    entities::IndexEntry,
    utils::DexError,
};

mod pages;
mod render;
mod route;

pub use pages::{CollectionView, DetailView, Page, SearchView};
pub use render::{entry_card, entry_details, stat_bar, stat_percentage};
pub use route::Route;

/// Everything the user can ask the application to do
#[derive(Debug, Clone)]
pub enum Message {
    Open(Route),
    /// Search input changed, refreshes the suggestions
    Input(String),
    /// Search submitted
    Search(String),
    SelectSuggestion(IndexEntry),
    Add(i64, Collection),
    Remove(i64, Collection),
    Toggle(i64, Collection),
    Clear(Collection),
}

/// Application state, one catalog for the lifetime of the session plus the persisted collections
pub struct PokeShelf<S, K> {
    catalog: Catalog<S>,
    collections: CollectionStore<K>,
    events: broadcast::Receiver<CollectionEvent>,
    page: Page,
}

impl<S: CatalogSource, K: KeyValueStore> PokeShelf<S, K> {
    pub fn new(catalog: Catalog<S>, collections: CollectionStore<K>) -> Self {
        let events = collections.subscribe();

        Self {
            catalog,
            collections,
            events,
            page: Page::default(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    pub fn collections(&self) -> &CollectionStore<K> {
        &self.collections
    }

    /// Handles a message, only storage write failures are returned.
    ///
    /// Catalog failures end up as a failed [`crate::core::Retrieval`] on the page.
    pub async fn update(&mut self, message: Message) -> Result<(), DexError> {
        match message {
            Message::Open(route) => self.open(route).await,
            Message::Input(term) => {
                self.search_view().term = term.clone();

                let suggestions = self.catalog.suggestions(&term).await;
                let view = self.search_view();
                view.suggestions = suggestions.unwrap_or_else(|e| {
                    tracing::error!("Error fetching suggestions: {e}");
                    Vec::new()
                });
            }
            Message::Search(term) => {
                if term.trim().is_empty() {
                    return Ok(());
                }

                let view = self.search_view();
                view.term = term.clone();
                view.suggestions.clear();
                view.has_searched = true;
                view.results.start();

                let results = self.catalog.search_details(&term).await;
                self.search_view().results.settle("search results", results);
            }
            Message::SelectSuggestion(entry) => {
                let view = self.search_view();
                view.term = entry.name.clone();
                view.suggestions.clear();
                view.has_searched = true;
                view.results.start();

                let result = self.catalog.fetch_detail(entry.id).await.map(|e| vec![e]);
                self.search_view().results.settle("selected pokemon", result);
            }
            Message::Add(id, collection) => {
                self.collections.add(id, collection)?;
                self.sync_collections().await;
            }
            Message::Remove(id, collection) => {
                self.collections.remove(id, collection)?;
                self.sync_collections().await;
            }
            Message::Toggle(id, collection) => {
                self.collections.toggle(id, collection)?;
                self.sync_collections().await;
            }
            Message::Clear(collection) => {
                self.collections.clear(collection)?;
                self.sync_collections().await;
            }
        }

        Ok(())
    }

    async fn open(&mut self, route: Route) {
        tracing::debug!(%route, "Opening page");

        match route {
            Route::Search => {
                let mut view = SearchView::default();
                view.index.start();
                view.index
                    .settle("pokemon index", self.catalog.fetch_index().await);
                self.page = Page::Search(view);
            }
            Route::Detail(id) => {
                let mut view = DetailView::new(id);
                view.entry.start();
                view.entry
                    .settle("pokemon detail", self.catalog.fetch_detail(id).await);
                view.in_library = self.collections.contains(id, Collection::Library);
                view.in_favorites = self.collections.contains(id, Collection::Favorites);
                self.page = Page::Detail(view);
            }
            Route::Collection(collection) => {
                let mut view = CollectionView::new(collection);
                let ids = self.collections.list(collection);
                view.entries.start();
                if ids.is_empty() {
                    view.entries.settle::<DexError>("pokemons", Ok(Vec::new()));
                } else {
                    view.entries
                        .settle("pokemons", self.catalog.fetch_details(&ids).await);
                }
                self.page = Page::Collection(view);
            }
        }

        // changes made before this page existed are already in its state
        self.drain_events();
    }

    /// Applies pending collection events to the current page
    async fn sync_collections(&mut self) {
        loop {
            let event = match self.events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed collection events, reloading page");
                    self.reload().await;
                    return;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return,
            };

            match &mut self.page {
                Page::Search(_) => {}
                Page::Detail(view) => view.apply(&event),
                Page::Collection(view) => {
                    if let Some(id) = view.apply(&event) {
                        let result = self.catalog.fetch_detail(id).await;
                        match result {
                            Ok(entry) => {
                                if let Some(entries) = view.entries.value_mut() {
                                    entries.push(entry);
                                }
                            }
                            Err(e) => tracing::error!("Error fetching pokemon {id}: {e}"),
                        }
                    }
                }
            }
        }
    }

    async fn reload(&mut self) {
        let route = match &self.page {
            Page::Search(_) => Route::Search,
            Page::Detail(view) => Route::Detail(view.id),
            Page::Collection(view) => Route::Collection(view.collection),
        };
        self.open(route).await;
    }

    fn drain_events(&mut self) {
        while let Ok(_) | Err(TryRecvError::Lagged(_)) = self.events.try_recv() {}
    }

    /// The search page, switching to a fresh one if another page is shown
    fn search_view(&mut self) -> &mut SearchView {
        if !matches!(self.page, Page::Search(_)) {
            self.page = Page::Search(SearchView::default());
        }

        match &mut self.page {
            Page::Search(view) => view,
            _ => unreachable!("page was just set to search"),
        }
    }
}
