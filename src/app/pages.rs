// SPDX-License-Identifier: GPL-3.0-only

use std::{fmt, sync::Arc};

use crate::{
    app::render::{entry_card, entry_details},
    core::{Collection, CollectionChange, CollectionEvent, Retrieval},
    entities::{DexEntry, IndexEntry},
    utils::capitalize_string,
};

/// Search (home) page state
#[derive(Debug, Default)]
pub struct SearchView {
    pub term: String,
    pub index: Retrieval<Arc<Vec<IndexEntry>>>,
    pub suggestions: Vec<IndexEntry>,
    pub results: Retrieval<Vec<DexEntry>>,
    pub has_searched: bool,
}

/// Single entry page state
#[derive(Debug)]
pub struct DetailView {
    pub id: i64,
    pub entry: Retrieval<DexEntry>,
    pub in_library: bool,
    pub in_favorites: bool,
}

impl DetailView {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            entry: Retrieval::Idle,
            in_library: false,
            in_favorites: false,
        }
    }

    pub fn is_member(&self, collection: Collection) -> bool {
        match collection {
            Collection::Library => self.in_library,
            Collection::Favorites => self.in_favorites,
        }
    }

    fn set_member(&mut self, collection: Collection, member: bool) {
        match collection {
            Collection::Library => self.in_library = member,
            Collection::Favorites => self.in_favorites = member,
        }
    }

    /// Mirrors a persisted membership change
    pub fn apply(&mut self, event: &CollectionEvent) {
        match event.change {
            CollectionChange::Added(id) if id == self.id => self.set_member(event.collection, true),
            CollectionChange::Removed(id) if id == self.id => {
                self.set_member(event.collection, false)
            }
            CollectionChange::Cleared => self.set_member(event.collection, false),
            _ => {}
        }
    }
}

/// Library or favorites listing state
#[derive(Debug)]
pub struct CollectionView {
    pub collection: Collection,
    pub entries: Retrieval<Vec<DexEntry>>,
}

impl CollectionView {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            entries: Retrieval::Idle,
        }
    }

    /// Mirrors a persisted membership change, returns the id to fetch when one was added
    pub fn apply(&mut self, event: &CollectionEvent) -> Option<i64> {
        if event.collection != self.collection {
            return None;
        }

        match event.change {
            CollectionChange::Added(id) => {
                let known = self.entries.items().iter().any(|entry| entry.id == id);
                (!known).then_some(id)
            }
            CollectionChange::Removed(id) => {
                if let Some(entries) = self.entries.value_mut() {
                    entries.retain(|entry| entry.id != id);
                }
                None
            }
            CollectionChange::Cleared => {
                self.entries = Retrieval::Loaded(Vec::new());
                None
            }
        }
    }
}

/// The page currently shown
#[derive(Debug)]
pub enum Page {
    Search(SearchView),
    Detail(DetailView),
    Collection(CollectionView),
}

impl Default for Page {
    fn default() -> Self {
        Page::Search(SearchView::default())
    }
}

impl fmt::Display for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.suggestions.is_empty() {
            writeln!(f, "Suggestions for \"{}\":", self.term)?;
            for suggestion in &self.suggestions {
                writeln!(
                    f,
                    "  #{:<5} {}",
                    suggestion.id,
                    capitalize_string(&suggestion.name)
                )?;
            }
        }

        if self.has_searched {
            match &self.results {
                Retrieval::Loading => writeln!(f, "Searching...")?,
                results => {
                    writeln!(f, "Search Results ({})", results.items().len())?;
                    for entry in results.items() {
                        writeln!(f, "{}", entry_card(entry))?;
                    }
                }
            }
        } else if self.index.is_finished() && self.suggestions.is_empty() {
            writeln!(f, "Start your adventure!")?;
            writeln!(f, "Enter a Pokémon name to find your new friend")?;
        }

        Ok(())
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Retrieval::Idle | Retrieval::Loading => writeln!(f, "Loading Pokémon..."),
            Retrieval::Failed => writeln!(f, "Pokémon not found"),
            Retrieval::Loaded(entry) => {
                write!(f, "{}", entry_details(entry))?;
                writeln!(
                    f,
                    "Library: {}   Favorites: {}",
                    if self.in_library { "yes" } else { "no" },
                    if self.in_favorites { "yes" } else { "no" }
                )
            }
        }
    }
}

impl fmt::Display for CollectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.collection {
            Collection::Library => "My Library",
            Collection::Favorites => "Favorite Pokémon",
        };
        writeln!(f, "{title}")?;

        if self.entries.is_loading() {
            return writeln!(f, "Loading...");
        }

        let entries = self.entries.items();
        if entries.is_empty() {
            return writeln!(
                f,
                "You don't have any Pokémon in your {} yet",
                self.collection
            );
        }

        writeln!(f, "{} Pokémon in your {}", entries.len(), self.collection)?;
        for entry in entries {
            writeln!(f, "{}", entry_card(entry))?;
        }
        Ok(())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Search(view) => view.fmt(f),
            Page::Detail(view) => view.fmt(f),
            Page::Collection(view) => view.fmt(f),
        }
    }
}
