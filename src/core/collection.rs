// SPDX-License-Identifier: GPL-3.0-only

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{core::storage::KeyValueStore, utils::DexError};

/// Capacity of the change notification channel, slow subscribers lag past it
const EVENT_CAPACITY: usize = 64;

/// The two personal lists a user can keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Library,
    Favorites,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Library, Collection::Favorites];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Library => "library",
            Collection::Favorites => "favorites",
        }
    }

    /// Key the collection is persisted under
    pub fn storage_key(&self) -> &'static str {
        match self {
            Collection::Library => "pokemon-library",
            Collection::Favorites => "pokemon-favorites",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "library" => Ok(Collection::Library),
            "favorites" | "favourites" => Ok(Collection::Favorites),
            other => Err(DexError::Config(format!("unknown collection `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Added(i64),
    Removed(i64),
    Cleared,
}

/// Emitted after a mutation has been persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionEvent {
    pub collection: Collection,
    pub change: CollectionChange,
}

/// Stored ids after duplicate removal, plus whether the stored value needs rewriting
struct Membership {
    ids: Vec<i64>,
    denormalized: bool,
}

/// Tracks library and favorites membership on top of a [`KeyValueStore`].
///
/// Nothing is cached: every query reads the persisted value, every mutation
/// writes it back before returning.
pub struct CollectionStore<S> {
    storage: S,
    events: broadcast::Sender<CollectionEvent>,
}

impl<S: KeyValueStore> CollectionStore<S> {
    pub fn new(storage: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { storage, events }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Receives an event for every effective change made through this store
    pub fn subscribe(&self) -> broadcast::Receiver<CollectionEvent> {
        self.events.subscribe()
    }

    /// Ids in the collection, empty when unset or unreadable
    pub fn list(&self, collection: Collection) -> Vec<i64> {
        self.load(collection).ids
    }

    pub fn contains(&self, id: i64, collection: Collection) -> bool {
        self.load(collection).ids.contains(&id)
    }

    /// Adds `id` unless already present
    pub fn add(&self, id: i64, collection: Collection) -> Result<(), DexError> {
        let Membership {
            mut ids,
            denormalized,
        } = self.load(collection);

        if ids.contains(&id) {
            if denormalized {
                self.persist(collection, &ids)?;
            }
            return Ok(());
        }

        ids.push(id);
        self.persist(collection, &ids)?;
        self.notify(collection, CollectionChange::Added(id));
        Ok(())
    }

    /// Removes `id`, absent ids are a no-op
    pub fn remove(&self, id: i64, collection: Collection) -> Result<(), DexError> {
        let Membership { ids, denormalized } = self.load(collection);
        let before = ids.len();
        let ids: Vec<i64> = ids.into_iter().filter(|stored| *stored != id).collect();
        let removed = ids.len() != before;

        if removed || denormalized {
            self.persist(collection, &ids)?;
        }
        if removed {
            self.notify(collection, CollectionChange::Removed(id));
        }
        Ok(())
    }

    /// Flips membership of `id`, returns whether it is now a member
    pub fn toggle(&self, id: i64, collection: Collection) -> Result<bool, DexError> {
        if self.contains(id, collection) {
            self.remove(id, collection)?;
            Ok(false)
        } else {
            self.add(id, collection)?;
            Ok(true)
        }
    }

    /// Empties the collection
    pub fn clear(&self, collection: Collection) -> Result<(), DexError> {
        self.persist(collection, &[])?;
        self.notify(collection, CollectionChange::Cleared);
        Ok(())
    }

    fn load(&self, collection: Collection) -> Membership {
        let key = collection.storage_key();

        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                return Membership {
                    ids: Vec::new(),
                    denormalized: false,
                };
            }
            Err(e) => {
                tracing::warn!(key, "Failed to read collection, treating as empty: {e}");
                return Membership {
                    ids: Vec::new(),
                    denormalized: false,
                };
            }
        };

        let stored: Vec<i64> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(key, "Malformed collection value, treating as empty: {e}");
                return Membership {
                    ids: Vec::new(),
                    denormalized: false,
                };
            }
        };

        let mut ids = Vec::with_capacity(stored.len());
        for id in &stored {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }

        Membership {
            denormalized: ids.len() != stored.len(),
            ids,
        }
    }

    fn persist(&self, collection: Collection, ids: &[i64]) -> Result<(), DexError> {
        let key = collection.storage_key();
        let value = serde_json::to_string(ids)?;

        self.storage.set(key, &value).inspect_err(|e| {
            tracing::error!(key, "Failed to persist collection: {e}");
        })?;

        tracing::debug!(key, len = ids.len(), "Collection persisted");
        Ok(())
    }

    fn notify(&self, collection: Collection, change: CollectionChange) {
        // no receivers is fine
        let _ = self.events.send(CollectionEvent { collection, change });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::storage::MemoryStore;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, DexError> {
            Ok(Some(String::from("[1]")))
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), DexError> {
            Err(DexError::Storage {
                key: key.to_string(),
                reason: String::from("quota exceeded"),
            })
        }
    }

    fn store() -> CollectionStore<Arc<MemoryStore>> {
        CollectionStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn empty_when_unset() {
        let store = store();
        assert!(store.list(Collection::Library).is_empty());
        assert!(!store.contains(1, Collection::Favorites));
    }

    #[test]
    fn add_remove_follow_set_semantics() {
        let store = store();

        store.add(1, Collection::Library).unwrap();
        store.add(4, Collection::Library).unwrap();
        store.add(1, Collection::Library).unwrap();
        store.add(7, Collection::Library).unwrap();
        store.remove(4, Collection::Library).unwrap();
        store.add(4, Collection::Library).unwrap();
        store.remove(7, Collection::Library).unwrap();

        let mut ids = store.list(Collection::Library);
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 4]);
        assert!(store.list(Collection::Favorites).is_empty());
    }

    #[test]
    fn contains_tracks_last_mutation() {
        let store = store();

        store.add(25, Collection::Favorites).unwrap();
        assert!(store.contains(25, Collection::Favorites));
        store.remove(25, Collection::Favorites).unwrap();
        assert!(!store.contains(25, Collection::Favorites));
        store.remove(25, Collection::Favorites).unwrap();
        assert!(!store.contains(25, Collection::Favorites));
    }

    #[test]
    fn no_op_mutations_leave_list_unchanged() {
        let store = store();
        store.add(1, Collection::Library).unwrap();
        store.add(2, Collection::Library).unwrap();

        store.remove(99, Collection::Library).unwrap();
        assert_eq!(store.list(Collection::Library), vec![1, 2]);

        store.add(2, Collection::Library).unwrap();
        assert_eq!(store.list(Collection::Library), vec![1, 2]);
    }

    #[test]
    fn persists_json_arrays_under_namespaced_keys() {
        let store = store();
        store.add(4, Collection::Favorites).unwrap();
        store.add(7, Collection::Favorites).unwrap();

        assert_eq!(
            store.storage().get("pokemon-favorites").unwrap().as_deref(),
            Some("[4,7]")
        );
        assert_eq!(store.storage().get("pokemon-library").unwrap(), None);
    }

    #[test]
    fn normalizes_duplicates_on_next_write() {
        let store = store();
        store.storage().set("pokemon-favorites", "[4,4,7]").unwrap();

        assert_eq!(store.list(Collection::Favorites), vec![4, 7]);

        store.add(4, Collection::Favorites).unwrap();
        assert_eq!(
            store.storage().get("pokemon-favorites").unwrap().as_deref(),
            Some("[4,7]")
        );
    }

    #[test]
    fn malformed_value_reads_as_empty() {
        let store = store();
        store.storage().set("pokemon-library", "{not json").unwrap();

        assert!(store.list(Collection::Library).is_empty());

        store.add(3, Collection::Library).unwrap();
        assert_eq!(store.list(Collection::Library), vec![3]);
    }

    #[test]
    fn toggle_and_clear() {
        let store = store();

        assert!(store.toggle(6, Collection::Library).unwrap());
        assert!(store.contains(6, Collection::Library));
        assert!(!store.toggle(6, Collection::Library).unwrap());
        assert!(!store.contains(6, Collection::Library));

        store.add(1, Collection::Library).unwrap();
        store.add(2, Collection::Library).unwrap();
        store.clear(Collection::Library).unwrap();
        assert!(store.list(Collection::Library).is_empty());
        assert_eq!(
            store.storage().get("pokemon-library").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn write_failures_are_returned() {
        let store = CollectionStore::new(ReadOnlyStore);

        assert!(matches!(
            store.add(2, Collection::Library),
            Err(DexError::Storage { .. })
        ));
        // already present, nothing to write
        assert!(store.add(1, Collection::Library).is_ok());
    }

    #[test]
    fn emits_events_for_effective_changes_only() {
        let store = store();
        let mut events = store.subscribe();

        store.add(1, Collection::Library).unwrap();
        store.add(1, Collection::Library).unwrap();
        store.remove(2, Collection::Library).unwrap();
        store.remove(1, Collection::Library).unwrap();
        store.clear(Collection::Favorites).unwrap();

        let received: Vec<CollectionEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                CollectionEvent {
                    collection: Collection::Library,
                    change: CollectionChange::Added(1),
                },
                CollectionEvent {
                    collection: Collection::Library,
                    change: CollectionChange::Removed(1),
                },
                CollectionEvent {
                    collection: Collection::Favorites,
                    change: CollectionChange::Cleared,
                },
            ]
        );
    }

    #[test]
    fn parses_collection_names() {
        assert_eq!("library".parse::<Collection>().unwrap(), Collection::Library);
        assert_eq!(
            "Favorites".parse::<Collection>().unwrap(),
            Collection::Favorites
        );
        assert!("team".parse::<Collection>().is_err());
    }
}
