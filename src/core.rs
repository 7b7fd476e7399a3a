// SPDX-License-Identifier: GPL-3.0-only

pub mod api;
pub mod catalog;
pub mod collection;
pub mod retrieval;
pub mod storage;

pub use api::{CatalogSource, PokeApi};
pub use catalog::{Catalog, CatalogSettings, search_by_name};
pub use collection::{Collection, CollectionChange, CollectionEvent, CollectionStore};
pub use retrieval::Retrieval;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
