// SPDX-License-Identifier: GPL-3.0-only

//! PokeShelf: search the PokéAPI catalog and keep a library and a favorites list.
//!
//! - `core`: catalog retrieval, the collection store and its storage backends
//! - `app`: pages, routing and text rendering
//! - `flags`: command line and startup settings

pub mod app;
pub mod config;
pub mod core;
pub mod entities;
pub mod flags;
pub mod utils;

pub use app::{Message, Page, PokeShelf, Route};
pub use config::Config;
pub use crate::core::{Catalog, Collection, CollectionStore, FileStore, MemoryStore, PokeApi};
pub use entities::{DexEntry, IndexEntry};
pub use utils::DexError;
