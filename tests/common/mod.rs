// SPDX-License-Identifier: GPL-3.0-only

#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use pokeshelf::{
    DexEntry, DexError, IndexEntry,
    core::CatalogSource,
    entities::DexStats,
};

/// In-memory catalog that counts requests and tracks how many run at once
#[derive(Default)]
pub struct FakeCatalog {
    index: Vec<IndexEntry>,
    failing: HashSet<i64>,
    index_fails: bool,
    pub index_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(names: &[(i64, &str)]) -> Self {
        Self {
            index: names
                .iter()
                .map(|(id, name)| IndexEntry::new(*id, *name))
                .collect(),
            ..Default::default()
        }
    }

    /// Catalog with ids 1..=count named `mon-{id}`
    pub fn numbered(count: i64) -> Self {
        Self {
            index: (1..=count)
                .map(|id| IndexEntry::new(id, format!("mon-{id}")))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, id: i64) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn offline(mut self) -> Self {
        self.index_fails = true;
        self
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn name_of(&self, id: i64) -> Option<&str> {
        self.index
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.as_str())
    }
}

pub fn entry(id: i64, name: &str) -> DexEntry {
    DexEntry {
        id,
        name: name.to_string(),
        height: 10,
        weight: 100,
        types: vec![String::from("normal")],
        abilities: vec![String::from("run-away")],
        stats: DexStats {
            hp: 50,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed: 50,
        },
        sprite_url: None,
        artwork_url: None,
    }
}

fn unavailable(what: String) -> DexError {
    DexError::Io(std::io::Error::other(what))
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_index(&self, limit: usize) -> Result<Vec<IndexEntry>, DexError> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        if self.index_fails {
            return Err(unavailable(String::from("index unavailable")));
        }
        Ok(self.index.iter().take(limit).cloned().collect())
    }

    async fn fetch_detail(&self, id: i64) -> Result<DexEntry, DexError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // let the other requests of a batch start
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&id) || self.index_fails {
            return Err(unavailable(format!("pokemon {id} unavailable")));
        }
        self.name_of(id)
            .map(|name| entry(id, name))
            .ok_or_else(|| unavailable(format!("pokemon {id} not found")))
    }
}
