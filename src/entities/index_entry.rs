// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Lightweight `{id, name}` record of the full catalog listing, used for searching
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: i64,
    pub name: String,
}

impl IndexEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
