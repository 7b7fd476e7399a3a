// SPDX-License-Identifier: GPL-3.0-only

mod dex_entry;
mod index_entry;

pub use dex_entry::{DexEntry, DexStats};
pub use index_entry::IndexEntry;
