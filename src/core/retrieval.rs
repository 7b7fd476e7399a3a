// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Display;

/// Lifecycle of a single catalog request as seen by a view
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Retrieval<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed,
}

impl<T> Retrieval<T> {
    /// Moves to the terminal state for `result`, logging failures
    pub fn settle<E: Display>(&mut self, what: &str, result: Result<T, E>) {
        *self = match result {
            Ok(value) => Retrieval::Loaded(value),
            Err(e) => {
                tracing::error!("Error fetching {what}: {e}");
                Retrieval::Failed
            }
        };
    }

    pub fn start(&mut self) {
        *self = Retrieval::Loading;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Retrieval::Loading)
    }

    /// Loading has completed, successfully or not
    pub fn is_finished(&self) -> bool {
        matches!(self, Retrieval::Loaded(_) | Retrieval::Failed)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Retrieval::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Retrieval::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Retrieval<Vec<T>> {
    /// Loaded items, empty for every other state
    pub fn items(&self) -> &[T] {
        self.value().map(Vec::as_slice).unwrap_or_default()
    }
}
