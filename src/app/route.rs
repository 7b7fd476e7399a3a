// SPDX-License-Identifier: GPL-3.0-only

use std::{fmt, str::FromStr};

use crate::{core::Collection, utils::DexError};

/// Addressable pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Search,
    Detail(i64),
    Collection(Collection),
}

impl FromStr for Route {
    type Err = DexError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::Search),
            ["pokemon", id] => id
                .parse::<i64>()
                .ok()
                .filter(|id| *id > 0)
                .map(Route::Detail)
                .ok_or_else(|| DexError::Route(path.to_string())),
            ["library"] => Ok(Route::Collection(Collection::Library)),
            ["favorites"] => Ok(Route::Collection(Collection::Favorites)),
            _ => Err(DexError::Route(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Search => write!(f, "/"),
            Route::Detail(id) => write!(f, "/pokemon/{id}"),
            Route::Collection(collection) => write!(f, "/{}", collection.name()),
        }
    }
}
