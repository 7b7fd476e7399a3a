// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        api::DEFAULT_API_BASE_URL,
        catalog::{DEFAULT_MAX_CONCURRENT_REQUESTS, INDEX_LIMIT, SEARCH_LIMIT, SUGGESTION_LIMIT},
    },
    utils::DexError,
};

pub const APP_ID: &str = "dev.mariinkys.PokeShelf";

const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub index_limit: usize,
    pub search_limit: usize,
    pub suggestion_limit: usize,
    pub max_concurrent_requests: usize,
    /// Where the collections are stored, the platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            index_limit: INDEX_LIMIT,
            search_limit: SEARCH_LIMIT,
            suggestion_limit: SUGGESTION_LIMIT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            data_dir: None,
        }
    }
}

impl Config {
    /// `<config dir>/dev.mariinkys.PokeShelf/config.ron`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_ID).join(CONFIG_FILE))
    }

    /// Loads the config from its default location, defaults when there is no file
    pub fn load() -> Result<Self, DexError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, DexError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, DexError> {
        let config: Config =
            ron::from_str(contents).map_err(|e| DexError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DexError> {
        if self.api_base_url.trim().is_empty() {
            return Err(DexError::Config(String::from("api_base_url is empty")));
        }

        for (name, value) in [
            ("index_limit", self.index_limit),
            ("search_limit", self.search_limit),
            ("suggestion_limit", self.suggestion_limit),
            ("max_concurrent_requests", self.max_concurrent_requests),
        ] {
            if value == 0 {
                return Err(DexError::Config(format!("{name} must be greater than 0")));
            }
        }

        Ok(())
    }

    /// Directory holding the persisted collections
    pub fn data_dir(&self) -> Result<PathBuf, DexError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_ID))
                .ok_or_else(|| DexError::Config(String::from("no data directory available"))),
        }
    }
}
