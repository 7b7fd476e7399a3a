// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    app::{Message, Route},
    config::Config,
    core::Collection,
    utils::DexError,
};

/// Search the Pokémon catalog and keep a personal library and favorites list
#[derive(Debug, Parser)]
#[command(name = "pokeshelf", version, about)]
pub struct Cli {
    /// Catalog endpoint, `https://pokeapi.co/api/v2/pokemon` by default
    #[arg(long, env = "POKESHELF_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory where the collections are stored
    #[arg(long, env = "POKESHELF_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Maximum number of catalog requests in flight
    #[arg(long, global = true, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search entries by name (up to 20 results with details)
    Search { term: String },
    /// Name suggestions for a partial input (up to 8)
    Suggest { term: String },
    /// Show one entry
    Show {
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Open a page by path: `/`, `/pokemon/{id}`, `/library`, `/favorites`
    Open { path: String },
    /// List a collection
    List { collection: Collection },
    /// Add an entry to a collection
    Add {
        collection: Collection,
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Remove an entry from a collection
    Remove {
        collection: Collection,
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Add the entry if missing, remove it otherwise
    Toggle {
        collection: Collection,
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        id: i64,
    },
    /// Remove every entry from a collection
    Clear { collection: Collection },
}

impl Command {
    /// Messages that carry out the command, in order
    pub fn messages(&self) -> Result<Vec<Message>, DexError> {
        let messages = match self {
            Command::Search { term } => {
                vec![Message::Open(Route::Search), Message::Search(term.clone())]
            }
            Command::Suggest { term } => {
                vec![Message::Open(Route::Search), Message::Input(term.clone())]
            }
            Command::Show { id } => vec![Message::Open(Route::Detail(*id))],
            Command::Open { path } => vec![Message::Open(path.parse()?)],
            Command::List { collection } => vec![Message::Open(Route::Collection(*collection))],
            Command::Add { collection, id } => vec![
                Message::Open(Route::Detail(*id)),
                Message::Add(*id, *collection),
            ],
            Command::Remove { collection, id } => vec![
                Message::Open(Route::Detail(*id)),
                Message::Remove(*id, *collection),
            ],
            Command::Toggle { collection, id } => vec![
                Message::Open(Route::Detail(*id)),
                Message::Toggle(*id, *collection),
            ],
            Command::Clear { collection } => vec![
                Message::Clear(*collection),
                Message::Open(Route::Collection(*collection)),
            ],
        };

        Ok(messages)
    }
}

/// Settings the application starts with, the config file merged with command line overrides
#[derive(Clone, Debug)]
pub struct Flags {
    pub config: Config,
}

pub fn flags(cli: &Cli) -> Result<Flags, DexError> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(api_url) = &cli.api_url {
        config.api_base_url = api_url.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    if let Some(concurrency) = cli.concurrency {
        config.max_concurrent_requests = usize::from(concurrency);
    }
    config.validate()?;

    Ok(Flags { config })
}
