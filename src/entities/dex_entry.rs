// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Debug;

use rustemon::model::pokemon::Pokemon;
use serde::{Deserialize, Serialize};

use crate::utils::{parse_pokemon_stats, scale_numbers};

const ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// One full catalog record, as shown in the detail and collection pages
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DexEntry {
    pub id: i64,
    pub name: String,
    /// Decimetres, as sent by PokeApi
    pub height: i64,
    /// Hectograms, as sent by PokeApi
    pub weight: i64,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: DexStats,
    pub sprite_url: Option<String>,
    pub artwork_url: Option<String>,
}

impl Debug for DexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DexEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl DexEntry {
    /// Height in metres
    pub fn height_m(&self) -> f64 {
        scale_numbers(self.height)
    }

    /// Weight in kilograms
    pub fn weight_kg(&self) -> f64 {
        scale_numbers(self.weight)
    }

    /// Preferred image for the entry, the official artwork when known
    pub fn image_url(&self) -> Option<&str> {
        self.artwork_url.as_deref().or(self.sprite_url.as_deref())
    }
}

impl From<Pokemon> for DexEntry {
    fn from(pokemon: Pokemon) -> Self {
        let artwork_url = (pokemon.id > 0).then(|| format!("{ARTWORK_BASE_URL}/{}.png", pokemon.id));

        DexEntry {
            id: pokemon.id,
            types: pokemon
                .types
                .iter()
                .map(|types| types.type_.name.to_string())
                .collect(),
            abilities: pokemon
                .abilities
                .iter()
                .map(|a| {
                    if a.is_hidden {
                        format!("{} (HIDDEN)", a.ability.name)
                    } else {
                        a.ability.name.clone()
                    }
                })
                .collect(),
            stats: parse_pokemon_stats(&pokemon.stats),
            sprite_url: pokemon.sprites.front_default,
            artwork_url,
            name: pokemon.name,
            height: pokemon.height,
            weight: pokemon.weight,
        }
    }
}

/// Pokémon base statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexStats {
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub sp_attack: i64,
    pub sp_defense: i64,
    pub speed: i64,
}

impl DexStats {
    /// Highest value a single base stat can take
    pub const MAX_BASE_STAT: i64 = 255;

    /// Returns the total value of all the stats
    pub fn total(&self) -> i64 {
        self.hp + self.attack + self.defense + self.sp_attack + self.sp_defense + self.speed
    }

    /// Stats paired with their PokeApi names, in display order
    pub fn named(&self) -> [(&'static str, i64); 6] {
        [
            ("hp", self.hp),
            ("attack", self.attack),
            ("defense", self.defense),
            ("special-attack", self.sp_attack),
            ("special-defense", self.sp_defense),
            ("speed", self.speed),
        ]
    }
}
