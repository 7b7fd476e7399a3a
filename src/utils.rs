// SPDX-License-Identifier: GPL-3.0-only

use crate::entities::DexStats;

/// Errors produced by the catalog, the collection store and their plumbing
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage failure for key `{key}`: {reason}")]
    Storage { key: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unknown route `{0}`")]
    Route(String),
}

/// Transforms a kebab-case string into a space-separated string where each word starts with an uppercase letter.
pub fn capitalize_string(input: &str) -> String {
    let words: Vec<&str> = input.split('-').collect();

    let capitalized_words: Vec<String> = words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            if let Some(first_char) = chars.next() {
                first_char.to_uppercase().collect::<String>() + chars.as_str()
            } else {
                String::new()
            }
        })
        .collect();

    capitalized_words.join(" ")
}

/// Helper to scale some data from PokeApi such as weight...
/// scales a number down by dividing it by 10, converting it to a floating-point
pub fn scale_numbers(num: i64) -> f64 {
    (num as f64) / 10.0
}

/// Extracts the numeric id at the end of a PokeApi resource url (`.../pokemon/25/`)
pub fn id_from_resource_url(url: &str) -> Option<i64> {
    url.trim_end_matches('/')
        .split('/')
        .next_back()
        .and_then(|s| s.parse().ok())
        .filter(|id: &i64| *id > 0)
}

/// Parses the rustemon pokemon stats to the PokeShelf ones
pub fn parse_pokemon_stats(stats: &[rustemon::model::pokemon::PokemonStat]) -> DexStats {
    let mut dex_stats = DexStats::default();

    for stat in stats {
        match stat.stat.name.as_str() {
            "hp" => dex_stats.hp = stat.base_stat,
            "attack" => dex_stats.attack = stat.base_stat,
            "defense" => dex_stats.defense = stat.base_stat,
            "special-attack" => dex_stats.sp_attack = stat.base_stat,
            "special-defense" => dex_stats.sp_defense = stat.base_stat,
            "speed" => dex_stats.speed = stat.base_stat,
            _ => {} // Ignore any unknown stats
        }
    }

    dex_stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_kebab_case() {
        assert_eq!(capitalize_string("mr-mime"), "Mr Mime");
        assert_eq!(capitalize_string("pikachu"), "Pikachu");
        assert_eq!(capitalize_string(""), "");
    }

    #[test]
    fn scales_by_ten() {
        assert_eq!(scale_numbers(69), 6.9);
        assert_eq!(scale_numbers(0), 0.0);
    }

    #[test]
    fn parses_resource_ids() {
        assert_eq!(
            id_from_resource_url("https://pokeapi.co/api/v2/pokemon/25/"),
            Some(25)
        );
        assert_eq!(
            id_from_resource_url("https://pokeapi.co/api/v2/pokemon/10001"),
            Some(10001)
        );
        assert_eq!(id_from_resource_url("https://pokeapi.co/api/v2/pokemon/"), None);
        assert_eq!(id_from_resource_url("https://pokeapi.co/api/v2/pokemon/0/"), None);
    }
}
