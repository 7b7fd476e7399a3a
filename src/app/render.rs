// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Write;

use crate::{
    entities::{DexEntry, DexStats},
    utils::capitalize_string,
};

const BAR_WIDTH: usize = 30;

/// Share of the maximum base stat, as a percentage
pub fn stat_percentage(value: i64) -> f64 {
    (value.clamp(0, DexStats::MAX_BASE_STAT) as f64 / DexStats::MAX_BASE_STAT as f64) * 100.0
}

/// Fixed width text bar for a base stat
pub fn stat_bar(value: i64) -> String {
    let filled = ((stat_percentage(value) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// One line summary used in grids
pub fn entry_card(entry: &DexEntry) -> String {
    format!(
        "  #{:03} {:<16} [{}]",
        entry.id,
        capitalize_string(&entry.name),
        entry.types.join(", ")
    )
}

/// Full entry page
pub fn entry_details(entry: &DexEntry) -> String {
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "#{:03} {}", entry.id, capitalize_string(&entry.name));
    let _ = writeln!(out, "Types: {}", entry.types.join(", "));
    let _ = writeln!(
        out,
        "Height: {} m   Weight: {} kg",
        entry.height_m(),
        entry.weight_kg()
    );
    let _ = writeln!(
        out,
        "Abilities: {}",
        entry
            .abilities
            .iter()
            .map(|ability| ability.replace('-', " "))
            .collect::<Vec<String>>()
            .join(", ")
    );
    if let Some(url) = entry.image_url() {
        let _ = writeln!(out, "Image: {url}");
    }

    let _ = writeln!(out, "Stats:");
    for (name, value) in entry.stats.named() {
        let _ = writeln!(
            out,
            "  {:<16} {:>3} {}",
            name.replace('-', " "),
            value,
            stat_bar(value)
        );
    }
    let _ = writeln!(out, "  {:<16} {:>3}", "total", entry.stats.total());

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulbasaur() -> DexEntry {
        DexEntry {
            id: 1,
            name: String::from("bulbasaur"),
            height: 7,
            weight: 69,
            types: vec![String::from("grass"), String::from("poison")],
            abilities: vec![
                String::from("overgrow"),
                String::from("chlorophyll (HIDDEN)"),
            ],
            stats: DexStats {
                hp: 45,
                attack: 49,
                defense: 49,
                sp_attack: 65,
                sp_defense: 65,
                speed: 45,
            },
            sprite_url: Some(String::from("https://example.test/1.png")),
            artwork_url: None,
        }
    }

    #[test]
    fn bars_scale_to_max_stat() {
        assert_eq!(stat_percentage(255), 100.0);
        assert_eq!(stat_percentage(0), 0.0);
        assert_eq!(stat_percentage(300), 100.0);

        assert_eq!(stat_bar(255).chars().filter(|c| *c == '█').count(), 30);
        assert_eq!(stat_bar(0).chars().filter(|c| *c == '░').count(), 30);
        assert_eq!(stat_bar(51).chars().count(), 30);
    }

    #[test]
    fn details_show_display_units() {
        let text = entry_details(&bulbasaur());

        assert!(text.starts_with("#001 Bulbasaur\n"));
        assert!(text.contains("Height: 0.7 m   Weight: 6.9 kg"));
        assert!(text.contains("Types: grass, poison"));
        assert!(text.contains("chlorophyll (HIDDEN)"));
        assert!(text.contains("special attack"));
        assert!(text.contains("total            318"));
        assert!(text.contains("Image: https://example.test/1.png"));
    }

    #[test]
    fn card_is_single_line() {
        let card = entry_card(&bulbasaur());
        assert!(!card.contains('\n'));
        assert!(card.contains("#001 Bulbasaur"));
    }
}
