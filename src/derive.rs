//! Presentation-only attributes computed from an [`Entity`]
//!
//! Everything here is a pure function of canonical fields and is recomputed
//! on every render.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Stat};

/// Stat ceiling used for bar geometry.
pub const STAT_BAR_MAX: f64 = 255.0;
pub const TOP_STATS: usize = 3;
pub const HP_PER_ENERGY: u32 = 30;
pub const CURRENCY_SYMBOL: &str = "$";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RarityTier {
    Star,
    Diamond,
    Common,
}

impl RarityTier {
    pub fn label(self) -> &'static str {
        match self {
            RarityTier::Star => "star",
            RarityTier::Diamond => "diamond",
            RarityTier::Common => "common",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RarityTier::Star => "\u{2605}",
            RarityTier::Diamond => "\u{25c6}",
            RarityTier::Common => "\u{25cf}",
        }
    }
}

/// Ordinal colour band of a stat bar, lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub enum StatBand {
    Weak,
    Fair,
    Good,
    Strong,
    Elite,
}

impl StatBand {
    pub fn ordinal(self) -> u8 {
        match self {
            StatBand::Weak => 1,
            StatBand::Fair => 2,
            StatBand::Good => 3,
            StatBand::Strong => 4,
            StatBand::Elite => 5,
        }
    }
}

/// How stat values above [`STAT_BAR_MAX`] are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum StatBarScale {
    /// `value / 255 * 100`, may exceed 100.
    #[default]
    Literal,
    /// Same, capped at 100.
    Clamped,
}

/// Card-level attributes bundled for one render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CardAttributes {
    pub rarity: RarityTier,
    pub price_display: String,
    pub coin_cost: u64,
    pub energy_icons: u32,
}

impl CardAttributes {
    pub fn of(entity: &Entity) -> Self {
        Self {
            rarity: rarity_tier(entity.id),
            price_display: price_display(entity.id),
            coin_cost: coin_cost(entity.id),
            energy_icons: energy_icon_count(entity),
        }
    }
}

/// Mod 3 wins over mod 5, so 15 is a star.
pub fn rarity_tier(id: u32) -> RarityTier {
    if id % 3 == 0 {
        RarityTier::Star
    } else if id % 5 == 0 {
        RarityTier::Diamond
    } else {
        RarityTier::Common
    }
}

pub fn price(id: u32) -> f64 {
    let raw = f64::from(id) * 1.5 + 9.99;
    (raw * 100.0).round() / 100.0
}

pub fn price_display(id: u32) -> String {
    format!("{:.2}", price(id))
}

pub fn price_label(id: u32) -> String {
    format!("{CURRENCY_SYMBOL}{}", price_display(id))
}

pub fn coin_cost(id: u32) -> u64 {
    u64::from(id) * 5 + 50
}

/// The value energy is counted from: the `hp` stat, else the highest stat.
pub fn energy_source_value(entity: &Entity) -> Option<u32> {
    entity
        .stat("hp")
        .map(|stat| stat.value)
        .or_else(|| entity.stats.iter().map(|stat| stat.value).max())
}

pub fn energy_icon_count(entity: &Entity) -> u32 {
    energy_source_value(entity)
        .map(|hp| hp.div_ceil(HP_PER_ENERGY))
        .unwrap_or(0)
}

pub fn stat_band(value: u32) -> StatBand {
    match value {
        120.. => StatBand::Elite,
        100..=119 => StatBand::Strong,
        80..=99 => StatBand::Good,
        60..=79 => StatBand::Fair,
        _ => StatBand::Weak,
    }
}

pub fn stat_bar_width_percent(value: u32) -> f64 {
    f64::from(value) / STAT_BAR_MAX * 100.0
}

pub fn scaled_stat_bar_width(value: u32, scale: StatBarScale) -> f64 {
    let width = stat_bar_width_percent(value);
    match scale {
        StatBarScale::Literal => width,
        StatBarScale::Clamped => width.min(100.0),
    }
}

/// First three stats in received order, not the three highest.
pub fn top_stats(entity: &Entity) -> &[Stat] {
    let end = entity.stats.len().min(TOP_STATS);
    &entity.stats[..end]
}

pub fn dex_number(id: u32) -> String {
    format!("#{id:03}")
}

pub fn height_meters(entity: &Entity) -> f64 {
    f64::from(entity.height) / 10.0
}

pub fn weight_kilograms(entity: &Entity) -> f64 {
    f64::from(entity.weight) / 10.0
}

/// `special-attack` -> `special attack` (first dash only).
pub fn stat_label(name: &str) -> String {
    name.replacen('-', " ", 1)
}

pub fn stat_abbrev(name: &str) -> String {
    name.chars().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_with_stats(stats: &[(&str, u32)]) -> Entity {
        Entity {
            id: 1,
            name: "Test".into(),
            image_url: String::new(),
            types: vec!["normal".into()],
            height: 10,
            weight: 100,
            stats: stats
                .iter()
                .map(|(name, value)| Stat::new(*name, *value))
                .collect(),
        }
    }

    #[test]
    fn rarity_precedence() {
        assert_eq!(rarity_tier(15), RarityTier::Star);
        assert_eq!(rarity_tier(3), RarityTier::Star);
        assert_eq!(rarity_tier(5), RarityTier::Diamond);
        assert_eq!(rarity_tier(10), RarityTier::Diamond);
        assert_eq!(rarity_tier(1), RarityTier::Common);
        assert_eq!(rarity_tier(7), RarityTier::Common);
    }

    #[test]
    fn price_and_coins() {
        assert_eq!(price_display(1), "11.49");
        assert_eq!(price_display(2), "12.99");
        assert_eq!(price_display(151), "236.49");
        assert_eq!(price_label(1), "$11.49");
        assert_eq!(coin_cost(1), 55);
        assert_eq!(coin_cost(10), 100);
    }

    #[test]
    fn stat_band_boundaries() {
        assert_eq!(stat_band(120), StatBand::Elite);
        assert_eq!(stat_band(119), StatBand::Strong);
        assert_eq!(stat_band(100), StatBand::Strong);
        assert_eq!(stat_band(99), StatBand::Good);
        assert_eq!(stat_band(80), StatBand::Good);
        assert_eq!(stat_band(60), StatBand::Fair);
        assert_eq!(stat_band(59), StatBand::Weak);
        assert_eq!(stat_band(0), StatBand::Weak);
        assert_eq!(stat_band(120).ordinal(), 5);
        assert_eq!(stat_band(59).ordinal(), 1);
    }

    #[test]
    fn stat_bar_width_is_literal_unless_clamped() {
        assert_eq!(stat_bar_width_percent(255), 100.0);
        assert_eq!(stat_bar_width_percent(0), 0.0);
        assert!(stat_bar_width_percent(300) > 100.0);
        assert_eq!(scaled_stat_bar_width(300, StatBarScale::Clamped), 100.0);
        assert_eq!(
            scaled_stat_bar_width(51, StatBarScale::Clamped),
            stat_bar_width_percent(51)
        );
    }

    #[test]
    fn energy_uses_hp_case_insensitively() {
        let entity = entity_with_stats(&[("attack", 200), ("HP", 45)]);
        assert_eq!(energy_icon_count(&entity), 2);

        let entity = entity_with_stats(&[("hp", 60)]);
        assert_eq!(energy_icon_count(&entity), 2);

        let entity = entity_with_stats(&[("hp", 61)]);
        assert_eq!(energy_icon_count(&entity), 3);
    }

    #[test]
    fn energy_falls_back_to_max_stat() {
        let entity = entity_with_stats(&[("attack", 31), ("speed", 95)]);
        assert_eq!(energy_icon_count(&entity), 4);

        let entity = entity_with_stats(&[]);
        assert_eq!(energy_icon_count(&entity), 0);
    }

    #[test]
    fn top_stats_are_first_three_in_order() {
        let entity = entity_with_stats(&[("hp", 10), ("attack", 200), ("defense", 5), ("speed", 250)]);
        let names: Vec<_> = top_stats(&entity).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["hp", "attack", "defense"]);

        let short = entity_with_stats(&[("hp", 10)]);
        assert_eq!(top_stats(&short).len(), 1);
    }

    #[test]
    fn display_helpers() {
        assert_eq!(dex_number(1), "#001");
        assert_eq!(dex_number(1025), "#1025");
        let entity = entity_with_stats(&[]);
        assert_eq!(height_meters(&entity), 1.0);
        assert_eq!(weight_kilograms(&entity), 10.0);
        assert_eq!(stat_label("special-attack"), "special attack");
        assert_eq!(stat_abbrev("special-defense"), "spe");
        assert_eq!(stat_abbrev("hp"), "hp");
    }

    #[test]
    fn card_attributes_bundle() {
        let mut entity = entity_with_stats(&[("hp", 90)]);
        entity.id = 15;
        let card = CardAttributes::of(&entity);
        assert_eq!(card.rarity, RarityTier::Star);
        assert_eq!(card.price_display, "32.49");
        assert_eq!(card.coin_cost, 125);
        assert_eq!(card.energy_icons, 3);
    }
}
