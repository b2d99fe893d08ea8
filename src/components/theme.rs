use ratatui::style::{Color, Modifier, Style};

use crate::derive::{scaled_stat_bar_width, RarityTier, StatBand, StatBarScale};

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_MODAL: Color = Color::Rgb(26, 40, 58);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_RED: Color = Color::Rgb(226, 88, 80);

const BAR_FILL: char = '\u{2588}';
const BAR_TRACK: char = '\u{2591}';

/// Badge colour per type; unknown types fall back to grey.
pub fn type_color(name: &str) -> Color {
    match name {
        "normal" => Color::Rgb(156, 163, 175),
        "fire" => Color::Rgb(239, 68, 68),
        "water" => Color::Rgb(59, 130, 246),
        "electric" => Color::Rgb(250, 204, 21),
        "grass" => Color::Rgb(34, 197, 94),
        "ice" => Color::Rgb(147, 197, 253),
        "fighting" => Color::Rgb(185, 28, 28),
        "poison" => Color::Rgb(168, 85, 247),
        "ground" => Color::Rgb(161, 98, 7),
        "flying" => Color::Rgb(96, 165, 250),
        "psychic" => Color::Rgb(147, 51, 234),
        "bug" => Color::Rgb(22, 163, 74),
        "rock" => Color::Rgb(75, 85, 99),
        "ghost" => Color::Rgb(126, 34, 206),
        "dragon" => Color::Rgb(79, 70, 229),
        "dark" => Color::Rgb(31, 41, 55),
        "steel" => Color::Rgb(107, 114, 128),
        "fairy" => Color::Rgb(244, 114, 182),
        _ => Color::Rgb(107, 114, 128),
    }
}

pub fn type_badge_style(name: &str) -> Style {
    let fg = match name {
        "electric" => Color::Rgb(31, 41, 55),
        _ => Color::White,
    };
    Style::default()
        .bg(type_color(name))
        .fg(fg)
        .add_modifier(Modifier::BOLD)
}

pub fn band_color(band: StatBand) -> Color {
    match band {
        StatBand::Elite => Color::Rgb(34, 197, 94),
        StatBand::Strong => Color::Rgb(59, 130, 246),
        StatBand::Good => Color::Rgb(168, 85, 247),
        StatBand::Fair => Color::Rgb(234, 179, 8),
        StatBand::Weak => Color::Rgb(239, 68, 68),
    }
}

pub fn rarity_color(tier: RarityTier) -> Color {
    match tier {
        RarityTier::Star => ACCENT_GOLD,
        RarityTier::Diamond => ACCENT_TEAL,
        RarityTier::Common => TEXT_DIM,
    }
}

/// Filled cells of a `track`-wide bar. Literal widths above 100% run past
/// the track but never past `room`.
pub fn bar_cells(value: u32, scale: StatBarScale, track: usize, room: usize) -> usize {
    let percent = scaled_stat_bar_width(value, scale);
    let cells = (percent / 100.0 * track as f64).round() as usize;
    cells.min(room)
}

pub fn stat_bar(value: u32, scale: StatBarScale, track: usize, room: usize) -> String {
    let filled = bar_cells(value, scale, track, room);
    let mut bar: String = std::iter::repeat(BAR_FILL).take(filled).collect();
    bar.extend(std::iter::repeat(BAR_TRACK).take(track.saturating_sub(filled)));
    bar
}
