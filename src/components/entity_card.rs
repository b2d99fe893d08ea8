use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::theme::{
    band_color, rarity_color, stat_bar, type_badge_style, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL,
    TEXT_DIM, TEXT_MAIN,
};
use super::Component;
use crate::action::Action;
use crate::derive::{
    dex_number, height_meters, price_label, stat_abbrev, stat_band, top_stats, weight_kilograms,
    CardAttributes, StatBarScale,
};
use crate::entity::Entity;

const CARD_BAR_TRACK: usize = 16;
const ENERGY_ICON: &str = "\u{26a1}";

pub struct EntityCardProps<'a> {
    pub entity: Option<&'a Entity>,
    pub scale: StatBarScale,
}

/// Summary card for the entity under the cursor.
#[derive(Default)]
pub struct EntityCard;

impl Component<Action> for EntityCard {
    type Props<'a> = EntityCardProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("CARD")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = match props.entity {
            Some(entity) => card_text(entity, props.scale, inner.width as usize),
            None => Text::from(Line::styled("[nothing to show]", Style::default().fg(TEXT_DIM))),
        };
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
    }
}

pub fn card_text(entity: &Entity, scale: StatBarScale, width: usize) -> Text<'static> {
    let card = CardAttributes::of(entity);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(dex_number(entity.id), Style::default().fg(ACCENT_GOLD)),
            Span::raw("  "),
            Span::styled(
                format!("{} {}", card.rarity.icon(), card.rarity.label()),
                Style::default().fg(rarity_color(card.rarity)),
            ),
        ]),
        Line::styled(
            entity.name.clone(),
            Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ),
        type_badges(&entity.types),
        Line::from(""),
        Line::from(vec![
            Span::raw("Price "),
            Span::styled(price_label(entity.id), Style::default().fg(ACCENT_GOLD)),
            Span::raw("  Coins "),
            Span::styled(card.coin_cost.to_string(), Style::default().fg(ACCENT_GOLD)),
        ]),
        Line::from(vec![
            Span::raw("Energy "),
            Span::styled(
                ENERGY_ICON.repeat(card.energy_icons as usize),
                Style::default().fg(ACCENT_GOLD),
            ),
        ]),
        Line::from(format!(
            "Height {:.1}m  Weight {:.1}kg",
            height_meters(entity),
            weight_kilograms(entity)
        )),
        Line::from(""),
        Line::styled("Top Stats:", Style::default().fg(TEXT_DIM)),
    ];

    let room = width.saturating_sub(10).max(1);
    let track = CARD_BAR_TRACK.min(room);
    for stat in top_stats(entity) {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<3} {:>3} ", stat_abbrev(&stat.name), stat.value)),
            Span::styled(
                stat_bar(stat.value, scale, track, room),
                Style::default().fg(band_color(stat_band(stat.value))),
            ),
        ]));
    }

    let image = if entity.has_image() {
        entity.image_url.clone()
    } else {
        "[no artwork]".to_string()
    };
    lines.push(Line::from(""));
    lines.push(Line::styled(image, Style::default().fg(TEXT_DIM)));
    Text::from(lines)
}

pub fn type_badges(types: &[String]) -> Line<'static> {
    let mut spans = Vec::with_capacity(types.len() * 2);
    for (idx, name) in types.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {name} "), type_badge_style(name)));
    }
    Line::from(spans)
}
