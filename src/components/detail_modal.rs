use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, BorderStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::entity_card::type_badges;
use super::theme::{band_color, stat_bar, ACCENT_GOLD, ACCENT_TEAL, BG_MODAL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::derive::{
    dex_number, height_meters, stat_band, stat_label, weight_kilograms, StatBarScale,
};
use crate::entity::Entity;

const DETAIL_BAR_TRACK: usize = 24;

pub struct DetailModalProps<'a> {
    pub entity: &'a Entity,
    pub scale: StatBarScale,
    pub is_focused: bool,
}

/// Full detail for the selected entity.
pub struct DetailModal {
    modal: Modal,
}

impl Default for DetailModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for DetailModal {
    type Props<'a> = DetailModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('x') => {
                    Some(Action::DetailDismiss)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 24 || area.height < 10 {
            return;
        }
        let modal_area = centered_rect(64, 22, area);
        let entity = props.entity;
        let scale = props.scale;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(5), // Header
                Constraint::Length(2), // Physical
                Constraint::Min(1),    // Stats
                Constraint::Length(1), // Footer
            ])
            .split(content_area);

            frame.render_widget(Paragraph::new(header_text(entity)), chunks[0]);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("Height ", Style::default().fg(TEXT_DIM)),
                    Span::styled(
                        format!("{:.1}m", height_meters(entity)),
                        Style::default().fg(ACCENT_TEAL),
                    ),
                    Span::styled("   Weight ", Style::default().fg(TEXT_DIM)),
                    Span::styled(
                        format!("{:.1}kg", weight_kilograms(entity)),
                        Style::default().fg(ACCENT_TEAL),
                    ),
                ])),
                chunks[1],
            );
            frame.render_widget(
                Paragraph::new(stats_text(entity, scale, chunks[2].width as usize))
                    .wrap(Wrap { trim: false }),
                chunks[2],
            );
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "Esc/Enter close",
                    Style::default().fg(TEXT_DIM),
                )),
                chunks[3],
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: detail_modal_style(),
                behavior: detail_modal_behavior(),
                on_close: || Action::DetailDismiss,
                render_content: &mut render_content,
            },
        );
    }
}

/// Mouse events are not routed to the modal; only keys dismiss it.
fn detail_modal_behavior() -> ModalBehavior {
    ModalBehavior {
        close_on_esc: true,
        close_on_backdrop: false,
    }
}

fn detail_modal_style() -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_GOLD)),
            }),
            padding: Padding::all(1),
            bg: Some(BG_MODAL),
            fg: Some(TEXT_MAIN),
        },
    }
}

fn header_text(entity: &Entity) -> Text<'static> {
    let image = if entity.has_image() {
        entity.image_url.clone()
    } else {
        "[no artwork]".to_string()
    };
    Text::from(vec![
        Line::from(vec![
            Span::styled(
                entity.name.clone(),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(dex_number(entity.id), Style::default().fg(ACCENT_GOLD)),
        ]),
        type_badges(&entity.types),
        Line::from(""),
        Line::styled(image, Style::default().fg(TEXT_DIM)),
    ])
}

fn stats_text(entity: &Entity, scale: StatBarScale, width: usize) -> Text<'static> {
    let mut lines = vec![Line::styled(
        "Stats",
        Style::default()
            .fg(TEXT_MAIN)
            .add_modifier(Modifier::BOLD),
    )];
    let room = width.saturating_sub(22).max(1);
    let track = DETAIL_BAR_TRACK.min(room);
    for stat in &entity.stats {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<16} {:>3} ", stat_label(&stat.name), stat.value)),
            Span::styled(
                stat_bar(stat.value, scale, track, room),
                Style::default().fg(band_color(stat_band(stat.value))),
            ),
        ]));
    }
    Text::from(lines)
}
