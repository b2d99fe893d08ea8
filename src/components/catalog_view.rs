use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, BorderStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::theme::{
    rarity_color, ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_BASE, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM,
    TEXT_MAIN,
};
use super::{Component, EntityCard, EntityCardProps};
use crate::action::Action;
use crate::derive::{dex_number, price_label, rarity_tier};
use crate::entity::Entity;
use crate::state::AppState;

const PAGE_JUMP: i16 = 10;

pub struct CatalogViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Header, paginated list, card preview and status bar.
pub struct CatalogView {
    list: SelectList,
    card: EntityCard,
    status_bar: StatusBar,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            card: EntityCard,
            status_bar: StatusBar::new(),
        }
    }
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for CatalogView {
    type Props<'a> = CatalogViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let state = props.state;
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if state.search.active {
            return match key.code {
                KeyCode::Esc => vec![Action::SearchCancel],
                KeyCode::Enter => vec![Action::SearchSubmit],
                KeyCode::Backspace => vec![Action::SearchBackspace],
                KeyCode::Char(ch)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    vec![Action::SearchInput(ch)]
                }
                _ => Vec::new(),
            };
        }

        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char('/') => vec![Action::SearchStart],
            KeyCode::Char('r') => vec![Action::CatalogRetry],
            KeyCode::Char('m') => vec![Action::PageLoadMore],
            KeyCode::Esc if !state.search.query.is_empty() => vec![Action::SearchCancel],
            KeyCode::Enter => vec![Action::CursorActivate],
            KeyCode::Char('k') => vec![Action::CursorMove(-1)],
            KeyCode::Char('j') => vec![Action::CursorMove(1)],
            KeyCode::PageUp => vec![Action::CursorMove(-PAGE_JUMP)],
            KeyCode::PageDown => vec![Action::CursorMove(PAGE_JUMP)],
            _ => {
                let items = list_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.cursor.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::CursorSet,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, props).into_iter().collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(area);

        render_header(frame, chunks[0], state);

        let body = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        self.render_list(frame, body[0], state, props.is_focused);
        self.card.render(
            frame,
            body[1],
            EntityCardProps {
                entity: state.cursor_entity(),
                scale: state.config.stat_bars,
            },
        );

        self.render_footer(frame, chunks[2], state);
    }
}

impl CatalogView {
    fn render_list(&mut self, frame: &mut Frame, area: Rect, state: &AppState, focused: bool) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("CATALOG")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.loading() {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    "Loading catalog...",
                    Style::default().fg(ACCENT_GOLD),
                )),
                inner,
            );
            return;
        }
        if let Some(error) = state.catalog.error() {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::styled(
                        "Catalog unavailable",
                        Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(error.to_string(), Style::default().fg(TEXT_DIM)),
                    Line::from(""),
                    Line::styled("press r to retry", Style::default().fg(ACCENT_TEAL)),
                ]),
                inner,
            );
            return;
        }
        if state.filtered_len() == 0 {
            let text = if state.search.query.is_empty() {
                "Catalog is empty"
            } else {
                "No matches"
            };
            frame.render_widget(
                Paragraph::new(Line::styled(text, Style::default().fg(TEXT_DIM))),
                inner,
            );
            return;
        }

        let more = state.can_load_more();
        let rows = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(if more { 1 } else { 0 }),
        ])
        .split(inner);

        let items = list_items(state);
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.cursor.min(items.len().saturating_sub(1)),
            is_focused: focused && !state.search.active,
            style: list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::CursorSet,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, rows[0], props);

        if more {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" m ", Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!(
                            "show more ({}/{})",
                            state.visible_count(),
                            state.filtered_len()
                        ),
                        Style::default().fg(TEXT_DIM),
                    ),
                ])),
                rows[1],
            );
        }
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = state.message.clone().unwrap_or_default();
        let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
        let status_items = [StatusBarItem::span(status_span)];
        let hints = status_hints(state);

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_TEAL)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let title_style = Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD);
    let counts = if state.loading() {
        "loading".to_string()
    } else {
        format!(
            "{}/{} of {}",
            state.visible_count(),
            state.filtered_len(),
            state.entities().len()
        )
    };
    let search = if state.search.active {
        format!("/{}_", state.search.query)
    } else if state.search.query.is_empty() {
        "/ to search".to_string()
    } else {
        format!("/{}", state.search.query)
    };
    let search_style = if state.search.active {
        Style::default().fg(ACCENT_GOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };

    let line = Line::from(vec![
        Span::styled("POKECATALOG", title_style),
        Span::raw("  "),
        Span::styled(counts, Style::default().fg(TEXT_DIM)),
        Span::raw("  "),
        Span::styled(search, search_style),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Clear"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    let mut hints = vec![
        StatusBarHint::new("j/k", "Move"),
        StatusBarHint::new("Enter", "Detail"),
        StatusBarHint::new("/", "Search"),
    ];
    if state.can_load_more() {
        hints.push(StatusBarHint::new("m", "More"));
    }
    if state.failed() {
        hints.push(StatusBarHint::new("r", "Retry"));
    }
    hints.push(StatusBarHint::new("q", "Quit"));
    hints
}

fn list_items(state: &AppState) -> Vec<Line<'static>> {
    state.visible().into_iter().map(list_item).collect()
}

fn list_item(entity: &Entity) -> Line<'static> {
    let tier = rarity_tier(entity.id);
    Line::from(vec![
        Span::styled(format!("{} ", tier.icon()), Style::default().fg(rarity_color(tier))),
        Span::styled(dex_number(entity.id), Style::default().fg(ACCENT_GOLD)),
        Span::raw(format!(" {:<12} ", entity.name)),
        Span::styled(entity.types.join("/"), Style::default().fg(TEXT_DIM)),
        Span::raw(" "),
        Span::styled(price_label(entity.id), Style::default().fg(ACCENT_TEAL)),
    ])
}

fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Stat;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn entity(id: u32, name: &str) -> Entity {
        Entity {
            id,
            name: name.into(),
            image_url: String::new(),
            types: vec!["water".into()],
            height: 5,
            weight: 90,
            stats: vec![Stat::new("hp", 44), Stat::new("attack", 48)],
        }
    }

    fn loaded(count: u32) -> AppState {
        let mut state = AppState::default();
        let epoch = state.begin_cycle();
        assert!(state.is_current(epoch));
        state.publish(
            (1..=count).map(|id| entity(id, &format!("Mon{id}"))).collect(),
            Vec::new(),
        );
        state
    }

    fn collect(component: &mut CatalogView, state: &AppState, event: EventKind) -> Vec<Action> {
        component
            .handle_event(
                &event,
                CatalogViewProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_browse_keys() {
        let mut component = CatalogView::new();
        let state = loaded(30);

        collect(&mut component, &state, press(KeyCode::Char('m'))).assert_first(Action::PageLoadMore);
        collect(&mut component, &state, press(KeyCode::Char('/'))).assert_first(Action::SearchStart);
        collect(&mut component, &state, press(KeyCode::Enter)).assert_first(Action::CursorActivate);
        collect(&mut component, &state, press(KeyCode::Char('j'))).assert_first(Action::CursorMove(1));
        collect(&mut component, &state, press(KeyCode::PageDown))
            .assert_first(Action::CursorMove(PAGE_JUMP));
        collect(&mut component, &state, press(KeyCode::Char('q'))).assert_first(Action::Quit);
    }

    #[test]
    fn test_search_mode_captures_characters() {
        let mut component = CatalogView::new();
        let mut state = loaded(3);
        state.search.active = true;

        collect(&mut component, &state, press(KeyCode::Char('q')))
            .assert_first(Action::SearchInput('q'));
        collect(&mut component, &state, press(KeyCode::Backspace))
            .assert_first(Action::SearchBackspace);
        collect(&mut component, &state, press(KeyCode::Esc)).assert_first(Action::SearchCancel);
        collect(&mut component, &state, press(KeyCode::Enter)).assert_first(Action::SearchSubmit);
    }

    #[test]
    fn test_search_mode_skips_chorded_characters() {
        let mut component = CatalogView::new();
        let mut state = loaded(3);
        state.search.active = true;

        let ctrl_u = EventKind::Key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        collect(&mut component, &state, ctrl_u).assert_empty();
        let alt_b = EventKind::Key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT));
        collect(&mut component, &state, alt_b).assert_empty();
        let shifted = EventKind::Key(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT));
        collect(&mut component, &state, shifted).assert_first(Action::SearchInput('B'));
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut component = CatalogView::new();
        let state = loaded(3);
        let actions: Vec<_> = component
            .handle_event(
                &press(KeyCode::Char('q')),
                CatalogViewProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_more_affordance_only_when_truncated() {
        let mut render = RenderHarness::new(100, 30);
        let mut component = CatalogView::new();

        let state = loaded(25);
        let output = render.render_to_string_plain(|frame| {
            let props = CatalogViewProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });
        assert!(output.contains("show more (20/25)"), "{output}");
        assert!(output.contains("Mon1"));

        let state = loaded(5);
        let output = render.render_to_string_plain(|frame| {
            let props = CatalogViewProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });
        assert!(!output.contains("show more"));
        assert!(output.contains("5/5 of 5"));
    }

    #[test]
    fn test_render_loading_and_failure() {
        let mut render = RenderHarness::new(100, 30);
        let mut component = CatalogView::new();

        let mut state = AppState::default();
        state.begin_cycle();
        let output = render.render_to_string_plain(|frame| {
            let props = CatalogViewProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });
        assert!(output.contains("Loading catalog..."));

        state.fail("connection refused".into());
        let output = render.render_to_string_plain(|frame| {
            let props = CatalogViewProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });
        assert!(output.contains("Catalog unavailable"));
        assert!(output.contains("press r to retry"));
    }
}
