//! Pokecatalog - browsable creature catalog on tui-dispatch

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokecatalog::acquire;
use pokecatalog::action::Action;
use pokecatalog::components::{
    CatalogView, CatalogViewProps, Component, DetailModal, DetailModalProps,
};
use pokecatalog::config::{CatalogArgs, CatalogConfig};
use pokecatalog::effect::Effect;
use pokecatalog::logging;
use pokecatalog::reducer::reducer;
use pokecatalog::state::AppState;

/// Browse the PokeAPI catalog as trading cards
#[derive(Parser, Debug)]
#[command(name = "pokecatalog")]
#[command(about = "Browsable PokeAPI catalog with card-style details")]
struct Args {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CatalogComponentId {
    Catalog,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CatalogContext {
    Browse,
    Detail,
}

impl EventRoutingState<CatalogComponentId, CatalogContext> for AppState {
    fn focused(&self) -> Option<CatalogComponentId> {
        if self.selected.is_some() {
            Some(CatalogComponentId::Detail)
        } else {
            Some(CatalogComponentId::Catalog)
        }
    }

    fn modal(&self) -> Option<CatalogComponentId> {
        self.selected.map(|_| CatalogComponentId::Detail)
    }

    fn binding_context(&self, id: CatalogComponentId) -> CatalogContext {
        match id {
            CatalogComponentId::Catalog => CatalogContext::Browse,
            CatalogComponentId::Detail => CatalogContext::Detail,
        }
    }

    fn default_context(&self) -> CatalogContext {
        CatalogContext::Browse
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        catalog: catalog_args,
        debug: debug_args,
    } = Args::parse();

    logging::init(catalog_args.log_file.as_deref())?;
    let config = CatalogConfig::from(&catalog_args);
    tracing::info!(base_url = %config.base_url, policy = ?config.policy, "starting");

    let debug = DebugSession::new(debug_args);

    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(config))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("shutdown");
    Ok(())
}

struct CatalogUi {
    catalog: CatalogView,
    detail: DetailModal,
}

impl CatalogUi {
    fn new() -> Self {
        Self {
            catalog: CatalogView::new(),
            detail: DetailModal::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CatalogComponentId>,
    ) {
        event_ctx.set_component_area(CatalogComponentId::Catalog, area);

        let props = CatalogViewProps {
            state,
            is_focused: render_ctx.is_focused() && state.selected.is_none(),
        };
        self.catalog.render(frame, area, props);

        match state.selected_entity() {
            Some(entity) => {
                event_ctx.set_component_area(CatalogComponentId::Detail, area);
                let props = DetailModalProps {
                    entity,
                    scale: state.config.stat_bars,
                    is_focused: render_ctx.is_focused(),
                };
                self.detail.render(frame, area, props);
            }
            None => {
                event_ctx
                    .component_areas
                    .remove(&CatalogComponentId::Detail);
            }
        }
    }

    fn handle_catalog_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = CatalogViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .catalog
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(entity) = state.selected_entity() else {
            return HandlerResponse::ignored();
        };
        let props = DetailModalProps {
            entity,
            scale: state.config.stat_bars,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CatalogUi::new()));
    let mut bus: EventBus<AppState, Action, CatalogComponentId, CatalogContext> = EventBus::new();
    let keybindings: Keybindings<CatalogContext> = Keybindings::new();

    let ui_catalog = Rc::clone(&ui);
    bus.register(CatalogComponentId::Catalog, move |event, state| {
        ui_catalog
            .borrow_mut()
            .handle_catalog_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(CatalogComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog { epoch, config } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                acquire::run_cycle(epoch, &config).await
            });
        }
    }
}
