//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            if !state.catalog.is_empty() {
                return DispatchResult::unchanged();
            }
            let epoch = state.begin_cycle();
            tracing::info!(epoch, "catalog cycle started");
            DispatchResult::changed_with(Effect::LoadCatalog {
                epoch,
                config: state.config.clone(),
            })
        }

        Action::CatalogRetry => {
            if !state.failed() {
                return DispatchResult::unchanged();
            }
            let epoch = state.begin_cycle();
            tracing::info!(epoch, "catalog cycle retried");
            DispatchResult::changed_with(Effect::LoadCatalog {
                epoch,
                config: state.config.clone(),
            })
        }

        Action::CatalogDidLoad {
            epoch,
            entities,
            failures,
        } => {
            if !state.is_current(epoch) {
                tracing::debug!(epoch, current = state.epoch, "stale catalog load dropped");
                return DispatchResult::unchanged();
            }
            tracing::info!(epoch, entities = entities.len(), "catalog ready");
            state.publish(entities, failures);
            DispatchResult::changed()
        }

        Action::CatalogDidError { epoch, error } => {
            if !state.is_current(epoch) {
                tracing::debug!(epoch, current = state.epoch, "stale catalog error dropped");
                return DispatchResult::unchanged();
            }
            tracing::warn!(epoch, %error, "catalog failed");
            state.fail(error);
            DispatchResult::changed()
        }

        Action::PageLoadMore => changed_if(state.load_more()),

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.set_search_query(String::new());
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            let mut query = state.search.query.clone();
            query.push(ch);
            changed_if(state.set_search_query(query))
        }

        Action::SearchBackspace => {
            let mut query = state.search.query.clone();
            if query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            changed_if(state.set_search_query(query))
        }

        Action::SearchSet(query) => changed_if(state.set_search_query(query)),

        Action::CursorMove(delta) => changed_if(state.move_cursor(delta)),

        Action::CursorSet(index) => changed_if(state.set_cursor(index)),

        Action::CursorActivate => {
            let Some(id) = state.cursor_entity().map(|entity| entity.id) else {
                return DispatchResult::unchanged();
            };
            changed_if(state.select(id))
        }

        Action::DetailSelect(id) => changed_if(state.select(id)),

        Action::DetailDismiss => changed_if(state.dismiss()),

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Quit => {
            state.teardown();
            DispatchResult::unchanged()
        }
    }
}

fn changed_if(changed: bool) -> DispatchResult<Effect> {
    if changed {
        DispatchResult::changed()
    } else {
        DispatchResult::unchanged()
    }
}
