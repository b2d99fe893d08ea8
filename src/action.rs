//! Actions: user intents and acquisition results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Mount: start the first acquisition cycle
    Init,

    // ===== Catalog category =====
    /// Result: cycle `epoch` finished
    CatalogDidLoad {
        epoch: u64,
        entities: Vec<Entity>,
        failures: Vec<String>,
    },
    /// Result: cycle `epoch` failed, nothing published
    CatalogDidError { epoch: u64, error: String },
    /// Start a new cycle after a failure
    CatalogRetry,

    // ===== Page category =====
    /// Grow the pagination window by one page
    PageLoadMore,

    // ===== Search category =====
    SearchStart,
    SearchSubmit,
    SearchCancel,
    SearchInput(char),
    SearchBackspace,
    /// Replace the whole search term
    SearchSet(String),

    // ===== Cursor category =====
    CursorMove(i16),
    CursorSet(usize),
    /// Select the entity under the cursor
    CursorActivate,

    // ===== Detail category =====
    DetailSelect(u32),
    DetailDismiss,

    // ===== UI category =====
    UiTerminalResize(u16, u16),

    /// Exit the application
    Quit,
}
