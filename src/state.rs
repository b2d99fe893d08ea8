//! Catalog view state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::config::CatalogConfig;
use crate::entity::Entity;

/// Pagination window size and increment.
pub const PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    /// Search input has keyboard focus
    pub active: bool,
    /// Case-insensitive substring matched against entity names
    pub query: String,
}

/// Catalog view state, owned by the store for the lifetime of the app.
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Idle (Empty) -> Loading -> Loaded / Failed
    #[debug(section = "Catalog", label = "Data", debug_fmt)]
    pub catalog: DataResource<Vec<Entity>>,

    /// Generation token; completions from another epoch are dropped
    #[debug(section = "Catalog", label = "Epoch", debug_fmt)]
    pub epoch: u64,

    #[debug(section = "Catalog", label = "Config", debug_fmt)]
    pub config: CatalogConfig,

    /// Records skipped by a partial acquisition
    #[debug(skip)]
    pub failures: Vec<String>,

    #[debug(section = "View", label = "Search", debug_fmt)]
    pub search: SearchState,

    /// Indices into `entities()` that match the search query
    #[debug(skip)]
    pub filtered_indices: Vec<usize>,

    /// Pagination window over the filtered sequence
    #[debug(section = "View", label = "Window", debug_fmt)]
    pub page_window: usize,

    /// Keyboard cursor inside the visible window
    #[debug(section = "View", label = "Cursor", debug_fmt)]
    pub cursor: usize,

    /// Id of the entity shown in the detail view
    #[debug(section = "View", label = "Selected", debug_fmt)]
    pub selected: Option<u32>,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,

    #[debug(skip)]
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

impl AppState {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            catalog: DataResource::Empty,
            epoch: 0,
            config,
            failures: Vec::new(),
            search: SearchState::default(),
            filtered_indices: Vec::new(),
            page_window: PAGE_SIZE,
            cursor: 0,
            selected: None,
            message: None,
            terminal_size: (80, 24),
        }
    }

    /// Loaded entities in listing order, empty unless the catalog is ready.
    pub fn entities(&self) -> &[Entity] {
        self.catalog.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn loading(&self) -> bool {
        self.catalog.is_loading()
    }

    pub fn failed(&self) -> bool {
        self.catalog.is_failed()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Entity> + '_ {
        let entities = self.entities();
        self.filtered_indices
            .iter()
            .filter_map(move |idx| entities.get(*idx))
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered_indices.len()
    }

    /// `min(page_window, filtered length)`
    pub fn visible_count(&self) -> usize {
        self.page_window.min(self.filtered_len())
    }

    pub fn visible(&self) -> Vec<&Entity> {
        self.filtered().take(self.visible_count()).collect()
    }

    /// The "show more" affordance.
    pub fn can_load_more(&self) -> bool {
        !self.loading() && self.visible_count() < self.filtered_len()
    }

    pub fn load_more(&mut self) -> bool {
        if !self.can_load_more() {
            return false;
        }
        self.page_window += PAGE_SIZE;
        true
    }

    pub fn rebuild_filtered(&mut self) {
        let query = self.search.query.to_lowercase();
        self.filtered_indices = self
            .entities()
            .iter()
            .enumerate()
            .filter(|(_, entity)| entity.matches(&query))
            .map(|(idx, _)| idx)
            .collect();
        self.clamp_cursor();
    }

    /// Replace the search query. Returns false when nothing changed.
    pub fn set_search_query(&mut self, query: String) -> bool {
        if self.search.query == query {
            return false;
        }
        self.search.query = query;
        self.page_window = PAGE_SIZE;
        self.cursor = 0;
        self.rebuild_filtered();
        true
    }

    pub fn entity_by_id(&self, id: u32) -> Option<&Entity> {
        self.entities().iter().find(|entity| entity.id == id)
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selected.and_then(|id| self.entity_by_id(id))
    }

    /// Select by id; unknown ids are ignored.
    pub fn select(&mut self, id: u32) -> bool {
        if self.entity_by_id(id).is_none() || self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn dismiss(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn cursor_entity(&self) -> Option<&Entity> {
        if self.cursor >= self.visible_count() {
            return None;
        }
        self.filtered().nth(self.cursor)
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        let visible = self.visible_count();
        if visible == 0 {
            self.cursor = 0;
            return false;
        }
        let bounded = index.min(visible - 1);
        if bounded == self.cursor {
            return false;
        }
        self.cursor = bounded;
        true
    }

    pub fn move_cursor(&mut self, delta: i16) -> bool {
        let next = if delta.is_negative() {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.cursor.saturating_add(delta as usize)
        };
        self.set_cursor(next)
    }

    fn clamp_cursor(&mut self) {
        let visible = self.visible_count();
        if self.cursor >= visible {
            self.cursor = visible.saturating_sub(1);
        }
    }

    /// Enter Loading for a new cycle and return the epoch it must report back.
    pub fn begin_cycle(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.catalog = DataResource::Loading;
        self.failures.clear();
        self.filtered_indices.clear();
        self.selected = None;
        self.cursor = 0;
        self.message = None;
        self.epoch
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.loading()
    }

    /// Publish a finished cycle atomically.
    pub fn publish(&mut self, entities: Vec<Entity>, failures: Vec<String>) {
        self.catalog = DataResource::Loaded(entities);
        self.message = if failures.is_empty() {
            None
        } else {
            Some(format!("{} entries could not be loaded", failures.len()))
        };
        self.failures = failures;
        self.rebuild_filtered();
    }

    pub fn fail(&mut self, error: String) {
        self.message = Some(format!("Catalog error: {error}"));
        self.catalog = DataResource::Failed(error);
        self.filtered_indices.clear();
        self.cursor = 0;
    }

    /// Invalidate any in-flight cycle; its completion will be ignored.
    pub fn teardown(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}
