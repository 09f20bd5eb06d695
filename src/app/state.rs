//! App state - navigation state around the query view-model, no I/O

use crate::app::view_model::QueryViewModel;
use crate::messages::ui_events::{InputMode, Pane};
use crate::messages::RenderState;
use crate::routes::View;

/// Main application state
pub struct AppState {
    // View navigation
    pub active_view: View,
    pub active_pane: Pane,

    // Query input editing
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // List cursors
    pub dictionary_cursor: usize,
    pub recommendation_cursor: usize,

    pub api_url: String,

    pub vm: QueryViewModel,
}

impl AppState {
    pub fn new(vm: QueryViewModel, api_url: impl Into<String>, view: View) -> Self {
        AppState {
            active_view: view,
            active_pane: Pane::Query,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            dictionary_cursor: 0,
            recommendation_cursor: 0,
            api_url: api_url.into(),
            vm,
        }
    }

    /// Current query text (empty if none)
    pub fn query_text(&self) -> &str {
        self.vm.query().query_text.as_deref().unwrap_or("")
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let query = self.vm.query();
        RenderState {
            active_view: self.active_view,
            active_pane: self.active_pane,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position.min(self.query_text().len()),
            query_text: self.query_text().to_string(),
            dictionaries: query.available_dictionaries.clone(),
            selected_dictionaries: query.selected_dictionaries.clone(),
            dictionary_cursor: self.dictionary_cursor,
            result: self.vm.result().clone(),
            recommendation_cursor: self.recommendation_cursor,
            view: self.vm.view().clone(),
            show_status: self.vm.is_status_dialog_open(),
            status: self.vm.status().cloned(),
            status_loaded_at: self.vm.status_loaded_at(),
            api_url: self.api_url.clone(),
        }
    }
}
