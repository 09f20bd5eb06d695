//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::app::view_model::ViewState;
use crate::messages::ui_events::{InputMode, KeyContext, Pane};
use crate::models::{Dictionary, QueryResult};
use crate::routes::View;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Navigation
    pub active_view: View,
    pub active_pane: Pane,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Query
    pub query_text: String,
    pub dictionaries: Vec<Dictionary>,
    pub selected_dictionaries: Vec<String>,
    pub dictionary_cursor: usize,

    // Results
    pub result: QueryResult,
    pub recommendation_cursor: usize,

    // Progress and errors
    pub view: ViewState,

    // Status dialog
    pub show_status: bool,
    pub status: Option<Value>,
    pub status_loaded_at: Option<DateTime<Utc>>,

    pub api_url: String,
}

impl RenderState {
    /// Key-mapping context for this frame. Input locking is owned by the UI loop.
    pub fn key_context(&self, input_enabled: bool) -> KeyContext {
        KeyContext {
            view: self.active_view,
            pane: self.active_pane,
            input_mode: self.input_mode,
            input_enabled,
            show_status: self.show_status,
            error: self.view.error,
            temporal_error: self.view.temporal_error,
        }
    }

    pub fn is_selected(&self, dictionary: &Dictionary) -> bool {
        self.selected_dictionaries.iter().any(|k| k == dictionary.key())
    }
}
