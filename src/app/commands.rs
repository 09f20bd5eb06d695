//! Command handlers - turn UI events into view-model operations

use crate::app::AppState;
use crate::constants::MSG_ILLEGAL_STRUCTURE;
use crate::messages::ui_events::{InputMode, Pane};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::general_form;
use crate::routes::View;

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_view(&mut self, view: View) {
        tracing::debug!(path = view.path(), "Switching view");
        self.active_view = view;
        self.input_mode = InputMode::Normal;
    }

    pub fn next_pane(&mut self) {
        self.active_pane = self.active_pane.next();
        self.input_mode = InputMode::Normal;
    }

    pub fn prev_pane(&mut self) {
        self.active_pane = self.active_pane.prev();
        self.input_mode = InputMode::Normal;
    }

    // ========================
    // Query input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.active_view = View::Search;
        self.active_pane = Pane::Query;
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.query_text().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.query_text();
        let cursor = char_boundary_at_or_below(input, self.cursor_position);
        if cursor > 0 {
            self.cursor_position = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.query_text();
        let cursor = char_boundary_at_or_below(input, self.cursor_position);
        if cursor < input.len() {
            self.cursor_position = input[cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| cursor + i)
                .unwrap_or(input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let mut text = self.query_text().to_string();
        let cursor = char_boundary_at_or_below(&text, self.cursor_position);
        text.insert(cursor, c);
        self.cursor_position = cursor + c.len_utf8();
        self.vm.set_query_text(Some(text));
    }

    pub fn delete_char(&mut self) {
        let mut text = self.query_text().to_string();
        let cursor = char_boundary_at_or_below(&text, self.cursor_position);
        if cursor == 0 {
            return;
        }
        let prev = text[..cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        text.remove(prev);
        self.cursor_position = prev;
        self.vm.set_query_text(if text.is_empty() { None } else { Some(text) });
    }

    // ========================
    // Queries
    // ========================

    pub fn submit_query(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        self.vm.submit_query()
    }

    pub fn reload_dictionaries(&mut self) -> NetworkCommand {
        self.vm.initialize()
    }

    /// Query again for the highlighted similar recommendation
    pub fn requery_selected(&mut self) -> Option<NetworkCommand> {
        let word = self
            .vm
            .result()
            .similar_recommendations
            .get(self.recommendation_cursor)
            .and_then(general_form)
            .map(str::to_string)?;
        self.recommendation_cursor = 0;
        self.cursor_position = word.len();
        self.vm.requery(&word)
    }

    // ========================
    // Dictionary list
    // ========================

    pub fn next_dictionary(&mut self) {
        let len = self.vm.query().available_dictionaries.len();
        if len > 0 {
            self.dictionary_cursor = (self.dictionary_cursor + 1) % len;
        }
    }

    pub fn prev_dictionary(&mut self) {
        let len = self.vm.query().available_dictionaries.len();
        if len > 0 {
            self.dictionary_cursor = self.dictionary_cursor.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn toggle_dictionary(&mut self) {
        let dictionaries = &self.vm.query().available_dictionaries;
        if dictionaries.is_empty() {
            return;
        }
        let dictionary = dictionaries.get(self.dictionary_cursor).cloned();
        if let Err(err) = self.vm.toggle_dictionary_selection(dictionary.as_ref()) {
            tracing::warn!(%err, cursor = self.dictionary_cursor, "Cannot toggle dictionary");
            self.vm.report_error(MSG_ILLEGAL_STRUCTURE, false);
        }
    }

    // ========================
    // Similar recommendations
    // ========================

    pub fn next_recommendation(&mut self) {
        let len = self.vm.result().similar_recommendations.len();
        if len > 0 {
            self.recommendation_cursor = (self.recommendation_cursor + 1) % len;
        }
    }

    pub fn prev_recommendation(&mut self) {
        let len = self.vm.result().similar_recommendations.len();
        if len > 0 {
            self.recommendation_cursor = self.recommendation_cursor.checked_sub(1).unwrap_or(len - 1);
        }
    }

    // ========================
    // Status dialog and errors
    // ========================

    pub fn open_status(&mut self) -> NetworkCommand {
        self.vm.open_status_dialog()
    }

    pub fn close_status(&mut self) {
        self.vm.close_status_dialog();
    }

    pub fn close_error(&mut self) {
        self.vm.close_error();
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        let text_before = self.query_text().to_string();
        let follow_up = self.vm.handle_response(response);
        if self.query_text() != text_before {
            // Replaced from the initial parameters
            self.cursor_position = self.query_text().len();
        }
        self.clamp_cursors();
        follow_up
    }

    /// Keep list cursors inside lists that may have shrunk
    fn clamp_cursors(&mut self) {
        let dictionaries = self.vm.query().available_dictionaries.len();
        if self.dictionary_cursor >= dictionaries {
            self.dictionary_cursor = dictionaries.saturating_sub(1);
        }
        let recommendations = self.vm.result().similar_recommendations.len();
        if self.recommendation_cursor >= recommendations {
            self.recommendation_cursor = recommendations.saturating_sub(1);
        }
        self.cursor_position = char_boundary_at_or_below(self.query_text(), self.cursor_position);
    }
}

/// Largest char boundary of `text` not above `index`
fn char_boundary_at_or_below(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
