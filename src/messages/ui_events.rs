//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::routes::View;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // View navigation
    SwitchView(View),

    // Pane navigation
    NextPane,
    PrevPane,

    // Query input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Query actions
    SubmitQuery,
    ReloadDictionaries,

    // Dictionary list
    NextDictionary,
    PrevDictionary,
    ToggleDictionary,

    // Similar recommendations
    NextRecommendation,
    PrevRecommendation,
    Requery,

    // Results scrolling (handled by the UI loop)
    ScrollUp,
    ScrollDown,

    // Status dialog
    OpenStatus,
    CloseStatus,

    // Errors
    CloseError,

    // System
    Quit,
}

/// Focusable pane of the search view
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Pane {
    #[default]
    Query,
    Dictionaries,
    Results,
}

impl Pane {
    pub fn next(&self) -> Pane {
        match self {
            Pane::Query => Pane::Dictionaries,
            Pane::Dictionaries => Pane::Results,
            Pane::Results => Pane::Query,
        }
    }

    pub fn prev(&self) -> Pane {
        match self {
            Pane::Query => Pane::Results,
            Pane::Dictionaries => Pane::Query,
            Pane::Results => Pane::Dictionaries,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What the key mapper needs to know about the current screen
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyContext {
    pub view: View,
    pub pane: Pane,
    pub input_mode: InputMode,
    pub input_enabled: bool,
    pub show_status: bool,
    pub error: bool,
    pub temporal_error: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: &KeyContext) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // A persistent error blocks everything until dismissed
    if ctx.error {
        match key.code {
            KeyCode::Esc => return Some(UiEvent::CloseError),
            KeyCode::Char('x') if ctx.input_mode == InputMode::Normal => {
                return Some(UiEvent::CloseError)
            }
            KeyCode::Enter if !ctx.temporal_error => return Some(UiEvent::CloseError),
            KeyCode::Char('q') if !ctx.temporal_error => return Some(UiEvent::Quit),
            _ if !ctx.temporal_error => return None,
            _ => {}
        }
    }

    if ctx.show_status {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('s') => Some(UiEvent::CloseStatus),
            KeyCode::Char('r') => Some(UiEvent::OpenStatus),
            _ => None,
        };
    }

    match ctx.input_mode {
        InputMode::Editing => handle_editing_keys(key, ctx.input_enabled),
        InputMode::Normal => handle_normal_keys(key, ctx),
    }
}

fn handle_editing_keys(key: KeyEvent, input_enabled: bool) -> Option<UiEvent> {
    if !input_enabled {
        // Input is locked while a query is running
        return match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Enter => Some(UiEvent::SubmitQuery),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_normal_keys(key: KeyEvent, ctx: &KeyContext) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::SwitchView(View::Help)),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            return View::from_index(index).map(UiEvent::SwitchView);
        }
        KeyCode::Char('s') => return Some(UiEvent::OpenStatus),
        KeyCode::Char('r') => return Some(UiEvent::ReloadDictionaries),
        KeyCode::PageUp => return Some(UiEvent::ScrollUp),
        KeyCode::PageDown => return Some(UiEvent::ScrollDown),
        _ => {}
    }

    if ctx.view != View::Search {
        return None;
    }

    match key.code {
        KeyCode::Tab => Some(UiEvent::NextPane),
        KeyCode::BackTab => Some(UiEvent::PrevPane),
        KeyCode::Char('/') if ctx.input_enabled => Some(UiEvent::StartEditing),
        KeyCode::Char('e') if ctx.input_enabled && ctx.pane == Pane::Query => {
            Some(UiEvent::StartEditing)
        }
        KeyCode::Enter => match ctx.pane {
            Pane::Query if ctx.input_enabled => Some(UiEvent::StartEditing),
            Pane::Query => None,
            Pane::Dictionaries => Some(UiEvent::ToggleDictionary),
            Pane::Results => Some(UiEvent::Requery),
        },
        KeyCode::Char(' ') if ctx.pane == Pane::Dictionaries => Some(UiEvent::ToggleDictionary),
        KeyCode::Up => match ctx.pane {
            Pane::Dictionaries => Some(UiEvent::PrevDictionary),
            Pane::Results => Some(UiEvent::PrevRecommendation),
            Pane::Query => None,
        },
        KeyCode::Down => match ctx.pane {
            Pane::Dictionaries => Some(UiEvent::NextDictionary),
            Pane::Results => Some(UiEvent::NextRecommendation),
            Pane::Query => None,
        },
        _ => None,
    }
}
