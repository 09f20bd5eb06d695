//! Metadict TUI - Actor-based dictionary front-end
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - query view-model processing events
//! - Network Layer (Tokio) - async calls against the REST API

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use metadict_tui::app::{AppActor, AppState, ChannelEffects, QueryViewModel};
use metadict_tui::cli::CliArgs;
use metadict_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use metadict_tui::messages::ui_events::{key_to_ui_event, InputMode, Pane};
use metadict_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEffect, UiEvent};
use metadict_tui::network::{MetadictClient, NetworkActor};
use metadict_tui::routes::{View, ROUTES};
use metadict_tui::settings::Settings;
use metadict_tui::ui::{self, LocalUi, Theme};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Initialize logging to file
    let log_path = args.log_path();
    let log_dir = log_path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let log_name = log_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Configuration
    let settings = Settings::load(&args.config_path())?;
    let params = args.parameters(&settings)?;
    let api_url = args.api_url(&settings);
    let client = MetadictClient::new(&api_url, Duration::from_secs(settings.request_timeout_secs))
        .with_context(|| format!("cannot use API URL {}", api_url))?;
    tracing::info!(api_url = %api_url, version = APP_VERSION, "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();
    let (effect_tx, mut effect_rx) = mpsc::unbounded_channel::<UiEffect>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let vm = QueryViewModel::new(params, Box::new(ChannelEffects::new(effect_tx)));
    let state = AppState::new(vm, api_url, args.initial_view());
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx, &mut effect_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
    effect_rx: &mut mpsc::UnboundedReceiver<UiEffect>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut local = LocalUi::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state, &local))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let ctx = current_state.key_context(local.input_enabled);
                match key_to_ui_event(key, &ctx) {
                    Some(UiEvent::Quit) => {
                        let _ = ui_tx.send(UiEvent::Quit);
                        break;
                    }
                    Some(UiEvent::ScrollUp) => local.scroll_up(),
                    Some(UiEvent::ScrollDown) => local.scroll_down(),
                    Some(event) => {
                        let _ = ui_tx.send(event);
                    }
                    None => {}
                }
            }
        }

        // Check for effects and state updates (non-blocking)
        while let Ok(effect) = effect_rx.try_recv() {
            local.apply(effect);
        }
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, local: &LocalUi) {
    let area = f.area();

    // Main layout with tab bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match state.active_view {
        View::Search => draw_search_view(f, state, local, main_chunks[1]),
        View::Trainer => draw_placeholder(f, View::Trainer, main_chunks[1]),
        View::Favorites => draw_placeholder(f, View::Favorites, main_chunks[1]),
        View::About => draw_text_view(f, " About ", &about_text(state), main_chunks[1]),
        View::Help => draw_text_view(f, " Help ", HELP_TEXT, main_chunks[1]),
    }

    draw_status_bar(f, state, local, main_chunks[2]);

    // Popups
    if state.show_status {
        draw_status_popup(f, state, area);
    }

    if state.view.error {
        draw_error_popup(f, state, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let titles = ROUTES
        .iter()
        .enumerate()
        .map(|(i, (_, view))| format!(" {}:{} ", i + 1, view.title()))
        .collect();
    f.render_widget(ui::render_tabs(titles, state.active_view.index()), area);
}

fn draw_search_view(f: &mut Frame, state: &RenderState, local: &LocalUi, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Min(5),    // Dictionaries + results
        ])
        .split(area);

    draw_query_input(f, state, local, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    draw_dictionaries(f, state, body[0]);
    draw_results(f, state, local, body[1]);
}

fn draw_query_input(f: &mut Frame, state: &RenderState, local: &LocalUi, area: Rect) {
    let is_focused = state.active_pane == Pane::Query;
    let editing = state.input_mode == InputMode::Editing;

    let loading = if state.view.loading { " [...]" } else { "" };
    let locked = if local.input_enabled { "" } else { " (locked)" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border(is_focused, editing))
        .title(format!(" Query{}{} ", loading, locked));

    let input = Paragraph::new(state.query_text.as_str()).block(block);
    f.render_widget(input, area);

    // Cursor
    if is_focused && editing {
        let chars = state
            .query_text
            .get(..state.cursor_position)
            .map(|s| s.chars().count())
            .unwrap_or(0) as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + chars + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_dictionaries(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_pane == Pane::Dictionaries;

    let items: Vec<ListItem> = state
        .dictionaries
        .iter()
        .map(|d| {
            let selected = state.is_selected(d);
            let prefix = if selected { "[x]" } else { "[ ]" };
            let style = if selected {
                Style::default().fg(Theme::PRIMARY)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", prefix, ui::dictionary_label(d))).style(style)
        })
        .collect();

    let title = if state.dictionaries.is_empty() && !state.view.connected {
        " Dictionaries (connecting...) ".to_string()
    } else {
        format!(
            " Dictionaries {}/{} (Space:toggle) ",
            state.selected_dictionaries.len(),
            state.dictionaries.len()
        )
    };

    let highlight_style = if is_focused { Theme::highlight() } else { Style::default() };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border(is_focused, false))
                .title(title),
        )
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    if !state.dictionaries.is_empty() {
        list_state.select(Some(state.dictionary_cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_results(f: &mut Frame, state: &RenderState, local: &LocalUi, area: Rect) {
    let is_focused = state.active_pane == Pane::Results;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    // Entry groups
    let mut lines: Vec<Line> = Vec::new();
    for group in &state.result.entry_groups {
        lines.extend(ui::entry_group_lines(group));
        lines.push(Line::default());
    }
    if lines.is_empty() {
        let hint = if state.view.loading { "Searching..." } else { "No results. Press / to enter a query." };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(Theme::MUTED))));
    }

    let results = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border(is_focused, false))
                .title(format!(" Results ({}) ", state.result.entry_groups.len()))
                .title_bottom(Line::from(" PgUp/PgDn scroll ").right_aligned()),
        )
        .wrap(Wrap { trim: false })
        .scroll((local.results_scroll, 0));
    f.render_widget(results, columns[0]);

    // Similar recommendations
    let items: Vec<ListItem> = state
        .result
        .similar_recommendations
        .iter()
        .map(|r| ListItem::new(ui::recommendation_label(r)))
        .collect();
    let has_recommendations = !items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border(is_focused, false))
                .title(" Similar (Enter:search) "),
        )
        .highlight_style(if is_focused { Theme::highlight() } else { Style::default() });
    let mut list_state = ListState::default();
    if has_recommendations {
        list_state.select(Some(state.recommendation_cursor));
    }
    f.render_stateful_widget(list, side[0], &mut list_state);

    // External contents
    let mut lines: Vec<Line> = Vec::new();
    for content in &state.result.external_contents {
        lines.extend(ui::external_content_lines(content));
        lines.push(Line::default());
    }
    let external = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" External "))
        .wrap(Wrap { trim: true });
    f.render_widget(external, side[1]);
}

fn draw_placeholder(f: &mut Frame, view: View, area: Rect) {
    let text = format!("{} is not available in this version.", view.title());
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(Theme::MUTED)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", view.title())),
        );
    f.render_widget(paragraph, area);
}

fn draw_text_view(f: &mut Frame, title: &str, text: &str, area: Rect) {
    let paragraph = Paragraph::new(text.to_string())
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn about_text(state: &RenderState) -> String {
    format!(
        "\n {} {}\n\n A terminal front-end for the Metadict dictionary service.\n\n API: {}\n",
        APP_NAME, APP_VERSION, state.api_url
    )
}

const HELP_TEXT: &str = r#"
 NAVIGATION
   1-5                Switch view (Search, Trainer, Favorites, About, Help)
   Tab / Shift+Tab    Switch panes in the search view
   ↑ / ↓              Move in dictionaries / similar words
   PgUp / PgDn        Scroll results

 QUERY
   / or e             Edit query
   Enter              Submit query (while editing)
   Space / Enter      Toggle dictionary
   Enter              Search a similar word (results pane)
   r                  Reload dictionaries

 GENERAL
   s                  Backend status
   Esc / x            Dismiss a message
   q / Ctrl+C         Quit
"#;

fn draw_status_bar(f: &mut Frame, state: &RenderState, local: &LocalUi, area: Rect) {
    if let Some(message) = local.toast() {
        let bar = Paragraph::new(format!(" {} ", message))
            .style(Style::default().fg(Color::White).bg(Theme::ACCENT));
        f.render_widget(bar, area);
        return;
    }

    let status = if state.view.loading {
        " Loading... "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:search "
    } else {
        " Tab:pane | /:edit | Space:toggle | s:status | ?:help | q:quit "
    };
    let connection = if state.view.connected {
        Span::styled(" [+] ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" [-] ", Style::default().fg(Theme::ACCENT))
    };

    let bar = Paragraph::new(Line::from(vec![
        connection,
        Span::styled(status, Style::default().fg(Theme::MUTED)),
    ]));
    f.render_widget(bar, area);
}

fn draw_status_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = ui::centered_rect(70, 70, area);

    let lines = match (&state.status, state.view.loading_status) {
        (_, true) => vec![Line::from(" Loading status...")],
        (Some(status), false) => ui::json_lines(status),
        (None, false) => vec![Line::from(" No status available")],
    };
    let loaded_at = state
        .status_loaded_at
        .map(|t| format!(" Loaded {} ", t.format("%Y-%m-%d %H:%M:%S UTC")))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::PRIMARY))
        .title(" Status (r:reload Esc:close) ")
        .title_bottom(Line::from(loaded_at).right_aligned())
        .style(Style::default().bg(Color::Black));

    let popup = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn draw_error_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let message = state.view.error_message.as_deref().unwrap_or("");
    let (popup_area, title) = if state.view.temporal_error {
        (ui::centered_rect(60, 20, area), " Notice (Esc:dismiss) ")
    } else {
        (ui::centered_rect(60, 30, area), " Error (Enter:close q:quit) ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::ACCENT))
        .title(title)
        .style(Style::default().bg(Color::Black));

    let popup = Paragraph::new(format!("\n {}", message))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}
