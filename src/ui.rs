use std::time::{Duration, Instant};

use ratatui::{prelude::*, widgets::*};
use serde_json::Value;

use crate::constants::TOAST_DURATION_MS;
use crate::messages::UiEffect;
use crate::models::{additional_representation, general_form, Dictionary, Language};

/// Presentation state owned by the terminal loop: input lock, toast and
/// results scroll offset. Changed only through [`UiEffect`]s and scrolling.
#[derive(Debug)]
pub struct LocalUi {
    pub input_enabled: bool,
    pub results_scroll: u16,
    toast: Option<(String, Instant)>,
}

impl Default for LocalUi {
    fn default() -> Self {
        LocalUi {
            input_enabled: true,
            results_scroll: 0,
            toast: None,
        }
    }
}

impl LocalUi {
    pub fn apply(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::DisableInput => self.input_enabled = false,
            UiEffect::EnableInput => self.input_enabled = true,
            UiEffect::Notify(message) => self.toast = Some((message, Instant::now())),
            UiEffect::ScrollToTop => self.results_scroll = 0,
        }
    }

    pub fn scroll_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(5);
    }

    pub fn scroll_down(&mut self) {
        self.results_scroll = self.results_scroll.saturating_add(5);
    }

    /// The toast message while it has not expired
    pub fn toast(&self) -> Option<&str> {
        self.toast_at(Instant::now())
    }

    fn toast_at(&self, now: Instant) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|(_, shown)| now.duration_since(*shown) < Duration::from_millis(TOAST_DURATION_MS))
            .map(|(message, _)| message.as_str())
    }
}

/// Color palette: blue primary, red accent
pub struct Theme;

impl Theme {
    pub const PRIMARY: Color = Color::Blue;
    pub const ACCENT: Color = Color::Red;
    pub const MUTED: Color = Color::DarkGray;
    pub const EDITING: Color = Color::Yellow;

    /// Border style for a pane
    pub fn border(focused: bool, editing: bool) -> Style {
        if focused && editing {
            Style::default().fg(Self::EDITING)
        } else if focused {
            Style::default().fg(Self::PRIMARY)
        } else {
            Style::default()
        }
    }

    pub fn highlight() -> Style {
        Style::default().fg(Self::ACCENT).bold()
    }
}

/// Renders tabs
pub fn render_tabs<'a>(titles: Vec<String>, selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.into_iter().map(Line::from).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Theme::MUTED))
        .highlight_style(Style::default().fg(Color::White).bg(Theme::PRIMARY).bold())
        .divider("|")
}

/// `"en-de  [gb] English <-> [de] German"`, or just the key when the
/// backend sent no languages
pub fn dictionary_label(dictionary: &Dictionary) -> String {
    let input = dictionary.input_language.as_ref();
    let output = dictionary.output_language.as_ref();
    if input.is_none() && output.is_none() {
        return dictionary.key().to_string();
    }

    let arrow = if dictionary.bidirectional { "<->" } else { "->" };
    format!(
        "{}  [{}] {} {} [{}] {}",
        dictionary.key(),
        Language::flag_code(input),
        Language::display_string(input),
        arrow,
        Language::flag_code(output),
        Language::display_string(output),
    )
}

/// Headword plus its additional representation, if any
fn object_text(record: &Value) -> String {
    let form = general_form(record).unwrap_or("");
    match additional_representation(record) {
        "" => form.to_string(),
        extra => format!("{} ({})", form, extra),
    }
}

/// Lines for one group of bilingual result entries. Records of unknown
/// shape are shown as compact JSON.
pub fn entry_group_lines(group: &Value) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(identifier) = group.get("groupIdentifier").and_then(Value::as_str) {
        lines.push(Line::from(Span::styled(
            identifier.to_string(),
            Style::default().fg(Theme::PRIMARY).bold(),
        )));
    }

    let Some(entries) = group.get("resultEntries").and_then(Value::as_array) else {
        lines.push(Line::from(group.to_string()));
        return lines;
    };

    for entry in entries {
        let source = entry.get("source").map(object_text).unwrap_or_default();
        let target = entry.get("target").map(object_text).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::raw(source),
            Span::styled("  <->  ", Style::default().fg(Theme::MUTED)),
            Span::styled(target, Style::default().fg(Color::Green)),
        ]));
    }
    lines
}

pub fn recommendation_label(record: &Value) -> String {
    match general_form(record) {
        Some(_) => object_text(record),
        None => record.to_string(),
    }
}

/// Title, description and link of an external content record
pub fn external_content_lines(content: &Value) -> Vec<Line<'static>> {
    let field = |name: &str| content.get(name).and_then(Value::as_str).unwrap_or("").to_string();
    let mut lines = vec![Line::from(Span::styled(field("title"), Style::default().bold()))];

    let description = field("description");
    if !description.is_empty() {
        lines.push(Line::from(description));
    }
    let link = field("link");
    if !link.is_empty() {
        lines.push(Line::from(Span::styled(
            link,
            Style::default().fg(Theme::PRIMARY).underlined(),
        )));
    }
    lines
}

/// Pretty-printed JSON with keys colored
pub fn json_lines(value: &Value) -> Vec<Line<'static>> {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed.find("\": ") {
                Some(end) if trimmed.starts_with('"') => {
                    let indent = line.len() - trimmed.len();
                    let (key, rest) = trimmed.split_at(end + 1);
                    Line::from(vec![
                        Span::raw(" ".repeat(indent)),
                        Span::styled(key.to_string(), Style::default().fg(Theme::PRIMARY)),
                        Span::raw(rest.to_string()),
                    ])
                }
                _ => Line::from(line.to_string()),
            }
        })
        .collect()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
