//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the glass themed player using `ratatui` and reports
//! where the interactive widgets ended up so mouse input can be mapped back.

use std::str::FromStr;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, LineGauge, List, ListItem, ListState, Padding, Paragraph},
};

use crate::app::{App, Control, InputMode};
use crate::audio::PlaybackEngine;
use crate::config::{ControlsSettings, ThemeSettings, UiSettings};
use crate::coordinator::{Coordinator, PlaybackStatus};

/// Screen areas of the interactive widgets from the last frame.
#[derive(Clone, Debug, Default)]
pub struct UiLayout {
    pub slider: Rect,
    /// Inner area of the playlist (rows only, without borders).
    pub list: Rect,
    /// Playlist index rendered on the first visible row.
    pub list_offset: usize,
    pub buttons: Vec<(Control, Rect)>,
}

impl UiLayout {
    /// Playlist index under the terminal cell `(column, row)`.
    pub fn list_index_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        if !contains(self.list, column, row) {
            return None;
        }
        let idx = self.list_offset + (row - self.list.y) as usize;
        (idx < len).then_some(idx)
    }

    /// Ratio along the slider under `column`, when `(column, row)` hits it.
    pub fn slider_ratio_at(&self, column: u16, row: u16) -> Option<f64> {
        if !contains(self.slider, column, row) {
            return None;
        }
        let span = self.slider.width.saturating_sub(1).max(1);
        Some(f64::from(column - self.slider.x) / f64::from(span))
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<Control> {
        self.buttons
            .iter()
            .find(|(_, area)| contains(*area, column, row))
            .map(|(control, _)| *control)
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Parsed theme colors.
#[derive(Copy, Clone, Debug)]
struct Theme {
    background: Color,
    panel: Color,
    border: Color,
    text: Color,
    accent: Color,
    highlight: Color,
}

impl Theme {
    fn from_settings(theme: &ThemeSettings) -> Self {
        let parse = |value: &str| Color::from_str(value).unwrap_or(Color::Reset);
        Self {
            background: parse(&theme.background),
            panel: parse(&theme.panel),
            border: parse(&theme.border),
            text: parse(&theme.text),
            accent: parse(&theme.accent),
            highlight: parse(&theme.highlight),
        }
    }

    /// A rounded, softly bordered panel.
    fn glass(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border))
            .style(Style::default().bg(self.panel).fg(self.text))
    }
}

/// Help line for the keyboard, shown at the bottom of the frame.
fn controls_text(mode: InputMode, scrub_seconds: u64) -> String {
    match mode {
        InputMode::AddSongs => "[enter] add | [esc] cancel | [backspace] delete".to_string(),
        InputMode::Normal => [
            "[j/k] up/down".to_string(),
            "[enter] play selected".to_string(),
            "[gg/G] top/bottom".to_string(),
            format!("[H/L] scrub -/+{}s", scrub_seconds),
            "[q] quit".to_string(),
        ]
        .join(" | "),
    }
}

fn status_text<E: PlaybackEngine>(coordinator: &Coordinator<E>) -> String {
    let mut parts: Vec<String> = vec![coordinator.time_label().to_string()];
    parts.push(coordinator.status().as_str().to_string());
    if coordinator.loop_enabled() {
        parts.push("Loop".to_string());
    }
    parts.push(format!("{} tracks", coordinator.tracks().len()));
    parts.join(" • ")
}

/// Compute the window of rows to render so the selection stays centered.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into `frame` and return where the interactive widgets are.
pub fn draw<E: PlaybackEngine>(
    frame: &mut Frame,
    app: &App,
    coordinator: &Coordinator<E>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> UiLayout {
    let theme = Theme::from_settings(&ui_settings.theme);
    let mut layout = UiLayout::default();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        frame.area(),
    );

    let outer = frame.area().inner(Margin {
        horizontal: 3,
        vertical: 1,
    });
    let container = theme
        .glass()
        .title(format!(" {} ", ui_settings.title))
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1));
    let inner = container.inner(outer);
    frame.render_widget(container, outer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    // Track name
    let track = Paragraph::new(coordinator.track_label()).style(
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(track, chunks[0]);

    // Time slider
    let slider = coordinator.slider();
    let gauge = LineGauge::default()
        .ratio(slider.ratio())
        .label("")
        .filled_style(Style::default().fg(theme.accent))
        .unfilled_style(Style::default().fg(theme.border));
    frame.render_widget(gauge, chunks[1]);
    layout.slider = chunks[1];

    // Time label and status
    frame.render_widget(
        Paragraph::new(status_text(coordinator)).style(Style::default().fg(theme.text)),
        chunks[2],
    );

    // Prompt, notice or flash message
    let message_line = match app.mode {
        InputMode::AddSongs => Line::from(vec![
            Span::styled("Add path: ", Style::default().fg(theme.accent)),
            Span::raw(app.prompt.as_str()),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ]),
        InputMode::Normal => {
            let text = coordinator
                .notice()
                .map(str::to_string)
                .or_else(|| app.flash.clone())
                .unwrap_or_default();
            Line::styled(text, Style::default().fg(theme.accent))
        }
    };
    frame.render_widget(Paragraph::new(message_line), chunks[3]);

    // Playlist
    {
        let list_block = theme.glass().title(" playlist ");
        let list_inner = list_block.inner(chunks[4]);

        let total = coordinator.tracks().len();
        let height = list_inner.height as usize;
        let selected = app.selected.min(total.saturating_sub(1));
        let (start, end) = visible_window(total, height, selected);

        let now_playing = coordinator.current_index();
        let mut items: Vec<ListItem> = coordinator
            .tracks()
            .iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(i, t)| {
                if Some(i) == now_playing {
                    ListItem::new(format!("▶ {}", t.display_name))
                        .style(Style::default().fg(theme.accent))
                } else {
                    ListItem::new(format!("  {}", t.display_name))
                }
            })
            .collect();
        if coordinator.tracks().is_empty() {
            items.push(
                ListItem::new(format!("  Press [{}] to add songs", Control::AddSongs.key_hint()))
                    .style(Style::default().fg(theme.border)),
            );
        }

        let list = List::new(items).block(list_block).highlight_style(
            Style::default()
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected - start));
        }
        frame.render_stateful_widget(list, chunks[4], &mut state);

        layout.list = list_inner;
        layout.list_offset = start;
    }

    // Buttons
    let button_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Control::ALL.map(|_| Constraint::Ratio(1, Control::ALL.len() as u32)))
        .split(chunks[5]);
    for (control, area) in Control::ALL.iter().zip(button_areas.iter()) {
        let active = matches!(
            (control, coordinator.status()),
            (Control::Play, PlaybackStatus::Playing)
                | (Control::Pause, PlaybackStatus::Paused)
                | (Control::Stop, PlaybackStatus::Stopped)
        );
        let style = if active {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let button = Paragraph::new(format!("{} [{}]", control.label(), control.key_hint()))
            .alignment(Alignment::Center)
            .style(style)
            .block(theme.glass());
        frame.render_widget(button, *area);
        layout.buttons.push((*control, *area));
    }

    // Footer help
    frame.render_widget(
        Paragraph::new(controls_text(app.mode, controls_settings.scrub_seconds))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.border)),
        chunks[6],
    );

    layout
}
