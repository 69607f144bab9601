use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Control, InputMode};
use crate::audio::PlaybackEngine;
use crate::config;
use crate::coordinator::{Coordinator, PlaybackStatus};
use crate::error::Result;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::runtime::startup::add_songs;
use crate::ui::{self, UiLayout};

/// Whether the loop keeps going after an input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known status as emitted to MPRIS.
    pub last_mpris_status: PlaybackStatus,
    pub last_mpris_duration: u64,
    /// Widget areas of the last drawn frame.
    pub layout: UiLayout,
    last_now_playing: Option<usize>,
    dragging_slider: bool,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `coordinator`.
    pub fn new<E: PlaybackEngine>(coordinator: &Coordinator<E>) -> Self {
        Self {
            pending_gg: false,
            last_mpris_index: None,
            last_mpris_status: PlaybackStatus::Stopped,
            last_mpris_duration: 0,
            layout: UiLayout::default(),
            last_now_playing: coordinator.current_index(),
            dragging_slider: false,
        }
    }
}

/// Main terminal event loop: drains engine notifications, draws, and routes
/// keyboard, mouse and MPRIS input to the coordinator. Returns when shutdown
/// is requested.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    coordinator: &mut Coordinator<E>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<()> {
    loop {
        sync(app, coordinator, mpris, state);

        let mut layout = UiLayout::default();
        terminal.draw(|f| {
            layout = ui::draw(f, app, coordinator, &settings.ui, &settings.controls);
        })?;
        state.layout = layout;

        while let Ok(cmd) = control_rx.try_recv() {
            debug!("MPRIS command {:?}", cmd);
            if handle_control_cmd(cmd, app, coordinator) == Flow::Quit {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            let flow = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, settings, app, coordinator, state)
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, settings, app, coordinator, state),
                _ => Flow::Continue,
            };
            if flow == Flow::Quit {
                info!("quit requested");
                return Ok(());
            }
        }
    }
}

/// Dispatch engine notifications, then bring the cursor and MPRIS up to date.
fn sync<E: PlaybackEngine>(
    app: &mut App,
    coordinator: &mut Coordinator<E>,
    mpris: &MprisHandle,
    state: &mut EventLoopState,
) {
    coordinator.pump_events();

    let now_playing = coordinator.current_index();
    if now_playing != state.last_now_playing {
        app.sync_follow(now_playing);
        state.last_now_playing = now_playing;
    }

    // Playback also changes on its own (auto-advance) and through MPRIS.
    if now_playing != state.last_mpris_index
        || coordinator.status() != state.last_mpris_status
        || coordinator.duration_ms() != state.last_mpris_duration
    {
        update_mpris(mpris, coordinator);
        state.last_mpris_index = now_playing;
        state.last_mpris_status = coordinator.status();
        state.last_mpris_duration = coordinator.duration_ms();
    }
    mpris.set_position(coordinator.position_ms());
}

/// Run an on-screen button.
pub fn apply_control<E: PlaybackEngine>(
    control: Control,
    app: &mut App,
    coordinator: &mut Coordinator<E>,
) {
    match control {
        Control::AddSongs => app.enter_add_mode(),
        Control::Previous => {
            app.follow_playback_on();
            coordinator.previous();
        }
        Control::Play => coordinator.play(),
        Control::Pause => coordinator.pause(),
        Control::Stop => coordinator.stop(),
        Control::Next => {
            app.follow_playback_on();
            coordinator.next();
        }
    }
}

pub fn handle_control_cmd<E: PlaybackEngine>(
    cmd: ControlCmd,
    app: &mut App,
    coordinator: &mut Coordinator<E>,
) -> Flow {
    match cmd {
        ControlCmd::Quit => return Flow::Quit,
        ControlCmd::Play => apply_control(Control::Play, app, coordinator),
        ControlCmd::Pause => apply_control(Control::Pause, app, coordinator),
        ControlCmd::PlayPause => coordinator.toggle_pause(),
        ControlCmd::Stop => apply_control(Control::Stop, app, coordinator),
        ControlCmd::Next => apply_control(Control::Next, app, coordinator),
        ControlCmd::Prev => apply_control(Control::Previous, app, coordinator),
    }
    Flow::Continue
}

fn scrub_ms(settings: &config::Settings) -> i64 {
    settings
        .controls
        .scrub_seconds
        .saturating_mul(1000)
        .min(i64::MAX as u64) as i64
}

pub fn handle_key_event<E: PlaybackEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    coordinator: &mut Coordinator<E>,
    state: &mut EventLoopState,
) -> Flow {
    if app.mode == InputMode::AddSongs {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.cancel_add_mode(),
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => {
                if let Some(path) = app.take_prompt() {
                    add_songs(&[path], &settings.library, app, coordinator);
                }
            }
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return Flow::Continue;
    }

    let len = coordinator.tracks().len();
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    app.flash = None;

    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('a') => apply_control(Control::AddSongs, app, coordinator),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.follow_playback_off();
                app.set_selected(0, len);
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.follow_playback_off();
            app.set_selected(len.saturating_sub(1), len);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback_off();
            app.select_next(len);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback_off();
            app.select_prev(len);
        }
        KeyCode::Enter => {
            app.follow_playback_on();
            coordinator.play_selected(app.selected);
        }
        KeyCode::Char('p') => apply_control(Control::Play, app, coordinator),
        KeyCode::Char(' ') => coordinator.toggle_pause(),
        KeyCode::Char('s') => apply_control(Control::Stop, app, coordinator),
        KeyCode::Char('l') | KeyCode::Char('n') => apply_control(Control::Next, app, coordinator),
        KeyCode::Char('h') | KeyCode::Char('b') => {
            apply_control(Control::Previous, app, coordinator)
        }
        KeyCode::Char('L') => {
            coordinator.seek_by(scrub_ms(settings));
        }
        KeyCode::Char('H') => {
            coordinator.seek_by(-scrub_ms(settings));
        }
        _ => {}
    }

    Flow::Continue
}

/// Seek to the slider position under `column`, clamped to the slider's extent.
fn seek_to_column<E: PlaybackEngine>(
    column: u16,
    coordinator: &mut Coordinator<E>,
    layout: &UiLayout,
) {
    let area = layout.slider;
    if area.width == 0 {
        return;
    }
    let column = column.clamp(area.x, area.x + area.width - 1);
    if let Some(ratio) = layout.slider_ratio_at(column, area.y) {
        let target = coordinator.slider().position_at(ratio);
        coordinator.seek(target);
    }
}

pub fn handle_mouse_event<E: PlaybackEngine>(
    mouse: MouseEvent,
    settings: &config::Settings,
    app: &mut App,
    coordinator: &mut Coordinator<E>,
    state: &mut EventLoopState,
) -> Flow {
    let (column, row) = (mouse.column, mouse.row);
    let len = coordinator.tracks().len();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.mode == InputMode::AddSongs {
                app.cancel_add_mode();
            }
            if let Some(control) = state.layout.button_at(column, row) {
                apply_control(control, app, coordinator);
            } else if state.layout.slider_ratio_at(column, row).is_some() {
                state.dragging_slider = true;
                seek_to_column(column, coordinator, &state.layout);
            } else if let Some(idx) = state.layout.list_index_at(column, row, len) {
                app.follow_playback_off();
                app.set_selected(idx, len);
                let window = Duration::from_millis(settings.controls.double_click_ms);
                if app.register_click(idx, Instant::now(), window) {
                    app.follow_playback_on();
                    coordinator.play_selected(idx);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if state.dragging_slider => {
            seek_to_column(column, coordinator, &state.layout);
        }
        MouseEventKind::Up(MouseButton::Left) => state.dragging_slider = false,
        MouseEventKind::ScrollDown => {
            app.follow_playback_off();
            app.select_next(len);
        }
        MouseEventKind::ScrollUp => {
            app.follow_playback_off();
            app.select_prev(len);
        }
        _ => {}
    }

    Flow::Continue
}

#[cfg(test)]
mod tests;
