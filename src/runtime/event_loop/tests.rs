use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyModifiers, MouseEvent};
use ratatui::layout::Rect;

use super::*;
use crate::audio::{EngineEvent, MockPlaybackEngine};

type CallLog = Arc<Mutex<Vec<String>>>;

/// Engine that accepts everything and records the calls it receives.
fn recording_engine() -> (MockPlaybackEngine, Sender<EngineEvent>, CallLog) {
    let (tx, rx) = mpsc::channel();
    let calls: CallLog = Arc::default();
    let mut engine = MockPlaybackEngine::new();
    engine.expect_subscribe().times(1).return_once(move || rx);

    let log = calls.clone();
    engine
        .expect_load()
        .returning(move |index, _| log.lock().unwrap().push(format!("load {index}")));
    let log = calls.clone();
    engine
        .expect_play()
        .returning(move || log.lock().unwrap().push("play".to_string()));
    let log = calls.clone();
    engine
        .expect_pause()
        .returning(move || log.lock().unwrap().push("pause".to_string()));
    let log = calls.clone();
    engine
        .expect_stop()
        .returning(move || log.lock().unwrap().push("stop".to_string()));
    let log = calls.clone();
    engine
        .expect_set_position()
        .returning(move |ms| log.lock().unwrap().push(format!("seek {ms}")));
    engine.expect_duration().return_const(0u64);

    (engine, tx, calls)
}

struct Fixture {
    app: App,
    coordinator: Coordinator<MockPlaybackEngine>,
    state: EventLoopState,
    settings: config::Settings,
    events: Sender<EngineEvent>,
    calls: CallLog,
}

impl Fixture {
    fn new(tracks: &[&str]) -> Self {
        let (engine, events, calls) = recording_engine();
        let mut coordinator = Coordinator::new(engine);
        coordinator.add_tracks(tracks.iter().map(|n| PathBuf::from(format!("/music/{n}"))));
        calls.lock().unwrap().clear();
        let state = EventLoopState::new(&coordinator);
        Self {
            app: App::new(true),
            coordinator,
            state,
            settings: config::Settings::default(),
            events,
            calls,
        }
    }

    fn key(&mut self, code: KeyCode) -> Flow {
        handle_key_event(
            KeyEvent::new(code, KeyModifiers::NONE),
            &self.settings,
            &mut self.app,
            &mut self.coordinator,
            &mut self.state,
        )
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Flow {
        handle_mouse_event(
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
            &self.settings,
            &mut self.app,
            &mut self.coordinator,
            &mut self.state,
        )
    }

    fn calls(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }
}

#[test]
fn cursor_keys_move_selection_and_stop_following() {
    let mut fx = Fixture::new(&["a.mp3", "b.mp3", "c.mp3"]);

    fx.key(KeyCode::Char('j'));
    assert_eq!(fx.app.selected, 1);
    assert!(!fx.app.follow_playback);

    fx.key(KeyCode::Up);
    fx.key(KeyCode::Up);
    assert_eq!(fx.app.selected, 2);

    fx.key(KeyCode::Char('g'));
    fx.key(KeyCode::Char('g'));
    assert_eq!(fx.app.selected, 0);

    fx.key(KeyCode::Char('G'));
    assert_eq!(fx.app.selected, 2);

    // A lone `g` followed by something else does not jump.
    fx.key(KeyCode::Char('g'));
    fx.key(KeyCode::Char('x'));
    fx.key(KeyCode::Char('g'));
    assert_eq!(fx.app.selected, 2);
    assert!(fx.calls().is_empty());
}

#[test]
fn enter_plays_selected_track_and_resumes_following() {
    let mut fx = Fixture::new(&["a.mp3", "b.mp3", "c.mp3"]);

    fx.key(KeyCode::Char('j'));
    fx.key(KeyCode::Char('j'));
    fx.key(KeyCode::Enter);

    assert_eq!(fx.calls(), vec!["load 2", "play"]);
    assert_eq!(fx.coordinator.current_index(), Some(2));
    assert!(fx.app.follow_playback);
}

#[test]
fn transport_keys_drive_the_coordinator() {
    let mut fx = Fixture::new(&["a.mp3", "b.mp3"]);

    fx.key(KeyCode::Char(' '));
    assert_eq!(fx.coordinator.status(), PlaybackStatus::Paused);
    fx.key(KeyCode::Char('p'));
    assert_eq!(fx.coordinator.status(), PlaybackStatus::Playing);
    fx.key(KeyCode::Char('s'));
    assert_eq!(fx.coordinator.status(), PlaybackStatus::Stopped);
    fx.key(KeyCode::Char('n'));
    assert_eq!(fx.coordinator.current_index(), Some(1));
    fx.key(KeyCode::Char('b'));
    assert_eq!(fx.coordinator.current_index(), Some(0));

    assert_eq!(
        fx.calls(),
        vec!["pause", "play", "stop", "load 1", "play", "load 0", "play"]
    );
}

#[test]
fn scrub_keys_seek_relative_and_clamp() {
    let mut fx = Fixture::new(&["a.mp3"]);
    fx.events.send(EngineEvent::DurationChanged(60_000)).unwrap();
    fx.events.send(EngineEvent::PositionChanged(3_000)).unwrap();
    fx.coordinator.pump_events();

    fx.key(KeyCode::Char('L'));
    fx.key(KeyCode::Char('H'));

    assert_eq!(fx.calls(), vec!["seek 8000", "seek 0"]);
}

#[test]
fn quit_from_keyboard_and_mpris() {
    let mut fx = Fixture::new(&[]);
    assert_eq!(fx.key(KeyCode::Char('q')), Flow::Quit);
    assert_eq!(
        handle_control_cmd(ControlCmd::Quit, &mut fx.app, &mut fx.coordinator),
        Flow::Quit
    );
}

#[test]
fn mpris_commands_map_to_coordinator_operations() {
    let mut fx = Fixture::new(&["a.mp3", "b.mp3"]);

    for cmd in [
        ControlCmd::PlayPause,
        ControlCmd::PlayPause,
        ControlCmd::Next,
        ControlCmd::Prev,
        ControlCmd::Pause,
        ControlCmd::Play,
        ControlCmd::Stop,
    ] {
        assert_eq!(
            handle_control_cmd(cmd, &mut fx.app, &mut fx.coordinator),
            Flow::Continue
        );
    }

    assert_eq!(
        fx.calls(),
        vec![
            "pause", "play", "load 1", "play", "load 0", "play", "pause", "play", "stop"
        ]
    );
}

#[test]
fn add_songs_prompt_appends_directory_contents() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.flac"), b"").unwrap();
    std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

    let mut fx = Fixture::new(&[]);
    fx.key(KeyCode::Char('a'));
    assert_eq!(fx.app.mode, InputMode::AddSongs);
    for c in dir.path().to_string_lossy().chars() {
        fx.key(KeyCode::Char(c));
    }
    // Typed characters never trigger shortcuts while prompting.
    assert!(fx.calls().is_empty());
    fx.key(KeyCode::Enter);

    assert_eq!(fx.app.mode, InputMode::Normal);
    assert_eq!(fx.coordinator.tracks().len(), 2);
    assert_eq!(fx.coordinator.tracks().get(0).unwrap().display_name, "a.mp3");
    assert_eq!(fx.app.flash.as_deref(), Some("Added 2 tracks"));
    assert_eq!(fx.calls(), vec!["load 0", "play"]);
}

#[test]
fn add_songs_prompt_reports_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let mut fx = Fixture::new(&[]);
    fx.key(KeyCode::Char('a'));
    for c in dir.path().to_string_lossy().chars() {
        fx.key(KeyCode::Char(c));
    }
    fx.key(KeyCode::Enter);

    assert!(fx.coordinator.tracks().is_empty());
    assert!(fx.app.flash.as_deref().unwrap().starts_with("No audio files found"));

    fx.key(KeyCode::Char('a'));
    fx.key(KeyCode::Char('x'));
    fx.key(KeyCode::Esc);
    assert_eq!(fx.app.mode, InputMode::Normal);
    assert!(fx.calls().is_empty());
}

fn with_layout(fx: &mut Fixture) {
    fx.state.layout = UiLayout {
        slider: Rect::new(0, 1, 101, 1),
        list: Rect::new(0, 5, 40, 10),
        list_offset: 0,
        buttons: vec![
            (Control::Stop, Rect::new(0, 20, 10, 3)),
            (Control::Next, Rect::new(10, 20, 10, 3)),
        ],
    };
}

#[test]
fn clicking_buttons_triggers_controls() {
    let mut fx = Fixture::new(&["a.mp3", "b.mp3"]);
    with_layout(&mut fx);

    fx.mouse(MouseEventKind::Down(MouseButton::Left), 2, 21);
    fx.mouse(MouseEventKind::Down(MouseButton::Left), 12, 21);

    assert_eq!(fx.calls(), vec!["stop", "load 1", "play"]);
}

#[test]
fn slider_click_and_drag_seek_proportionally() {
    let mut fx = Fixture::new(&["a.mp3"]);
    with_layout(&mut fx);
    fx.events.send(EngineEvent::DurationChanged(100_000)).unwrap();
    fx.coordinator.pump_events();

    fx.mouse(MouseEventKind::Down(MouseButton::Left), 25, 1);
    // Dragging past the end clamps to the slider's extent.
    fx.mouse(MouseEventKind::Drag(MouseButton::Left), 200, 3);
    fx.mouse(MouseEventKind::Up(MouseButton::Left), 200, 3);
    fx.mouse(MouseEventKind::Drag(MouseButton::Left), 50, 1);

    assert_eq!(fx.calls(), vec!["seek 25000", "seek 100000"]);
}

#[test]
fn double_click_on_row_plays_it() {
    let mut fx = Fixture::new(&["a.mp3", "b.mp3", "c.mp3"]);
    with_layout(&mut fx);

    fx.mouse(MouseEventKind::Down(MouseButton::Left), 3, 7);
    assert_eq!(fx.app.selected, 2);
    assert!(fx.calls().is_empty());

    fx.mouse(MouseEventKind::Down(MouseButton::Left), 3, 7);
    assert_eq!(fx.calls(), vec!["load 2", "play"]);
    assert_eq!(fx.coordinator.current_index(), Some(2));

    // Rows past the end of the playlist are ignored.
    fx.mouse(MouseEventKind::Down(MouseButton::Left), 3, 12);
    assert_eq!(fx.app.selected, 2);
}
