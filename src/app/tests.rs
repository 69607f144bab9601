use super::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[test]
fn cursor_wraps_in_both_directions() {
    let mut app = App::new(true);
    app.select_prev(3);
    assert_eq!(app.selected, 2);
    app.select_next(3);
    assert_eq!(app.selected, 0);
    app.select_next(3);
    assert_eq!(app.selected, 1);
}

#[test]
fn cursor_on_empty_list_stays_at_zero() {
    let mut app = App::new(true);
    app.select_next(0);
    assert_eq!(app.selected, 0);
    app.select_prev(0);
    assert_eq!(app.selected, 0);
    app.set_selected(5, 0);
    assert_eq!(app.selected, 0);
}

#[test]
fn set_selected_clamps_to_last_row() {
    let mut app = App::new(true);
    app.set_selected(10, 4);
    assert_eq!(app.selected, 3);
    app.set_selected(1, 4);
    assert_eq!(app.selected, 1);
}

#[test]
fn follow_moves_cursor_only_when_enabled() {
    let mut app = App::new(true);
    app.sync_follow(Some(4));
    assert_eq!(app.selected, 4);

    app.follow_playback_off();
    app.sync_follow(Some(1));
    assert_eq!(app.selected, 4);

    app.follow_playback_on();
    app.sync_follow(None);
    assert_eq!(app.selected, 4);
}

#[test]
fn prompt_round_trip_and_blank_input() {
    let mut app = App::new(true);
    app.enter_add_mode();
    assert_eq!(app.mode, InputMode::AddSongs);
    for c in "/music/x.mp3z".chars() {
        app.push_prompt_char(c);
    }
    app.pop_prompt_char();
    assert_eq!(app.take_prompt(), Some(PathBuf::from("/music/x.mp3")));
    assert_eq!(app.mode, InputMode::Normal);
    assert!(app.prompt.is_empty());

    app.enter_add_mode();
    app.push_prompt_char(' ');
    assert_eq!(app.take_prompt(), None);

    app.enter_add_mode();
    app.push_prompt_char('x');
    app.cancel_add_mode();
    assert_eq!(app.mode, InputMode::Normal);
    assert!(app.prompt.is_empty());
}

#[test]
fn double_click_needs_same_row_within_window() {
    let mut app = App::new(true);
    let window = Duration::from_millis(400);
    let t0 = Instant::now();

    assert!(!app.register_click(2, t0, window));
    assert!(app.register_click(2, t0 + Duration::from_millis(150), window));
    // A completed double click does not chain into a third.
    assert!(!app.register_click(2, t0 + Duration::from_millis(200), window));

    assert!(!app.register_click(3, t0 + Duration::from_millis(250), window));
    assert!(!app.register_click(3, t0 + Duration::from_millis(900), window));
    assert!(!app.register_click(4, t0 + Duration::from_millis(950), window));
}

#[test]
fn controls_are_listed_in_button_order() {
    let labels: Vec<&str> = Control::ALL.iter().map(|c| c.label()).collect();
    assert_eq!(
        labels,
        vec!["Add Songs", "Previous", "Play", "Pause", "Stop", "Next"]
    );
}
