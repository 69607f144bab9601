//! UI model types: `App`, `InputMode` and the on-screen `Control` buttons.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// What keystrokes are currently interpreted as.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a path for "Add Songs".
    AddSongs,
}

/// The row of buttons under the playlist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    AddSongs,
    Previous,
    Play,
    Pause,
    Stop,
    Next,
}

impl Control {
    /// Buttons in on-screen order.
    pub const ALL: [Control; 6] = [
        Control::AddSongs,
        Control::Previous,
        Control::Play,
        Control::Pause,
        Control::Stop,
        Control::Next,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Control::AddSongs => "Add Songs",
            Control::Previous => "Previous",
            Control::Play => "Play",
            Control::Pause => "Pause",
            Control::Stop => "Stop",
            Control::Next => "Next",
        }
    }

    /// Keyboard shortcut shown next to the label.
    pub fn key_hint(&self) -> &'static str {
        match self {
            Control::AddSongs => "a",
            Control::Previous => "h",
            Control::Play => "p",
            Control::Pause => "space",
            Control::Stop => "s",
            Control::Next => "l",
        }
    }
}

/// The UI model: cursor, prompt and transient messages.
pub struct App {
    pub selected: usize,
    pub mode: InputMode,
    pub prompt: String,
    /// Cursor jumps to the now-playing track while set.
    pub follow_playback: bool,
    /// One-line message for the user, e.g. the result of "Add Songs".
    pub flash: Option<String>,
    last_click: Option<(usize, Instant)>,
}

impl App {
    pub fn new(follow_playback: bool) -> Self {
        Self {
            selected: 0,
            mode: InputMode::Normal,
            prompt: String::new(),
            follow_playback,
            flash: None,
            last_click: None,
        }
    }

    /// Enable following playback (cursor follows currently playing track).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    /// Disable following playback; the cursor roams freely.
    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move the cursor to `now_playing` when following playback.
    pub fn sync_follow(&mut self, now_playing: Option<usize>) {
        if let (true, Some(idx)) = (self.follow_playback, now_playing) {
            self.selected = idx;
        }
    }

    /// Set the cursor, clamped to a list of `len` rows.
    pub fn set_selected(&mut self, idx: usize, len: usize) {
        self.selected = if len == 0 { 0 } else { idx.min(len - 1) };
    }

    /// Move the cursor down, wrapping to the top.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if self.selected + 1 >= len {
            0
        } else {
            self.selected + 1
        };
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if self.selected == 0 || self.selected >= len {
            len - 1
        } else {
            self.selected - 1
        };
    }

    pub fn enter_add_mode(&mut self) {
        self.mode = InputMode::AddSongs;
        self.prompt.clear();
        self.flash = None;
    }

    pub fn cancel_add_mode(&mut self) {
        self.mode = InputMode::Normal;
        self.prompt.clear();
    }

    pub fn push_prompt_char(&mut self, c: char) {
        self.prompt.push(c);
    }

    pub fn pop_prompt_char(&mut self) {
        self.prompt.pop();
    }

    /// Leave the prompt and return the typed path, `None` when blank.
    ///
    /// A leading `~/` expands to `$HOME`.
    pub fn take_prompt(&mut self) -> Option<PathBuf> {
        self.mode = InputMode::Normal;
        let typed = std::mem::take(&mut self.prompt);
        let typed = typed.trim();
        if typed.is_empty() {
            return None;
        }

        if let Some(rest) = typed.strip_prefix("~/") {
            if let Some(home) = env::var_os("HOME") {
                return Some(PathBuf::from(home).join(rest));
            }
        }
        Some(PathBuf::from(typed))
    }

    /// Record a click on playlist `row`. Returns true when it completes a
    /// double click on the same row within `window`.
    pub fn register_click(&mut self, row: usize, now: Instant, window: Duration) -> bool {
        let double = matches!(
            self.last_click,
            Some((prev_row, at)) if prev_row == row && now.saturating_duration_since(at) <= window
        );
        self.last_click = if double { None } else { Some((row, now)) };
        double
    }
}
