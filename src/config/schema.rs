use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/glassplay/config.toml` or `~/.config/glassplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `GLASSPLAY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the engine reports the playback position while playing (milliseconds).
    pub position_interval_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Output volume, 1.0 is unity gain.
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            position_interval_ms: 250,
            quit_fade_out_ms: 300,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Title rendered on the outer glass frame.
    pub title: String,
    /// Whether the playlist cursor follows the now-playing track.
    pub follow_playback: bool,
    pub theme: ThemeSettings,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title: "glassplay".to_string(),
            follow_playback: true,
            theme: ThemeSettings::default(),
        }
    }
}

/// Colors of the glass look, as `#rrggbb` strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub background: String,
    pub panel: String,
    pub border: String,
    pub text: String,
    pub accent: String,
    pub highlight: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background: "#0f0f0f".to_string(),
            panel: "#1b1b1d".to_string(),
            border: "#3a3a3e".to_string(),
            text: "#f5f5f5".to_string(),
            accent: "#9ecbff".to_string(),
            highlight: "#3d3d42".to_string(),
        }
    }
}

impl ThemeSettings {
    pub(crate) fn colors(&self) -> [(&'static str, &str); 6] {
        [
            ("background", self.background.as_str()),
            ("panel", self.panel.as_str()),
            ("border", self.border.as_str()),
            ("text", self.text.as_str()),
            ("accent", self.accent.as_str()),
            ("highlight", self.highlight.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Two clicks on the same playlist row within this window count as a double click.
    pub double_click_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            double_click_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while walking added directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories of added directories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into(), "flac".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
    /// Log file location, defaults to the XDG state directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
