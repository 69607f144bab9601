use std::str::FromStr;
use std::{env, path::PathBuf};

use log::LevelFilter;
use ratatui::style::Color;

use super::schema::Settings;
use crate::error::{Error, Result};

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `GLASSPLAY__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("GLASSPLAY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<()> {
        if self.audio.position_interval_ms < 10 {
            return Err(Error::InvalidConfig(
                "audio.position_interval_ms must be >= 10".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.audio.volume) {
            return Err(Error::InvalidConfig(
                "audio.volume must be within 0.0..=2.0".to_string(),
            ));
        }
        for (name, value) in self.ui.theme.colors() {
            if Color::from_str(value).is_err() {
                return Err(Error::InvalidConfig(format!(
                    "ui.theme.{name} is not a color: {value}"
                )));
            }
        }
        if LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(Error::InvalidConfig(format!(
                "logging.level is not a log level: {}",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// Resolve the config path from `GLASSPLAY_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("GLASSPLAY_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/glassplay/config.toml`
/// or `~/.config/glassplay/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("glassplay").join("config.toml"))
}

/// Compute the default log file under `$XDG_STATE_HOME/glassplay/glassplay.log`
/// or `~/.local/state/glassplay/glassplay.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("glassplay").join("glassplay.log"))
}
