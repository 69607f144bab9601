//! File logging through `log4rs`.
//!
//! The terminal belongs to the UI, so every record goes to a log file.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;
use log4rs::Config;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::{LoggingSettings, default_log_path};
use crate::error::{Error, Result};

const FILE_APPENDER: &str = "file";
const LOG_FORMAT_FILE: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:>5.5} [{T}] {t} - {m}{n}";

/// Chatty dependencies that are capped below the configured level.
const QUIET_LOGGERS: [&str; 3] = ["zbus", "symphonia", "cpal"];

/// Log file used for `settings`.
pub fn log_path(settings: &LoggingSettings) -> Result<PathBuf> {
    settings
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or_else(|| Error::Logging("cannot determine a log file location".to_string()))
}

/// Build the log4rs configuration, creating the log directory when needed.
pub fn build_config(settings: &LoggingSettings) -> Result<Config> {
    let level = LevelFilter::from_str(&settings.level)
        .map_err(|e| Error::Logging(format!("invalid level {:?}, {}", settings.level, e)))?;
    let path = log_path(settings)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_FORMAT_FILE)))
        .build(&path)?;

    let mut builder =
        Config::builder().appender(Appender::builder().build(FILE_APPENDER, Box::new(appender)));
    for name in QUIET_LOGGERS {
        builder = builder.logger(Logger::builder().build(name, level.min(LevelFilter::Warn)));
    }

    builder
        .build(Root::builder().appender(FILE_APPENDER).build(level))
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Install the global logger.
pub fn init(settings: &LoggingSettings) -> Result<log4rs::Handle> {
    let config = build_config(settings)?;
    let handle = log4rs::init_config(config).map_err(|e| Error::Logging(e.to_string()))?;
    log::info!(
        "glassplay {} logging at {} to {:?}",
        env!("CARGO_PKG_VERSION"),
        settings.level,
        log_path(settings).ok()
    );
    Ok(handle)
}
