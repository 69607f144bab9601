//! Crate wide error type.

use std::path::PathBuf;
use std::{io, result};

use thiserror::Error;

/// The result type used across the player.
pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("an io error occurred, {0}")]
    Io(#[from] io::Error),
    #[error("failed to load configuration, {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("invalid configuration, {0}")]
    InvalidConfig(String),
    #[error("failed to initialize logging, {0}")]
    Logging(String),
    #[error("no audio output available, {0}")]
    AudioOutput(String),
    #[error("failed to decode {path:?}, {message}")]
    Decode { path: PathBuf, message: String },
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        match (self, other) {
            (Error::Io(_), Error::Io(_)) => true,
            (Error::Config(_), Error::Config(_)) => true,
            (Error::InvalidConfig(a), Error::InvalidConfig(b)) => a == b,
            (Error::Logging(_), Error::Logging(_)) => true,
            (Error::AudioOutput(_), Error::AudioOutput(_)) => true,
            (Error::Decode { path: a, .. }, Error::Decode { path: b, .. }) => a == b,
            _ => false,
        }
    }
}
