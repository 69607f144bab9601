//! Playback coordinator: the single authority over what plays now and what
//! the UI should display.
//!
//! The coordinator owns the track list and playback state, drives a
//! [`PlaybackEngine`](crate::audio::PlaybackEngine) and turns the engine's
//! notifications into display strings.

mod format;
mod model;
mod playlist;
mod state;

pub use model::Coordinator;
pub use playlist::TrackList;
pub use state::{PlaybackStatus, Slider};
