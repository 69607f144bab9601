//! Engine contract and the messages exchanged with the audio thread.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc::Receiver;

#[cfg(test)]
use mockall::automock;

/// Notification emitted by a playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Total length of the loaded track in milliseconds (0 when unknown).
    DurationChanged(u64),
    /// Current playback position in milliseconds.
    PositionChanged(u64),
    /// The playlist index now loaded, `None` when nothing is loaded.
    TrackChanged(Option<usize>),
    /// The track loaded as this playlist index played to its end.
    EndOfTrack(usize),
    /// The engine could not open or decode a track.
    Error { locator: PathBuf, message: String },
}

/// Loads and plays audio sources, reporting progress through the
/// subscription returned by [`PlaybackEngine::subscribe`].
///
/// Every command is fire-and-forget; the engine defines what happens when
/// nothing is loaded.
#[cfg_attr(test, automock)]
pub trait PlaybackEngine {
    /// Hand out the notification stream. Meant to be called once, by the
    /// owner that dispatches the notifications.
    fn subscribe(&mut self) -> Receiver<EngineEvent>;

    /// Load `locator` as playlist entry `index`, paused at position 0.
    fn load(&self, index: usize, locator: &Path);

    fn play(&self);

    fn pause(&self);

    /// Stop playback and rewind the loaded track.
    fn stop(&self);

    fn set_position(&self, position_ms: u64);

    /// Duration of the loaded track in milliseconds, 0 when unknown.
    fn duration(&self) -> u64;
}

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Open `path` for playlist entry `index`.
    Load { index: usize, path: PathBuf },
    /// Start or resume playback.
    Play,
    Pause,
    /// Stop and rewind to the start of the loaded track.
    Stop,
    /// Jump to the given position in milliseconds.
    SetPosition(u64),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Duration of the loaded track in milliseconds, published by the audio thread.
pub type DurationHandle = Arc<AtomicU64>;
