use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use log::{debug, info, warn};

use crate::audio::{EngineEvent, PlaybackEngine};
use crate::library::Track;

use super::format::time_label;
use super::playlist::TrackList;
use super::state::{PlaybackState, PlaybackStatus, Slider};

const NO_TRACK_LABEL: &str = "No track loaded";

/// Mediates between the track list, a playback engine and the UI.
///
/// All mutation goes through the operations below; the UI only reads the
/// derived labels. Engine notifications are dispatched by [`Coordinator::pump_events`]
/// on the thread that owns the coordinator.
pub struct Coordinator<E: PlaybackEngine> {
    engine: E,
    events: Receiver<EngineEvent>,
    tracks: TrackList,
    state: PlaybackState,
    track_label: String,
    time_label: String,
    notice: Option<String>,
}

impl<E: PlaybackEngine> Coordinator<E> {
    /// Create a coordinator and subscribe to the engine's notifications.
    pub fn new(mut engine: E) -> Self {
        let events = engine.subscribe();
        Self {
            engine,
            events,
            tracks: TrackList::new(),
            state: PlaybackState::default(),
            track_label: NO_TRACK_LABEL.to_string(),
            time_label: time_label(0, 0),
            notice: None,
        }
    }

    /// Append tracks for `locators` and return how many were added.
    ///
    /// When nothing is playing, the first newly added track starts.
    pub fn add_tracks<I>(&mut self, locators: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let before = self.tracks.len();
        let Some(first) = self.tracks.append(locators) else {
            debug!("no tracks to add");
            return 0;
        };
        let added = self.tracks.len() - before;
        info!(
            "added {} tracks, playlist now has {}",
            added,
            self.tracks.len()
        );

        if !self.state.is_playing() {
            self.start(first);
        }
        added
    }

    /// Play the track at `index`; out-of-range selections are ignored.
    pub fn play_selected(&mut self, index: usize) {
        if !self.tracks.contains_index(index) {
            debug!(
                "ignoring selection of track #{}, playlist has {} tracks",
                index,
                self.tracks.len()
            );
            return;
        }
        self.start(index);
    }

    fn start(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index) else {
            return;
        };
        debug!("starting track #{} {:?}", index, track.locator);
        self.state.current_index = Some(index);
        self.engine.load(index, &track.locator);
        self.engine.play();
        self.state.status = PlaybackStatus::Playing;
    }

    pub fn play(&mut self) {
        self.engine.play();
        if self.state.current_index.is_some() {
            self.state.status = PlaybackStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        self.engine.pause();
        if self.state.current_index.is_some() {
            self.state.status = PlaybackStatus::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.state.status = PlaybackStatus::Stopped;
    }

    /// Pause when playing, otherwise play.
    pub fn toggle_pause(&mut self) {
        if self.state.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance to the next track, wrapping to the first.
    pub fn next(&mut self) {
        match self.tracks.next_index(self.state.current_index) {
            Some(index) => self.start(index),
            None => debug!("next requested on an empty playlist"),
        }
    }

    /// Go back to the previous track, wrapping to the last.
    pub fn previous(&mut self) {
        match self.tracks.previous_index(self.state.current_index) {
            Some(index) => self.start(index),
            None => debug!("previous requested on an empty playlist"),
        }
    }

    /// Ask the engine to jump to `position_ms`.
    ///
    /// Positions past the known duration are rejected and `false` is returned.
    /// The engine reports the resulting position through a notification.
    pub fn seek(&mut self, position_ms: u64) -> bool {
        if position_ms > self.state.duration_ms {
            debug!(
                "rejecting seek to {}ms, duration is {}ms",
                position_ms, self.state.duration_ms
            );
            return false;
        }
        self.engine.set_position(position_ms);
        true
    }

    /// Seek relative to the current position, clamped to the track bounds.
    pub fn seek_by(&mut self, delta_ms: i64) -> bool {
        let target = (self.state.position_ms as i64)
            .saturating_add(delta_ms)
            .clamp(0, self.state.duration_ms as i64);
        self.seek(target as u64)
    }

    /// Dispatch every pending engine notification. Returns how many were handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::DurationChanged(ms) => self.on_duration_changed(ms),
            EngineEvent::PositionChanged(ms) => self.on_position_changed(ms),
            EngineEvent::TrackChanged(index) => self.on_track_changed(index),
            EngineEvent::EndOfTrack(index) => self.on_end_of_track(index),
            EngineEvent::Error { locator, message } => self.on_error(&locator, &message),
        }
    }

    pub fn on_duration_changed(&mut self, duration_ms: u64) {
        self.state.duration_ms = duration_ms;
        self.time_label = time_label(self.state.position_ms, duration_ms);
    }

    pub fn on_position_changed(&mut self, position_ms: u64) {
        let total = if self.state.duration_ms > 0 {
            self.state.duration_ms
        } else {
            self.engine.duration()
        };
        self.state.position_ms = if total > 0 {
            position_ms.min(total)
        } else {
            position_ms
        };
        self.time_label = time_label(self.state.position_ms, total);
    }

    pub fn on_track_changed(&mut self, index: Option<usize>) {
        match index.and_then(|i| self.tracks.get(i)) {
            Some(track) => {
                self.track_label = track.display_name.clone();
                self.notice = None;
            }
            None => debug!("track changed to {:?}, keeping current label", index),
        }
    }

    /// Track `index` ended on its own; the playlist loops onward.
    ///
    /// Ignored unless `index` is still the current track, so a report queued
    /// before the user picked another track does not skip past it.
    pub fn on_end_of_track(&mut self, index: usize) {
        if self.state.current_index != Some(index) {
            debug!(
                "ignoring end of track #{}, current is {:?}",
                index, self.state.current_index
            );
            return;
        }
        if self.state.is_playing() {
            self.next();
        }
    }

    /// The engine could not open `locator`. When that is the current track,
    /// nothing is playing any more and the status drops to Stopped.
    pub fn on_error(&mut self, locator: &Path, message: &str) {
        warn!("engine failed on {:?}: {}", locator, message);
        if self.current_track().is_some_and(|t| t.locator == locator) {
            self.state.status = PlaybackStatus::Stopped;
        }
        let name = Track::from_locator(locator).display_name;
        self.notice = Some(format!("Cannot play {}: {}", name, message));
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_index.and_then(|i| self.tracks.get(i))
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn position_ms(&self) -> u64 {
        self.state.position_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.state.duration_ms
    }

    pub fn loop_enabled(&self) -> bool {
        self.state.loop_enabled
    }

    pub fn track_label(&self) -> &str {
        &self.track_label
    }

    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    pub fn slider(&self) -> Slider {
        Slider {
            max: self.state.duration_ms,
            value: self.state.position_ms,
        }
    }

    /// Last engine failure, cleared when a track loads successfully.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
