use std::path::PathBuf;

use crate::library::Track;

/// Ordered list of tracks; insertion order is playback order.
#[derive(Clone, Debug, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track for every locator, returning the index of the first one.
    pub fn append<I>(&mut self, locators: I) -> Option<usize>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let first = self.tracks.len();
        self.tracks
            .extend(locators.into_iter().map(Track::from_locator));
        (self.tracks.len() > first).then_some(first)
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.tracks.len()
    }

    /// Index after `current`, wrapping to the first track.
    /// Without a current track the first one is next.
    pub fn next_index(&self, current: Option<usize>) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match current {
            Some(i) if i + 1 < self.tracks.len() => Some(i + 1),
            _ => Some(0),
        }
    }

    /// Index before `current`, wrapping to the last track.
    /// Without a current track the last one is previous.
    pub fn previous_index(&self, current: Option<usize>) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let last = self.tracks.len() - 1;
        match current {
            Some(0) | None => Some(last),
            Some(i) if i > last => Some(last),
            Some(i) => Some(i - 1),
        }
    }
}
