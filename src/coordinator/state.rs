/// Transport status, changed only by explicit play/pause/stop requests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }
}

/// Mutable playback state owned by the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: Option<usize>,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub status: PlaybackStatus,
    /// The playlist always loops; kept as state so the UI can show it.
    pub loop_enabled: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_index: None,
            position_ms: 0,
            duration_ms: 0,
            status: PlaybackStatus::Stopped,
            loop_enabled: true,
        }
    }
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }
}

/// Range and value of the time scrubber.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Slider {
    pub max: u64,
    pub value: u64,
}

impl Slider {
    /// Fill ratio in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            (self.value.min(self.max) as f64) / (self.max as f64)
        }
    }

    /// Map a ratio along the slider back to a position.
    pub fn position_at(&self, ratio: f64) -> u64 {
        let ratio = ratio.clamp(0.0, 1.0);
        (self.max as f64 * ratio).round() as u64
    }
}
