use crate::audio::PlaybackEngine;
use crate::coordinator::Coordinator;
use crate::mpris::MprisHandle;

pub fn update_mpris<E: PlaybackEngine>(mpris: &MprisHandle, coordinator: &Coordinator<E>) {
    mpris.set_track_metadata(
        coordinator.current_index(),
        coordinator.current_track(),
        coordinator.duration_ms(),
    );
    mpris.set_playback(coordinator.status());
}
