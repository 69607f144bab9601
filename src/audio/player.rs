use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, DurationHandle, EngineEvent, PlaybackEngine};

/// Playback engine backed by rodio, running on its own audio thread.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    events: Option<Receiver<EngineEvent>>,
    duration: DurationHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let duration: DurationHandle = Arc::new(AtomicU64::new(0));

        let audio_handle = spawn_audio_thread(rx, event_tx, duration.clone(), audio_settings);

        Self {
            tx,
            events: Some(event_rx),
            duration,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!("audio thread is not running, dropped {:?}", e.0);
        }
    }

    /// Fade out, stop the audio thread and wait for it to finish.
    pub fn shutdown(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                if h.join().is_err() {
                    warn!("audio thread panicked before shutdown");
                }
            }
        }
    }
}

impl PlaybackEngine for RodioEngine {
    fn subscribe(&mut self) -> Receiver<EngineEvent> {
        self.events.take().unwrap_or_else(|| {
            warn!("engine notifications were already subscribed");
            mpsc::channel().1
        })
    }

    fn load(&self, index: usize, locator: &Path) {
        self.send(AudioCmd::Load {
            index,
            path: locator.to_path_buf(),
        });
    }

    fn play(&self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&self) {
        self.send(AudioCmd::Pause);
    }

    fn stop(&self) {
        self.send(AudioCmd::Stop);
    }

    fn set_position(&self, position_ms: u64) {
        self.send(AudioCmd::SetPosition(position_ms));
    }

    fn duration(&self) -> u64 {
        self.duration.load(Ordering::Acquire)
    }
}
