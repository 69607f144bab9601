use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, info, trace, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::error::{Error, Result};

use super::sink::{PreparedSink, create_sink_at};
use super::types::{AudioCmd, DurationHandle, EngineEvent};

/// The track currently held by the audio thread.
struct Loaded {
    index: usize,
    path: PathBuf,
    sink: Sink,
    /// Start offset of `sink` when it was rebuilt with `skip_duration`;
    /// `Sink::get_pos` counts from zero for every new sink.
    offset: Duration,
    duration: Option<Duration>,
}

struct AudioThread {
    stream: Option<OutputStream>,
    events: Sender<EngineEvent>,
    duration_handle: DurationHandle,
    settings: AudioSettings,
    current: Option<Loaded>,
    paused: bool,
    ended: bool,
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineEvent>,
    duration_handle: DurationHandle,
    settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped, which would
                // scribble over the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!("no audio output device available: {e}");
                None
            }
        };

        let mut audio = AudioThread {
            stream,
            events,
            duration_handle,
            settings,
            current: None,
            paused: true,
            ended: false,
        };
        audio.run(rx);
        debug!("audio thread finished");
    })
}

impl AudioThread {
    fn run(&mut self, rx: Receiver<AudioCmd>) {
        let interval = Duration::from_millis(self.settings.position_interval_ms.max(10));
        let mut last_report = Instant::now();

        loop {
            let wait = interval.saturating_sub(last_report.elapsed());
            match rx.recv_timeout(wait) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    self.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => self.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if last_report.elapsed() >= interval {
                last_report = Instant::now();
                self.tick();
            }
        }
    }

    fn handle(&mut self, cmd: AudioCmd) {
        trace!("audio command {:?}", cmd);
        match cmd {
            AudioCmd::Load { index, path } => self.load(index, path),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => {
                if let Some(loaded) = self.current.as_ref() {
                    loaded.sink.pause();
                    self.paused = true;
                    self.report_position();
                }
            }
            AudioCmd::Stop => self.stop(),
            AudioCmd::SetPosition(ms) => self.seek(Duration::from_millis(ms)),
            AudioCmd::Quit { .. } => {}
        }
    }

    fn emit(&self, event: EngineEvent) {
        // The receiver is gone only while the player shuts down.
        let _ = self.events.send(event);
    }

    fn publish_duration(&self, duration: Option<Duration>) {
        let ms = duration.map_or(0, |d| d.as_millis() as u64);
        self.duration_handle.store(ms, Ordering::Release);
        self.emit(EngineEvent::DurationChanged(ms));
    }

    fn prepare(&self, path: &Path, start_at: Duration) -> Result<PreparedSink> {
        let Some(stream) = self.stream.as_ref() else {
            return Err(Error::AudioOutput("no default output device".to_string()));
        };
        create_sink_at(stream, path, start_at, self.settings.volume)
    }

    fn load(&mut self, index: usize, path: PathBuf) {
        if let Some(old) = self.current.take() {
            old.sink.stop();
        }
        self.paused = true;
        self.ended = false;

        match self.prepare(&path, Duration::ZERO) {
            Ok(prepared) => {
                info!("loaded track #{} {:?}", index, path);
                let duration = prepared.duration;
                self.current = Some(Loaded {
                    index,
                    path,
                    sink: prepared.sink,
                    offset: Duration::ZERO,
                    duration,
                });
                self.emit(EngineEvent::TrackChanged(Some(index)));
                self.publish_duration(duration);
                self.emit(EngineEvent::PositionChanged(0));
            }
            Err(e) => {
                warn!("failed to load {:?}: {}", path, e);
                self.publish_duration(None);
                self.emit(EngineEvent::PositionChanged(0));
                self.emit(EngineEvent::Error {
                    locator: path,
                    message: e.to_string(),
                });
            }
        }
    }

    fn play(&mut self) {
        if self.current.is_none() {
            debug!("play requested with nothing loaded");
            return;
        }
        if self.ended {
            // Replaying a drained sink needs a fresh source.
            self.rebuild_at(Duration::ZERO);
        }
        if let Some(loaded) = self.current.as_ref() {
            loaded.sink.play();
            self.paused = false;
        }
        self.report_position();
    }

    fn stop(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.paused = true;
        self.rebuild_at(Duration::ZERO);
        self.emit(EngineEvent::PositionChanged(0));
    }

    fn seek(&mut self, target: Duration) {
        let Some(loaded) = self.current.as_mut() else {
            return;
        };

        let seeked = !self.ended
            && !loaded.sink.empty()
            && match loaded.sink.try_seek(target) {
                Ok(()) => true,
                Err(e) => {
                    debug!("in-place seek failed for {:?}, rebuilding: {e}", loaded.path);
                    false
                }
            };

        if seeked {
            loaded.offset = Duration::ZERO;
        } else {
            self.rebuild_at(target);
        }
        self.report_position();
    }

    /// Replace the current sink with a fresh one skipping to `start_at`,
    /// preserving the paused state.
    fn rebuild_at(&mut self, start_at: Duration) {
        let Some((index, path)) = self
            .current
            .as_ref()
            .map(|loaded| (loaded.index, loaded.path.clone()))
        else {
            return;
        };

        match self.prepare(&path, start_at) {
            Ok(prepared) => {
                if let Some(old) = self.current.take() {
                    old.sink.stop();
                }
                if !self.paused {
                    prepared.sink.play();
                }
                self.current = Some(Loaded {
                    index,
                    path,
                    sink: prepared.sink,
                    offset: start_at,
                    duration: prepared.duration,
                });
                self.ended = false;
            }
            Err(e) => {
                warn!("failed to reopen {:?}: {}", path, e);
                self.emit(EngineEvent::Error {
                    locator: path,
                    message: e.to_string(),
                });
            }
        }
    }

    fn position(&self) -> Duration {
        let Some(loaded) = self.current.as_ref() else {
            return Duration::ZERO;
        };
        let pos = loaded.offset + loaded.sink.get_pos();
        match loaded.duration {
            Some(total) => pos.min(total),
            None => pos,
        }
    }

    fn report_position(&self) {
        if self.current.is_some() {
            self.emit(EngineEvent::PositionChanged(
                self.position().as_millis() as u64,
            ));
        }
    }

    fn tick(&mut self) {
        let Some(loaded) = self.current.as_ref() else {
            return;
        };
        if self.paused || self.ended {
            return;
        }

        if loaded.sink.empty() {
            debug!("track #{} finished", loaded.index);
            if let Some(total) = loaded.duration {
                self.emit(EngineEvent::PositionChanged(total.as_millis() as u64));
            }
            let index = loaded.index;
            self.ended = true;
            self.paused = true;
            self.emit(EngineEvent::EndOfTrack(index));
        } else {
            self.report_position();
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(loaded) = self.current.take() {
            if !self.paused {
                // Fade out gently before stopping.
                fade_out_sink(&loaded.sink, self.settings.volume, fade_out_ms);
            }
            loaded.sink.stop();
        }
    }
}

fn fade_out_sink(sink: &Sink, volume: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(volume * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
