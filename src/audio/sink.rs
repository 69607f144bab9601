//! Utilities for creating `rodio` sinks from track locators.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

/// A paused sink plus the total length of its source, when known.
pub(super) struct PreparedSink {
    pub sink: Sink,
    pub duration: Option<Duration>,
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<PreparedSink> {
    let file = File::open(path).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // Some decoders (VBR mp3 mostly) cannot tell their length up front.
    let duration = decoder.total_duration().or_else(|| tag_duration(path));

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our fallback seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.set_volume(volume);
    sink.pause();

    Ok(PreparedSink { sink, duration })
}

/// Read the track length from the file's audio properties.
pub(super) fn tag_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}
