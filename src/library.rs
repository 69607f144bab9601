//! Track model and file selection.
//!
//! Turns user supplied paths into playable tracks: files are filtered by
//! extension and directories are walked for audio files.

mod model;
mod scan;

pub use model::Track;
pub use scan::collect_audio_files;

#[cfg(test)]
mod tests;
