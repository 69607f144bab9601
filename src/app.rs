//! Application module: exposes the UI-side model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist cursor, the
//! input mode and the "Add Songs" prompt. Playback state itself belongs to
//! the coordinator.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
