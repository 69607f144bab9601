//! Playback engine: the trait the coordinator drives and its rodio backed
//! implementation running on a dedicated audio thread.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioEngine;
pub use types::*;

#[cfg(test)]
mod tests;
