//! Chat turn orchestration
//!
//! Takes a user message through profile extraction and stage tracking, asks
//! the model for a reply and streams it back at a human typing pace.

mod pacing;
mod persona;
mod streamer;
mod turn;

pub use streamer::ResponseStreamer;

#[cfg(test)]
pub use pacing::PacingConfig;
#[cfg(test)]
pub use streamer::START_APOLOGY;
