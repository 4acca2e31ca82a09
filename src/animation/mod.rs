//! Animation system for choreographed formation transitions.
//!
//! [`behaviors`] decide when each dancer starts moving, [`interpolation`]
//! turns a progress value into positions, and [`sequencer`] drives progress
//! over wall-clock time.

pub mod behaviors;
pub mod interpolation;
pub mod sequencer;

pub use interpolation::{interpolate, interpolate_formations, PairingPolicy};
pub use sequencer::{PlaybackMode, PlaybackSequencer, PlaybackState};
