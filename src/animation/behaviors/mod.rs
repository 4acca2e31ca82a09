//! Transition behaviors define when each dancer starts moving.
//!
//! Behaviors are decoupled from formations: a [`TransitionStyle`] stored on
//! a formation is resolved to a behavior with [`behavior_for`] at the
//! moment a transition is computed.

mod cascade;
mod direct;
mod traits;
mod wave;

pub use cascade::Cascade;
pub use direct::Direct;
pub use traits::{local_progress, TransitionBehavior};
pub use wave::{Wave, WaveDirection};

use crate::formation::TransitionStyle;

/// The behavior implementing a stored transition style.
#[must_use]
pub fn behavior_for(style: TransitionStyle) -> &'static dyn TransitionBehavior {
    match style {
        TransitionStyle::Direct => &Direct,
        TransitionStyle::Staggered => &Cascade::STAGGERED,
        TransitionStyle::WaveLeftToRight => &Wave::LEFT_TO_RIGHT,
        TransitionStyle::WaveRightToLeft => &Wave::RIGHT_TO_LEFT,
        TransitionStyle::Cascade => &Cascade::FULL,
    }
}
