//! Core trait for transition behaviors.

use crate::formation::DancerPosition;
use crate::util::easing::cubic_in_out;

/// Map global transition progress to one dancer's local progress, given
/// that dancer's start delay.
///
/// The dancer waits until `global_t` passes `delay`, then covers its whole
/// path by `global_t = 1`, so every behavior arrives on time.
#[inline]
#[must_use]
pub fn local_progress(global_t: f32, delay: f32) -> f32 {
    if delay >= 1.0 {
        return if global_t >= 1.0 { 1.0 } else { 0.0 };
    }
    ((global_t - delay) / (1.0 - delay)).clamp(0.0, 1.0)
}

/// Defines how dancers' individual motions are offset from each other
/// during a transition.
///
/// Implementations only decide *when* each dancer starts; the path is
/// always a straight cubic-eased lerp from source to target. See
/// [`Direct`](super::Direct), [`Cascade`](super::Cascade) and
/// [`Wave`](super::Wave).
pub trait TransitionBehavior: Send + Sync {
    /// Start delay in `[0, 1)` for each source dancer, in stored order.
    fn stagger_delays(&self, source: &[DancerPosition]) -> Vec<f32>;

    /// Eased progress for a dancer with the given delay.
    /// Default: cubic ease-in-out over the dancer's local progress.
    fn eased_t(&self, global_t: f32, delay: f32) -> f32 {
        cubic_in_out(local_progress(global_t, delay))
    }

    /// Optional name for debugging/logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}
