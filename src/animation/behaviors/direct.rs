//! Synchronous motion: every dancer moves at once.

use super::traits::TransitionBehavior;
use crate::formation::DancerPosition;

/// All dancers start together and arrive together.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl TransitionBehavior for Direct {
    fn stagger_delays(&self, source: &[DancerPosition]) -> Vec<f32> {
        vec![0.0; source.len()]
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}
